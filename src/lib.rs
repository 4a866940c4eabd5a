// ==========================================
// 服装零售POS系统 - 核心库
// ==========================================
// 技术栈: Rust + Tokio + Reqwest
// 系统定位: 后台管理核心(目录同步 / 批量导入对账 / 导出)
// 持久化: 远端 REST 数据服务(本库不落本地存储)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据访问层 - 远端 REST 服务
pub mod repository;

// 缓存存储层 - 集合缓存与失效契约
pub mod store;

// 导入层 - 对账引擎与导出投影
pub mod importer;

// 配置层 - 连接配置与导入参数
pub mod config;

// 会话管理 - 显式会话对象
pub mod session;

// 日志系统
pub mod logging;

// 操作层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ProductSortKey, Role, SortOrder};

// 领域实体
pub use domain::{
    CatalogIndex, Category, ImportReport, ImportRow, Manufacturer, NewSale, NewUser,
    PassCondition, Product, ProductRecord, ReconciliationOutcome, RowOutcome, RowWarning,
    SaleRecord, SalesSummary, SizeStock, User,
};

// 数据访问
pub use repository::{CatalogRepository, CatalogRepositoryImpl, RepositoryError};

// 缓存存储
pub use store::{CatalogStore, Collection, Mutation};

// 导入与导出
pub use importer::{
    ImportError, ProductExporter, ProductImporter, ProductImporterImpl, UniversalFileParser,
};

// 会话与配置
pub use config::{ClientConfig, ImportConfigManager, ImportConfigReader, ImportTunables};
pub use session::Session;

/// 系统版本号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
