// ==========================================
// 服装零售POS系统 - 导入层
// ==========================================
// 职责: 表格文件 → 校验 → 按货号对账 → 远端目录;以及互逆的导出投影
// 红线: 不含UI逻辑;所有远端访问经由 CatalogRepository
// ==========================================

// 模块声明
pub mod error;
pub mod exporter;
pub mod file_parser;
pub mod product_importer_impl;
pub mod product_importer_trait;
pub mod row_parser;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use exporter::{ProductExporter, EXPORT_HEADERS};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use product_importer_impl::ProductImporterImpl;
pub use row_parser::RowParser as RowParserImpl;
pub use row_parser::RowParserOptions;

// 重导出 Trait 接口
pub use product_importer_trait::{FileParser, ParsedRow, ProductImporter, RowParser};
