// ==========================================
// 服装零售POS系统 - 商品导入 Trait
// ==========================================
// 职责: 定义商品导入接口（不包含实现）
// ==========================================

use crate::domain::catalog::ProductRecord;
use crate::domain::import::{CatalogIndex, ImportReport, ImportRow};
use crate::importer::error::ImportError;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行记录（HashMap<列名, 值>）
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(Vec<ImportRow>): 数据行列表(不含表头,完全空白行已跳过)
    /// - Err(ImportError): 文件不可读/格式不支持,属于整体失败,区别于逐行拒绝
    fn parse_to_rows(&self, file_path: &Path) -> Result<Vec<ImportRow>, ImportError>;
}

// ==========================================
// ParsedRow - 行校验产物
// ==========================================
// 用途: 行校验全部通过时的产物;warning 为非致命提示(行仍导入)
#[derive(Debug, Clone)]
pub struct ParsedRow {
    pub record: ProductRecord,
    /// 非致命警告(如三种尺码策略均无数据,按零可售尺码导入)
    pub warning: Option<String>,
}

// ==========================================
// RowParser Trait
// ==========================================
// 用途: 单行校验接口(纯函数,不触网)
// 实现者: RowParserImpl
pub trait RowParser: Send + Sync {
    /// 将一个原始行校验为 ProductRecord,或给出按发现顺序排列的拒绝原因
    ///
    /// # 参数
    /// - row: 原始行
    /// - index: 本次对账过程的目录快照索引(只读)
    ///
    /// # 返回
    /// - Ok(ParsedRow): 全部字段校验通过
    /// - Err(Vec<String>): 拒绝原因列表(累积式,不在首个错误处截断;
    ///   仅缺必填列时例外: 只报缺列清单,不再做后续校验)
    fn parse_row(&self, row: &ImportRow, index: &CatalogIndex) -> Result<ParsedRow, Vec<String>>;
}

// ==========================================
// ProductImporter Trait
// ==========================================
// 用途: 商品导入主接口(一次完整对账过程)
// 实现者: ProductImporterImpl
#[async_trait]
pub trait ProductImporter: Send + Sync {
    /// 从表格文件导入商品数据(主入口)
    ///
    /// # 参数
    /// - file_path: 文件路径(.csv / .xlsx)
    ///
    /// # 返回
    /// - Ok(ImportReport): 对账汇总(逐行失败不抛错,收敛到报告)
    /// - Err(ImportError): 仅文件不可读/行数超限等整体失败
    ///
    /// # 导入流程
    /// 1. 文件解析 → Vec<ImportRow>
    /// 2. 构建目录快照索引(每次过程一次,过程内只读)
    /// 3. 逐行校验;拒绝的行不触网
    /// 4. 合法行按货号对账: 命中 → PUT 更新,未命中 → POST 新建
    /// 5. 变更严格串行,单行远端失败转为该行拒绝,不中断后续行
    /// 6. 汇总整体结论(EmptyInput/Success/PartialSuccess/TotalFailure)
    async fn import_from_file(&self, file_path: &Path) -> Result<ImportReport, ImportError>;

    /// 对已解析的行执行一次对账过程(跳过文件解析阶段)
    ///
    /// # 参数
    /// - rows: 数据行(输入顺序即处理顺序)
    async fn reconcile_rows(&self, rows: Vec<ImportRow>) -> Result<ImportReport, ImportError>;
}
