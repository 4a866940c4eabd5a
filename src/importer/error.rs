// ==========================================
// 服装零售POS系统 - 导入模块错误类型
// ==========================================
// 职责: 文件级错误(整体失败) + 行级校验错误(收敛为拒绝原因)
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
///
/// 文件级变体是对账过程唯一的 Err 路径;
/// 行级变体不上抛,由引擎渲染为该行的拒绝原因字符串。
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误(整体失败) =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("数据行数超限: {actual} 行,上限 {max} 行")]
    TooManyRows { actual: usize, max: usize },

    // ===== 行级校验错误(拒绝原因,不上抛) =====
    #[error("缺少必填列: {fields}")]
    MissingRequiredField { fields: String },

    #[error("引用无法解析 ({field}): {value}")]
    UnresolvedReference { field: String, value: String },

    #[error("数值无效 ({field}): {value}")]
    InvalidNumber { field: String, value: String },

    #[error("尺码库存数据无效: {0}")]
    MalformedSizePayload(String),

    #[error("远端服务错误: {0}")]
    ServiceError(String),

    // ===== 配置错误 =====
    #[error("导入配置读取失败: {0}")]
    ConfigReadError(String),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// 导入模块 Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
