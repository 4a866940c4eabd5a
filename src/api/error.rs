// ==========================================
// 服装零售POS系统 - 操作层错误类型
// ==========================================
// 职责: 将仓储/导入错误转换为面向调用方的错误
// 工具: thiserror 派生宏
// ==========================================

use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 操作层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== 业务规则错误 =====
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ===== 下层错误 =====
    #[error("文件导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("数据访问失败: {0}")]
    Repository(#[from] RepositoryError),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),
}

/// 操作层 Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
