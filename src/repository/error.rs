// ==========================================
// 服装零售POS系统 - 数据访问层错误类型
// ==========================================
// 职责: 远端数据服务访问错误的统一类型
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 数据访问层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 远端服务错误 =====
    /// 远端返回业务错误体 {message, details?}
    #[error("远端返回 HTTP {status}: {message}")]
    Service { status: u16, message: String },

    #[error("未认证或令牌失效: {0}")]
    Unauthorized(String),

    #[error("记录未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    // ===== 传输层错误 =====
    #[error("网络请求失败: {0}")]
    Network(String),

    #[error("请求超时: {0}")]
    Timeout(String),

    // ===== 响应解析错误 =====
    #[error("响应解码失败: {0}")]
    Decode(String),

    // ===== 通用错误 =====
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<reqwest::Error>
impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RepositoryError::Timeout(err.to_string())
        } else if err.is_decode() {
            RepositoryError::Decode(err.to_string())
        } else {
            RepositoryError::Network(err.to_string())
        }
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Decode(err.to_string())
    }
}

/// 数据访问层 Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
