// ==========================================
// 服装零售POS系统 - 会话管理
// ==========================================
// 职责: 显式会话对象(当前用户 + Bearer 令牌)
// 红线: 不使用全局可变状态;会话由构造注入数据访问层
// 持久化: 进程边界处显式 load/save(JSON 文件)
// ==========================================

use crate::domain::user::User;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

// ==========================================
// Session - 会话对象
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    /// 当前登录用户(未登录为 None)
    pub user: Option<User>,
    /// Bearer 令牌(未登录为 None)
    pub token: Option<String>,
}

impl Session {
    /// 创建空会话(匿名)
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建携带令牌的会话
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            user: None,
            token: Some(token.into()),
        }
    }

    /// 是否已认证
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// 取 Bearer 令牌
    pub fn bearer_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// 清除会话(登出)
    pub fn clear(&mut self) {
        self.user = None;
        self.token = None;
    }

    /// 默认会话文件路径: <配置目录>/pos-backoffice/session.json
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pos-backoffice").join("session.json"))
    }

    /// 从文件加载会话
    ///
    /// # 返回
    /// - Ok(Session): 文件存在且解析成功
    /// - Ok(Session::default()): 文件不存在(视为匿名会话)
    /// - Err: 文件存在但内容损坏
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)?;
        let session: Session = serde_json::from_str(&raw)?;
        Ok(session)
    }

    /// 保存会话到文件(父目录不存在时自动创建)
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw)?;
        Ok(())
    }
}
