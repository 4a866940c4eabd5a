// ==========================================
// 服装零售POS系统 - 用户管理API
// ==========================================
// 职责: 后台用户列表与创建
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::user::{NewUser, User};
use crate::store::CatalogStore;
use std::sync::Arc;
use tracing::info;

/// 口令最短长度
const MIN_PASSWORD_LEN: usize = 6;

// ==========================================
// UserApi - 用户管理API
// ==========================================
pub struct UserApi {
    store: Arc<CatalogStore>,
}

impl UserApi {
    /// 创建新的 UserApi 实例
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    /// 用户列表(用户集合不缓存,每次读远端)
    pub async fn list_users(&self) -> ApiResult<Vec<User>> {
        Ok(self.store.repository().get_users().await?)
    }

    /// 创建用户
    pub async fn create_user(&self, new_user: &NewUser) -> ApiResult<User> {
        if new_user.username.trim().is_empty() {
            return Err(ApiError::InvalidInput("登录名不能为空".to_string()));
        }
        if new_user.password.len() < MIN_PASSWORD_LEN {
            return Err(ApiError::InvalidInput(format!(
                "口令长度不得小于 {} 位",
                MIN_PASSWORD_LEN
            )));
        }

        let user = self.store.repository().create_user(new_user).await?;
        info!(username = %user.username, role = %user.role, "用户已创建");
        Ok(user)
    }
}
