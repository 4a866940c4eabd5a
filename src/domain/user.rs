// ==========================================
// 服装零售POS系统 - 用户领域模型
// ==========================================
// 职责: 后台用户管理实体
// ==========================================

use crate::domain::types::Role;
use serde::{Deserialize, Serialize};

// ==========================================
// User - 后台用户
// ==========================================
// 对齐: GET /users 返回元素;口令只写不读,远端不回传
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,       // 用户唯一标识
    pub username: String, // 登录名
    pub role: Role,       // 角色
}

// ==========================================
// NewUser - 创建用户请求体
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: Role,
}
