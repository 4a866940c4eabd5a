// ==========================================
// 服装零售POS系统 - 领域类型定义
// ==========================================
// 职责: 跨模块共享的枚举类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 用户角色 (Role)
// ==========================================
// 序列化格式: 小写 (与远端服务一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,   // 后台管理员
    Cashier, // 收银员
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Cashier => write!(f, "cashier"),
        }
    }
}

// ==========================================
// 商品列表排序键 (Sort Key)
// ==========================================
// 用途: 商品列表本地排序(内存中,不下发远端)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductSortKey {
    Title, // 按名称
    Code,  // 按货号
    Price, // 按价格
}

// ==========================================
// 排序方向 (Sort Order)
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,  // 升序
    Desc, // 降序
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Role::Admin).unwrap();
        assert_eq!(json, "\"admin\"");

        let role: Role = serde_json::from_str("\"cashier\"").unwrap();
        assert_eq!(role, Role::Cashier);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!(Role::Cashier.to_string(), "cashier");
    }
}
