// ==========================================
// 服装零售POS系统 - 配置层
// ==========================================
// 职责: 客户端连接配置 + 导入可调参数
// ==========================================

pub mod client_config;
pub mod import_config_manager;
pub mod import_config_trait;

pub use client_config::ClientConfig;
pub use import_config_manager::{ImportConfigManager, ImportTunables};
pub use import_config_trait::ImportConfigReader;
