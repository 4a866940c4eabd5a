// ==========================================
// 服装零售POS系统 - 导入配置管理器
// ==========================================
// 职责: 导入可调参数的加载与默认值
// 存储: config.json 的 import 段(缺失即用默认值)
// ==========================================

use crate::config::import_config_trait::ImportConfigReader;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::error::Error;

/// 默认单次导入最大行数
const DEFAULT_MAX_ROWS: usize = 10_000;
/// 默认占位尺码名(聚合库存策略)
const DEFAULT_ONE_SIZE_LABEL: &str = "One Size";

// ==========================================
// ImportTunables - 导入可调参数
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportTunables {
    /// 单次导入最大数据行数
    pub max_rows: usize,
    /// 聚合库存策略的占位尺码名
    pub one_size_label: String,
    /// 可见性列肯定取值
    pub affirmative_tokens: Vec<String>,
}

impl Default for ImportTunables {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
            one_size_label: DEFAULT_ONE_SIZE_LABEL.to_string(),
            affirmative_tokens: vec!["yes".to_string(), "true".to_string()],
        }
    }
}

// ==========================================
// ImportConfigManager - 导入配置管理器
// ==========================================
pub struct ImportConfigManager {
    tunables: ImportTunables,
}

impl ImportConfigManager {
    /// 使用给定参数创建
    pub fn new(tunables: ImportTunables) -> Self {
        Self { tunables }
    }
}

impl Default for ImportConfigManager {
    fn default() -> Self {
        Self::new(ImportTunables::default())
    }
}

#[async_trait]
impl ImportConfigReader for ImportConfigManager {
    async fn get_max_rows(&self) -> Result<usize, Box<dyn Error>> {
        Ok(self.tunables.max_rows)
    }

    async fn get_one_size_label(&self) -> Result<String, Box<dyn Error>> {
        Ok(self.tunables.one_size_label.clone())
    }

    async fn get_affirmative_tokens(&self) -> Result<Vec<String>, Box<dyn Error>> {
        Ok(self.tunables.affirmative_tokens.clone())
    }
}
