// ==========================================
// 服装零售POS系统 - 客户端配置
// ==========================================
// 职责: 远端数据服务连接配置(地址/超时)
// 来源优先级: 环境变量 > 配置文件 > 默认值
// ==========================================

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// 默认远端服务地址
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:4000";
/// 默认请求超时(秒)
const DEFAULT_TIMEOUT_SECS: u64 = 15;

// ==========================================
// ClientConfig - 远端服务连接配置
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// 远端数据服务根地址(末尾不带斜杠)
    pub base_url: String,
    /// 单个请求超时(秒)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// 默认配置文件路径: <配置目录>/pos-backoffice/config.json
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pos-backoffice").join("config.json"))
    }

    /// 从文件加载配置,文件不存在时回退默认值;
    /// 随后应用环境变量覆盖(POS_BACKOFFICE_BASE_URL / POS_BACKOFFICE_TIMEOUT_SECS)
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let mut config = if path.exists() {
            let raw = fs::read_to_string(path)?;
            serde_json::from_str(&raw)?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var("POS_BACKOFFICE_BASE_URL") {
            let trimmed = url.trim();
            if !trimmed.is_empty() {
                config.base_url = trimmed.trim_end_matches('/').to_string();
            }
        }
        if let Ok(raw) = std::env::var("POS_BACKOFFICE_TIMEOUT_SECS") {
            if let Ok(secs) = raw.trim().parse::<u64>() {
                config.timeout_secs = secs;
            }
        }

        Ok(config)
    }

    /// 保存配置到文件(父目录不存在时自动创建)
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw)?;
        Ok(())
    }
}
