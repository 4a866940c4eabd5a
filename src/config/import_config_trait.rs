// ==========================================
// 服装零售POS系统 - 导入配置接口
// ==========================================
// 职责: 定义导入引擎可调参数的读取接口(不包含实现)
// ==========================================

use async_trait::async_trait;
use std::error::Error;

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 用途: 导入引擎在每次对账过程开始时读取一次
// 实现者: ImportConfigManager (生产) / 测试 Mock
#[async_trait]
pub trait ImportConfigReader: Send + Sync {
    /// 单次导入允许的最大数据行数
    async fn get_max_rows(&self) -> Result<usize, Box<dyn Error>>;

    /// 聚合库存策略合成的占位尺码名(如 "One Size")
    async fn get_one_size_label(&self) -> Result<String, Box<dyn Error>>;

    /// 可见性列的肯定取值(大小写不敏感匹配)
    async fn get_affirmative_tokens(&self) -> Result<Vec<String>, Box<dyn Error>>;
}
