// ==========================================
// 服装零售POS系统 - 商品目录领域模型
// ==========================================
// 职责: 商品/类目/品牌实体定义
// 红线: 不含数据访问逻辑; 字段命名与远端服务 JSON 对齐 (camelCase)
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Category - 商品类目
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,   // 类目唯一标识
    pub name: String, // 类目名称(导入时按名称解析,大小写不敏感)
}

// ==========================================
// Manufacturer - 品牌/厂商
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub id: String,   // 厂商唯一标识
    pub name: String, // 厂商名称(导入时按名称解析,大小写不敏感)
}

// ==========================================
// SizeStock - 尺码库存项
// ==========================================
// 用途: 商品的尺码/库存明细,顺序保持输入顺序
// 对齐: 远端服务 sizes 数组元素 / 导入文件 SizesStockJSON 元素
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeStock {
    pub size: String, // 尺码名称(非空;同一商品内允许重复,重复属于数据质量问题)
    pub stock: i64,   // 库存数量(>= 0)
}

// ==========================================
// ProductRecord - 已校验商品载荷
// ==========================================
// 用途: 行校验全部通过后构造;也是 POST/PUT 的请求体
// 红线: 部分合法的行不构造此结构,更不落远端
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub title: String,           // 商品名称(非空)
    pub code: String,            // 货号(非空;自然键,匹配时大小写不敏感)
    pub price: f64,              // 售价(> 0)
    pub category_id: String,     // 类目ID(按名称解析得到)
    pub manufacturer_id: String, // 厂商ID(按名称解析得到)
    pub sizes: Vec<SizeStock>,   // 尺码库存明细(保持输入顺序)
    pub image: String,           // 商品图片URL(非空)
    pub is_visible: bool,        // 前台可见性(缺省为 true)
}

// ==========================================
// Product - 商品(远端持久化形态)
// ==========================================
// 用途: GET /products/admin 返回的完整记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String, // 商品唯一标识(远端生成)
    pub title: String,
    pub code: String,
    pub price: f64,
    pub category_id: String,
    pub manufacturer_id: String,
    pub sizes: Vec<SizeStock>,
    pub image: String,
    pub is_visible: bool,
}

impl Product {
    /// 去掉 id,得到可用于 PUT 更新的载荷
    pub fn to_record(&self) -> ProductRecord {
        ProductRecord {
            title: self.title.clone(),
            code: self.code.clone(),
            price: self.price,
            category_id: self.category_id.clone(),
            manufacturer_id: self.manufacturer_id.clone(),
            sizes: self.sizes.clone(),
            image: self.image.clone(),
            is_visible: self.is_visible,
        }
    }

    /// 商品总库存(各尺码之和)
    pub fn total_stock(&self) -> i64 {
        self.sizes.iter().map(|s| s.stock).sum()
    }
}
