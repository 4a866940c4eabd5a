// ==========================================
// 服装零售POS系统 - 销售记录领域模型
// ==========================================
// 职责: 销售历史与本地统计结构
// 红线: 统计在内存中计算,不向远端下发聚合查询
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// SaleRecord - 单笔销售明细
// ==========================================
// 对齐: GET /sales 返回元素
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub id: String,                 // 销售记录唯一标识
    pub product_id: String,         // 商品ID
    pub title: String,              // 下单时商品名称(快照)
    pub code: String,               // 下单时货号(快照)
    pub size: String,               // 售出尺码
    pub quantity: i64,              // 数量
    pub unit_price: f64,            // 成交单价
    pub sold_at: DateTime<Utc>,     // 成交时间
}

impl SaleRecord {
    /// 单笔金额
    pub fn amount(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

// ==========================================
// NewSale - 创建销售记录请求体
// ==========================================
// 用途: 结账时逐行 POST /sales;名称/货号/单价取下单时刻快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    pub product_id: String,
    pub title: String,
    pub code: String,
    pub size: String,
    pub quantity: i64,
    pub unit_price: f64,
}

// ==========================================
// ProductSalesTally - 按商品聚合
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSalesTally {
    pub product_id: String,
    pub title: String,
    pub code: String,
    pub units: i64,    // 售出件数
    pub revenue: f64,  // 销售额
}

// ==========================================
// SalesSummary - 销售汇总(分析页数据源)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub total_units: i64,                 // 总件数
    pub total_revenue: f64,               // 总销售额
    pub by_product: Vec<ProductSalesTally>, // 按商品聚合,销售额降序
}

impl SalesSummary {
    /// 在内存中对销售明细做聚合
    pub fn from_records(records: &[SaleRecord]) -> Self {
        let mut total_units = 0i64;
        let mut total_revenue = 0f64;
        let mut tallies: HashMap<String, ProductSalesTally> = HashMap::new();

        for record in records {
            total_units += record.quantity;
            total_revenue += record.amount();

            let tally = tallies
                .entry(record.product_id.clone())
                .or_insert_with(|| ProductSalesTally {
                    product_id: record.product_id.clone(),
                    title: record.title.clone(),
                    code: record.code.clone(),
                    units: 0,
                    revenue: 0.0,
                });
            tally.units += record.quantity;
            tally.revenue += record.amount();
        }

        let mut by_product: Vec<ProductSalesTally> = tallies.into_values().collect();
        // 销售额降序,金额相同按货号稳定排序
        by_product.sort_by(|a, b| {
            b.revenue
                .partial_cmp(&a.revenue)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.code.cmp(&b.code))
        });

        Self {
            total_units,
            total_revenue,
            by_product,
        }
    }
}
