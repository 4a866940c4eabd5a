// ==========================================
// 服装零售POS系统 - 导入对账领域模型
// ==========================================
// 职责: 一次对账过程(reconciliation pass)的中间结构与结果结构
// 生命周期: 仅在单次导入流程内,不落任何存储
// ==========================================

use crate::domain::catalog::{Category, Manufacturer, Product};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 原始导入行: 列名 → 单元格文本(未做任何类型约束)
pub type ImportRow = HashMap<String, String>;

// ==========================================
// ReconciliationOutcome - 单行对账结论
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReconciliationOutcome {
    /// 货号在目录中不存在,已新建
    Inserted,
    /// 货号命中既有商品,已按其 id 更新
    Updated,
    /// 行被拒绝,原因按发现顺序排列
    Rejected { reasons: Vec<String> },
}

impl ReconciliationOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, ReconciliationOutcome::Rejected { .. })
    }
}

// ==========================================
// RowOutcome - 带行号的单行结果
// ==========================================
// 行号规则: 数据行下标 i (0 起) 报告为 i + 2,补偿表头行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowOutcome {
    pub row_number: usize,            // 展示用行号(1 起,含表头偏移)
    pub code: Option<String>,         // 行内货号(解析失败时可能为空)
    pub outcome: ReconciliationOutcome,
}

// ==========================================
// RowWarning - 非致命警告
// ==========================================
// 用途: 行仍然导入,但存在数据质量提示(如三种尺码策略均无数据)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowWarning {
    pub row_number: usize,
    pub message: String,
}

// ==========================================
// PassCondition - 整体结论
// ==========================================
// 规则:
// - 无数据行 → EmptyInput
// - 全部成功 → Success
// - 有成功也有拒绝 → PartialSuccess(拒绝作为明细,不否定整体)
// - 全部拒绝 → TotalFailure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PassCondition {
    EmptyInput,
    Success,
    PartialSuccess,
    TotalFailure,
}

impl fmt::Display for PassCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassCondition::EmptyInput => write!(f, "EMPTY_INPUT"),
            PassCondition::Success => write!(f, "SUCCESS"),
            PassCondition::PartialSuccess => write!(f, "PARTIAL_SUCCESS"),
            PassCondition::TotalFailure => write!(f, "TOTAL_FAILURE"),
        }
    }
}

// ==========================================
// ImportReport - 对账过程汇总
// ==========================================
// 用途: 引擎对调用方的唯一产出;逐行失败不抛错,全部收敛到此结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub batch_id: String,              // 本次对账批次ID
    pub condition: PassCondition,      // 整体结论
    pub total_rows: usize,             // 数据行总数(不含表头)
    pub inserted: usize,               // 新建数
    pub updated: usize,                // 更新数
    pub rejected: usize,               // 拒绝数
    pub outcomes: Vec<RowOutcome>,     // 逐行结果(输入顺序)
    pub warnings: Vec<RowWarning>,     // 非致命警告(输入顺序)
    pub rejection_details: Vec<String>, // 拒绝明细(行序拼接,用于报告展示)
    pub elapsed_ms: i64,               // 过程耗时(毫秒)
}

impl ImportReport {
    /// 整体是否算成功(存在任一成功行即视为成功,拒绝仅作明细)
    pub fn is_success(&self) -> bool {
        matches!(
            self.condition,
            PassCondition::Success | PassCondition::PartialSuccess
        )
    }

    /// 由逐行结果推导整体结论
    pub fn derive_condition(total_rows: usize, succeeded: usize, rejected: usize) -> PassCondition {
        if total_rows == 0 {
            PassCondition::EmptyInput
        } else if rejected == 0 {
            PassCondition::Success
        } else if succeeded > 0 {
            PassCondition::PartialSuccess
        } else {
            PassCondition::TotalFailure
        }
    }
}

// ==========================================
// CatalogIndex - 目录快照索引
// ==========================================
// 用途: 每次对账过程构建一次的只读查找结构
// - 类目/厂商: 名称(小写) → id
// - 商品: 货号(小写) → 既有商品
// 红线: 过程内只读;过程结束即丢弃,不做增量维护
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    categories_by_name: HashMap<String, String>,
    manufacturers_by_name: HashMap<String, String>,
    products_by_code: HashMap<String, Product>,
}

impl CatalogIndex {
    /// 从目录快照构建索引(名称/货号统一 trim + 小写)
    pub fn build(
        categories: &[Category],
        manufacturers: &[Manufacturer],
        products: &[Product],
    ) -> Self {
        let categories_by_name = categories
            .iter()
            .map(|c| (normalize_key(&c.name), c.id.clone()))
            .collect();
        let manufacturers_by_name = manufacturers
            .iter()
            .map(|m| (normalize_key(&m.name), m.id.clone()))
            .collect();
        let products_by_code = products
            .iter()
            .map(|p| (normalize_key(&p.code), p.clone()))
            .collect();

        Self {
            categories_by_name,
            manufacturers_by_name,
            products_by_code,
        }
    }

    /// 按名称解析类目ID(大小写不敏感)
    pub fn category_id(&self, name: &str) -> Option<&str> {
        self.categories_by_name
            .get(&normalize_key(name))
            .map(String::as_str)
    }

    /// 按名称解析厂商ID(大小写不敏感)
    pub fn manufacturer_id(&self, name: &str) -> Option<&str> {
        self.manufacturers_by_name
            .get(&normalize_key(name))
            .map(String::as_str)
    }

    /// 按货号查找既有商品(大小写不敏感)
    pub fn product_by_code(&self, code: &str) -> Option<&Product> {
        self.products_by_code.get(&normalize_key(code))
    }

    pub fn product_count(&self) -> usize {
        self.products_by_code.len()
    }
}

fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}
