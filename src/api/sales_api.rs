// ==========================================
// 服装零售POS系统 - 销售历史API
// ==========================================
// 职责: 销售明细列表(日期过滤,最新在前)与本地汇总统计
// ==========================================

use crate::api::error::ApiResult;
use crate::domain::sale::{SaleRecord, SalesSummary};
use crate::store::CatalogStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;

// ==========================================
// SalesFilter - 销售查询条件
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct SalesFilter {
    /// 起始时间(含)
    pub from: Option<DateTime<Utc>>,
    /// 截止时间(含)
    pub to: Option<DateTime<Utc>>,
}

impl SalesFilter {
    fn matches(&self, record: &SaleRecord) -> bool {
        if let Some(from) = self.from {
            if record.sold_at < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if record.sold_at > to {
                return false;
            }
        }
        true
    }
}

// ==========================================
// SalesApi - 销售历史API
// ==========================================
pub struct SalesApi {
    store: Arc<CatalogStore>,
}

impl SalesApi {
    /// 创建新的 SalesApi 实例
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    /// 销售明细列表(过滤后按成交时间降序)
    pub async fn list_sales(&self, filter: &SalesFilter) -> ApiResult<Vec<SaleRecord>> {
        let mut records = self.store.sales().await?;

        records.retain(|r| filter.matches(r));
        records.sort_by(|a, b| b.sold_at.cmp(&a.sold_at));

        Ok(records)
    }

    /// 销售汇总(分析页数据源,聚合在内存中完成)
    pub async fn sales_summary(&self, filter: &SalesFilter) -> ApiResult<SalesSummary> {
        let records = self.list_sales(filter).await?;
        Ok(SalesSummary::from_records(&records))
    }
}
