// ==========================================
// 服装零售POS系统 - 收银结账API
// ==========================================
// 职责: 购物车校验 + 逐行写入销售记录
// 红线: 全部行校验通过后才发起变更;写入严格串行
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::sale::{NewSale, SaleRecord};
use crate::store::{CatalogStore, Mutation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

// ==========================================
// CartLine - 购物车行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub size: String,
    pub quantity: i64,
}

// ==========================================
// CheckoutApi - 收银结账API
// ==========================================
pub struct CheckoutApi {
    store: Arc<CatalogStore>,
}

impl CheckoutApi {
    /// 创建新的 CheckoutApi 实例
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    /// 结账
    ///
    /// # 流程
    /// 1. 对照商品快照逐行校验(商品存在且可见/尺码存在/库存充足/数量为正)
    /// 2. 全部通过后逐行 POST /sales,严格串行
    /// 3. 失效销售与商品集合(远端在写入时扣减库存)
    ///
    /// # 返回
    /// - Ok(Vec<SaleRecord>): 已写入的销售记录(与购物车行一一对应)
    /// - Err(ApiError): 任一行校验失败,或远端写入失败
    ///   (远端失败时,之前已写入的行不回滚)
    pub async fn checkout(&self, cart: &[CartLine]) -> ApiResult<Vec<SaleRecord>> {
        if cart.is_empty() {
            return Err(ApiError::InvalidInput("购物车为空".to_string()));
        }

        let products = self.store.products().await?;

        // === 阶段 1: 先整体校验,任何一行不通过都不发起变更 ===
        let mut prepared: Vec<NewSale> = Vec::with_capacity(cart.len());
        for line in cart {
            if line.quantity <= 0 {
                return Err(ApiError::InvalidInput(format!(
                    "数量必须为正数: {}",
                    line.quantity
                )));
            }

            let product = products
                .iter()
                .find(|p| p.id == line.product_id)
                .ok_or_else(|| ApiError::NotFound(format!("商品不存在: {}", line.product_id)))?;

            if !product.is_visible {
                return Err(ApiError::InvalidInput(format!(
                    "商品已下架: {}",
                    product.code
                )));
            }

            let size = product
                .sizes
                .iter()
                .find(|s| s.size == line.size)
                .ok_or_else(|| {
                    ApiError::InvalidInput(format!("商品 {} 无尺码 {}", product.code, line.size))
                })?;

            if size.stock < line.quantity {
                return Err(ApiError::InvalidInput(format!(
                    "库存不足: {} 尺码 {} 剩余 {},需要 {}",
                    product.code, line.size, size.stock, line.quantity
                )));
            }

            prepared.push(NewSale {
                product_id: product.id.clone(),
                title: product.title.clone(),
                code: product.code.clone(),
                size: line.size.clone(),
                quantity: line.quantity,
                unit_price: product.price,
            });
        }

        // === 阶段 2: 逐行写入,严格串行 ===
        let repo = self.store.repository();
        let mut records: Vec<SaleRecord> = Vec::with_capacity(prepared.len());
        let mut failure: Option<ApiError> = None;
        for sale in &prepared {
            match repo.create_sale(sale).await {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(code = %sale.code, error = %e, "销售记录写入失败");
                    failure = Some(e.into());
                    break;
                }
            }
        }

        // 只要有行已写入就失效缓存,远端库存已被扣减
        if !records.is_empty() {
            self.store.apply_mutation(Mutation::SaleWrite).await;
        }

        if let Some(e) = failure {
            return Err(e);
        }

        info!(lines = records.len(), "结账完成");
        Ok(records)
    }

    /// 按商品快照计算购物车金额(行校验失败返回错误,与结账同口径)
    pub async fn cart_total(&self, cart: &[CartLine]) -> ApiResult<f64> {
        let products = self.store.products().await?;

        let mut total = 0.0;
        for line in cart {
            let product = products
                .iter()
                .find(|p| p.id == line.product_id)
                .ok_or_else(|| ApiError::NotFound(format!("商品不存在: {}", line.product_id)))?;
            total += product.price * line.quantity as f64;
        }
        Ok(total)
    }
}
