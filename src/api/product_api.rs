// ==========================================
// 服装零售POS系统 - 商品管理API
// ==========================================
// 职责: 商品列表(本地筛选/排序/搜索)与增删改,以及导出入口
// 红线: 列表操作在内存快照上进行,不向远端下发查询条件
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::catalog::{Product, ProductRecord};
use crate::domain::types::{ProductSortKey, SortOrder};
use crate::importer::ProductExporter;
use crate::store::{CatalogStore, Mutation};
use std::cmp::Ordering;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

// ==========================================
// ProductFilter - 列表筛选与排序条件
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// 按类目ID过滤
    pub category_id: Option<String>,
    /// 按厂商ID过滤
    pub manufacturer_id: Option<String>,
    /// 仅前台可见商品
    pub visible_only: bool,
    /// 名称/货号子串搜索(大小写不敏感)
    pub search: Option<String>,
    /// 排序键(None 保持远端返回顺序)
    pub sort_key: Option<ProductSortKey>,
    /// 排序方向
    pub sort_order: SortOrder,
}

// ==========================================
// ProductApi - 商品管理API
// ==========================================
pub struct ProductApi {
    store: Arc<CatalogStore>,
}

impl ProductApi {
    /// 创建新的 ProductApi 实例
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    /// 商品列表: 缓存快照 → 本地筛选 → 本地排序
    pub async fn list_products(&self, filter: &ProductFilter) -> ApiResult<Vec<Product>> {
        let mut products = self.store.products().await?;

        products.retain(|p| Self::matches(p, filter));

        if let Some(key) = filter.sort_key {
            products.sort_by(|a, b| {
                let ordering = match key {
                    ProductSortKey::Title => a.title.cmp(&b.title),
                    ProductSortKey::Code => a.code.cmp(&b.code),
                    ProductSortKey::Price => {
                        a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal)
                    }
                };
                match filter.sort_order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }

        Ok(products)
    }

    /// 新建商品
    pub async fn create_product(&self, record: &ProductRecord) -> ApiResult<Product> {
        Self::validate(record)?;

        let product = self.store.repository().insert_product(record).await?;
        self.store.apply_mutation(Mutation::ProductWrite).await;

        info!(code = %product.code, "商品已新建");
        Ok(product)
    }

    /// 更新商品
    pub async fn update_product(&self, id: &str, record: &ProductRecord) -> ApiResult<Product> {
        Self::validate(record)?;

        let product = self.store.repository().update_product(id, record).await?;
        self.store.apply_mutation(Mutation::ProductWrite).await;

        info!(id = %id, code = %product.code, "商品已更新");
        Ok(product)
    }

    /// 删除商品
    pub async fn delete_product(&self, id: &str) -> ApiResult<()> {
        self.store.repository().delete_product(id).await?;
        self.store.apply_mutation(Mutation::ProductWrite).await;

        info!(id = %id, "商品已删除");
        Ok(())
    }

    /// 导出当前筛选排序结果为 CSV 文件
    ///
    /// # 返回
    /// - Ok(usize): 导出的商品行数
    pub async fn export_products(&self, filter: &ProductFilter, path: &Path) -> ApiResult<usize> {
        let products = self.list_products(filter).await?;
        let categories = self.store.categories().await?;
        let manufacturers = self.store.manufacturers().await?;

        let exporter = ProductExporter::new(&categories, &manufacturers);
        exporter.export_to_path(&products, path)?;

        Ok(products.len())
    }

    fn matches(product: &Product, filter: &ProductFilter) -> bool {
        if let Some(category_id) = &filter.category_id {
            if &product.category_id != category_id {
                return false;
            }
        }
        if let Some(manufacturer_id) = &filter.manufacturer_id {
            if &product.manufacturer_id != manufacturer_id {
                return false;
            }
        }
        if filter.visible_only && !product.is_visible {
            return false;
        }
        if let Some(search) = &filter.search {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty()
                && !product.title.to_lowercase().contains(&needle)
                && !product.code.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }

    fn validate(record: &ProductRecord) -> ApiResult<()> {
        if record.title.trim().is_empty() {
            return Err(ApiError::InvalidInput("商品名称不能为空".to_string()));
        }
        if record.code.trim().is_empty() {
            return Err(ApiError::InvalidInput("货号不能为空".to_string()));
        }
        if !(record.price.is_finite() && record.price > 0.0) {
            return Err(ApiError::InvalidInput(format!(
                "售价必须为正数: {}",
                record.price
            )));
        }
        if record.sizes.iter().any(|s| s.stock < 0) {
            return Err(ApiError::InvalidInput("库存不能为负数".to_string()));
        }
        Ok(())
    }
}
