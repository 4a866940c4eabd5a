// ==========================================
// 服装零售POS系统 - 类目/厂商管理API
// ==========================================
// 职责: 类目与厂商的列表和增删改
// 契约: 改名/删除连带失效商品集合(商品行引用名称展示)
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::catalog::{Category, Manufacturer};
use crate::store::{CatalogStore, Mutation};
use std::sync::Arc;
use tracing::info;

// ==========================================
// CatalogApi - 类目/厂商管理API
// ==========================================
pub struct CatalogApi {
    store: Arc<CatalogStore>,
}

impl CatalogApi {
    /// 创建新的 CatalogApi 实例
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    // ===== 类目 =====

    /// 类目列表(名称升序)
    pub async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        let mut categories = self.store.categories().await?;
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    /// 新建类目
    pub async fn create_category(&self, name: &str) -> ApiResult<Category> {
        let name = Self::validate_name(name)?;

        let category = self.store.repository().create_category(name).await?;
        self.store.apply_mutation(Mutation::CategoryWrite).await;

        info!(name = %category.name, "类目已新建");
        Ok(category)
    }

    /// 类目改名
    pub async fn rename_category(&self, id: &str, name: &str) -> ApiResult<Category> {
        let name = Self::validate_name(name)?;

        let category = self.store.repository().update_category(id, name).await?;
        self.store.apply_mutation(Mutation::CategoryWrite).await;

        info!(id = %id, name = %category.name, "类目已改名");
        Ok(category)
    }

    /// 删除类目
    pub async fn delete_category(&self, id: &str) -> ApiResult<()> {
        self.store.repository().delete_category(id).await?;
        self.store.apply_mutation(Mutation::CategoryWrite).await;

        info!(id = %id, "类目已删除");
        Ok(())
    }

    // ===== 厂商 =====

    /// 厂商列表(名称升序)
    pub async fn list_manufacturers(&self) -> ApiResult<Vec<Manufacturer>> {
        let mut manufacturers = self.store.manufacturers().await?;
        manufacturers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(manufacturers)
    }

    /// 新建厂商
    pub async fn create_manufacturer(&self, name: &str) -> ApiResult<Manufacturer> {
        let name = Self::validate_name(name)?;

        let manufacturer = self.store.repository().create_manufacturer(name).await?;
        self.store.apply_mutation(Mutation::ManufacturerWrite).await;

        info!(name = %manufacturer.name, "厂商已新建");
        Ok(manufacturer)
    }

    /// 厂商改名
    pub async fn rename_manufacturer(&self, id: &str, name: &str) -> ApiResult<Manufacturer> {
        let name = Self::validate_name(name)?;

        let manufacturer = self.store.repository().update_manufacturer(id, name).await?;
        self.store.apply_mutation(Mutation::ManufacturerWrite).await;

        info!(id = %id, name = %manufacturer.name, "厂商已改名");
        Ok(manufacturer)
    }

    /// 删除厂商
    pub async fn delete_manufacturer(&self, id: &str) -> ApiResult<()> {
        self.store.repository().delete_manufacturer(id).await?;
        self.store.apply_mutation(Mutation::ManufacturerWrite).await;

        info!(id = %id, "厂商已删除");
        Ok(())
    }

    fn validate_name(name: &str) -> ApiResult<&str> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ApiError::InvalidInput("名称不能为空".to_string()));
        }
        Ok(trimmed)
    }
}
