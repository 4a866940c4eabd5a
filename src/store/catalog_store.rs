// ==========================================
// 服装零售POS系统 - 目录缓存存储
// ==========================================
// 职责: 集合级内存缓存 + 显式失效契约
// 契约: 每类变更声明其失效的集合;读路径缺失时懒加载
// 红线: 不做"每次变更全量刷新";导入过程只在开始时取一次快照
// ==========================================

use crate::domain::catalog::{Category, Manufacturer, Product};
use crate::domain::sale::SaleRecord;
use crate::repository::catalog_repo::CatalogRepository;
use crate::repository::error::RepositoryResult;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

// ==========================================
// Collection - 可缓存集合标识
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Categories,
    Manufacturers,
    Products,
    Sales,
}

// ==========================================
// Mutation - 变更种类与失效契约
// ==========================================
// 契约即代码: 变更种类 → 需要失效的集合,集中声明,调用方不得自行挑选
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// 商品新建/更新/删除(含导入过程整体)
    ProductWrite,
    /// 类目新建/改名/删除(商品里引用了类目名,连带失效)
    CategoryWrite,
    /// 厂商新建/改名/删除(商品里引用了厂商名,连带失效)
    ManufacturerWrite,
    /// 结账写入销售记录(远端同步扣减库存,连带失效商品)
    SaleWrite,
}

impl Mutation {
    /// 该变更失效的集合清单
    pub fn invalidates(&self) -> &'static [Collection] {
        match self {
            Mutation::ProductWrite => &[Collection::Products],
            Mutation::CategoryWrite => &[Collection::Categories, Collection::Products],
            Mutation::ManufacturerWrite => &[Collection::Manufacturers, Collection::Products],
            Mutation::SaleWrite => &[Collection::Sales, Collection::Products],
        }
    }
}

// ==========================================
// CatalogStore - 集合缓存
// ==========================================
pub struct CatalogStore {
    repo: Arc<dyn CatalogRepository>,
    categories: RwLock<Option<Vec<Category>>>,
    manufacturers: RwLock<Option<Vec<Manufacturer>>>,
    products: RwLock<Option<Vec<Product>>>,
    sales: RwLock<Option<Vec<SaleRecord>>>,
}

impl CatalogStore {
    /// 创建新的 CatalogStore(全部集合为未加载态)
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self {
            repo,
            categories: RwLock::new(None),
            manufacturers: RwLock::new(None),
            products: RwLock::new(None),
            sales: RwLock::new(None),
        }
    }

    /// 底层数据通道(导入引擎需要直接发起顺序变更)
    pub fn repository(&self) -> Arc<dyn CatalogRepository> {
        Arc::clone(&self.repo)
    }

    /// 类目列表(缓存命中直接返回,否则拉取远端)
    pub async fn categories(&self) -> RepositoryResult<Vec<Category>> {
        if let Some(cached) = self.categories.read().await.as_ref() {
            return Ok(cached.clone());
        }

        let fresh = self.repo.get_categories().await?;
        debug!(count = fresh.len(), "类目集合已加载");
        *self.categories.write().await = Some(fresh.clone());
        Ok(fresh)
    }

    /// 厂商列表
    pub async fn manufacturers(&self) -> RepositoryResult<Vec<Manufacturer>> {
        if let Some(cached) = self.manufacturers.read().await.as_ref() {
            return Ok(cached.clone());
        }

        let fresh = self.repo.get_manufacturers().await?;
        debug!(count = fresh.len(), "厂商集合已加载");
        *self.manufacturers.write().await = Some(fresh.clone());
        Ok(fresh)
    }

    /// 商品列表(后台口径,含不可见商品)
    pub async fn products(&self) -> RepositoryResult<Vec<Product>> {
        if let Some(cached) = self.products.read().await.as_ref() {
            return Ok(cached.clone());
        }

        let fresh = self.repo.get_products_admin().await?;
        debug!(count = fresh.len(), "商品集合已加载");
        *self.products.write().await = Some(fresh.clone());
        Ok(fresh)
    }

    /// 销售记录列表
    pub async fn sales(&self) -> RepositoryResult<Vec<SaleRecord>> {
        if let Some(cached) = self.sales.read().await.as_ref() {
            return Ok(cached.clone());
        }

        let fresh = self.repo.get_sales().await?;
        debug!(count = fresh.len(), "销售记录集合已加载");
        *self.sales.write().await = Some(fresh.clone());
        Ok(fresh)
    }

    /// 按变更契约失效对应集合
    pub async fn apply_mutation(&self, mutation: Mutation) {
        self.invalidate(mutation.invalidates()).await;
    }

    /// 失效指定集合(下次读取时重新加载)
    pub async fn invalidate(&self, collections: &[Collection]) {
        for collection in collections {
            debug!(collection = ?collection, "缓存集合失效");
            match collection {
                Collection::Categories => *self.categories.write().await = None,
                Collection::Manufacturers => *self.manufacturers.write().await = None,
                Collection::Products => *self.products.write().await = None,
                Collection::Sales => *self.sales.write().await = None,
            }
        }
    }
}
