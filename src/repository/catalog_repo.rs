// ==========================================
// 服装零售POS系统 - 目录数据访问接口
// ==========================================
// 职责: 定义远端数据服务的访问接口(不包含实现)
// 实现者: CatalogRepositoryImpl (REST) / 测试 Mock
// ==========================================

use crate::domain::catalog::{Category, Manufacturer, Product, ProductRecord};
use crate::domain::sale::{NewSale, SaleRecord};
use crate::domain::user::{NewUser, User};
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// CatalogRepository Trait
// ==========================================
// 用途: 后台各操作层与导入引擎的唯一数据通道
// 红线: 调用方不得绕过此接口直接发起 HTTP 请求
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    // ===== 类目 =====

    /// GET /categories
    async fn get_categories(&self) -> RepositoryResult<Vec<Category>>;

    /// POST /categories
    async fn create_category(&self, name: &str) -> RepositoryResult<Category>;

    /// PUT /categories/:id
    async fn update_category(&self, id: &str, name: &str) -> RepositoryResult<Category>;

    /// DELETE /categories/:id
    async fn delete_category(&self, id: &str) -> RepositoryResult<()>;

    // ===== 厂商 =====

    /// GET /manufacturers
    async fn get_manufacturers(&self) -> RepositoryResult<Vec<Manufacturer>>;

    /// POST /manufacturers
    async fn create_manufacturer(&self, name: &str) -> RepositoryResult<Manufacturer>;

    /// PUT /manufacturers/:id
    async fn update_manufacturer(&self, id: &str, name: &str) -> RepositoryResult<Manufacturer>;

    /// DELETE /manufacturers/:id
    async fn delete_manufacturer(&self, id: &str) -> RepositoryResult<()>;

    // ===== 商品 =====

    /// GET /products/admin (后台完整记录,含不可见商品)
    async fn get_products_admin(&self) -> RepositoryResult<Vec<Product>>;

    /// POST /products (新建)
    async fn insert_product(&self, record: &ProductRecord) -> RepositoryResult<Product>;

    /// PUT /products/:id (按既有商品 id 更新)
    async fn update_product(&self, id: &str, record: &ProductRecord) -> RepositoryResult<Product>;

    /// DELETE /products/:id
    async fn delete_product(&self, id: &str) -> RepositoryResult<()>;

    // ===== 销售记录 =====

    /// GET /sales
    async fn get_sales(&self) -> RepositoryResult<Vec<SaleRecord>>;

    /// POST /sales (结账逐行写入)
    async fn create_sale(&self, new_sale: &NewSale) -> RepositoryResult<SaleRecord>;

    // ===== 用户 =====

    /// GET /users
    async fn get_users(&self) -> RepositoryResult<Vec<User>>;

    /// POST /users
    async fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
}
