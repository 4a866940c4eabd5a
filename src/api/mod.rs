// ==========================================
// 服装零售POS系统 - 操作层 (业务接口)
// ==========================================
// 职责: 面向后台各页面的操作入口;组合缓存、仓储与导入引擎
// 红线: 不含渲染/路由逻辑
// ==========================================

pub mod catalog_api;
pub mod checkout_api;
pub mod error;
pub mod import_api;
pub mod product_api;
pub mod sales_api;
pub mod user_api;

pub use catalog_api::CatalogApi;
pub use checkout_api::{CartLine, CheckoutApi};
pub use error::{ApiError, ApiResult};
pub use import_api::{ImportApi, ImportApiResponse};
pub use product_api::{ProductApi, ProductFilter};
pub use sales_api::{SalesApi, SalesFilter};
pub use user_api::UserApi;
