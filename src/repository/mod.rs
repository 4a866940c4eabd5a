// ==========================================
// 服装零售POS系统 - 数据访问层
// ==========================================
// 职责: 封装远端数据服务(REST/JSON),归一化响应与错误
// 红线: 持久化属于远端服务,本层不落任何本地存储
// ==========================================

pub mod catalog_repo;
pub mod catalog_repo_impl;
pub mod error;

pub use catalog_repo::CatalogRepository;
pub use catalog_repo_impl::CatalogRepositoryImpl;
pub use error::{RepositoryError, RepositoryResult};
