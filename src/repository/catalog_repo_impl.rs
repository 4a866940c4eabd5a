// ==========================================
// 服装零售POS系统 - 目录数据访问实现 (REST)
// ==========================================
// 职责: 以 REST/JSON 访问远端数据服务;统一附加认证头与错误归一化
// 红线: 不做本地缓存(缓存由 store 层负责),不做业务校验
// ==========================================

use crate::config::ClientConfig;
use crate::domain::catalog::{Category, Manufacturer, Product, ProductRecord};
use crate::domain::sale::{NewSale, SaleRecord};
use crate::domain::user::{NewUser, User};
use crate::repository::catalog_repo::CatalogRepository;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::session::Session;
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

// ==========================================
// 远端错误响应体 {message, details?}
// ==========================================
#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    message: String,
    #[serde(default)]
    details: Option<serde_json::Value>,
}

/// 名称型载荷(类目/厂商 创建与改名)
#[derive(Debug, Serialize)]
struct NamePayload<'a> {
    name: &'a str,
}

// ==========================================
// CatalogRepositoryImpl - REST 实现
// ==========================================
pub struct CatalogRepositoryImpl {
    client: reqwest::Client,
    base_url: String,
    session: Session,
}

impl CatalogRepositoryImpl {
    /// 创建新的 CatalogRepositoryImpl 实例
    ///
    /// # 参数
    /// - config: 连接配置(地址/超时)
    /// - session: 会话对象(构造注入,不读全局状态)
    pub fn new(config: &ClientConfig, session: Session) -> RepositoryResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RepositoryError::InternalError(format!("创建 HTTP 客户端失败: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 附加认证头(匿名会话不加头,由远端决定是否放行)
    fn with_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// 归一化响应: 成功解码 JSON;失败解析错误体 {message, details?}
    async fn decode_json<T: DeserializeOwned>(&self, response: Response) -> RepositoryResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }
        Err(self.error_from_response(status, response).await)
    }

    /// 归一化无响应体的调用(DELETE 等)
    async fn expect_ok(&self, response: Response) -> RepositoryResult<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(self.error_from_response(status, response).await)
    }

    async fn error_from_response(&self, status: StatusCode, response: Response) -> RepositoryError {
        let raw = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ServiceErrorBody>(&raw) {
            Ok(body) => match body.details {
                Some(details) => format!("{} ({})", body.message, details),
                None => body.message,
            },
            // 非标准错误体: 保留原始文本便于排查
            Err(_) if !raw.trim().is_empty() => raw.trim().to_string(),
            Err(_) => status
                .canonical_reason()
                .unwrap_or("未知错误")
                .to_string(),
        };

        warn!(status = status.as_u16(), message = %message, "远端服务返回错误");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            RepositoryError::Unauthorized(message)
        } else {
            RepositoryError::Service {
                status: status.as_u16(),
                message,
            }
        }
    }

    /// 将 404 映射为 NotFound(带实体上下文)
    fn map_not_found(err: RepositoryError, entity: &str, id: &str) -> RepositoryError {
        match err {
            RepositoryError::Service { status: 404, .. } => RepositoryError::NotFound {
                entity: entity.to_string(),
                id: id.to_string(),
            },
            other => other,
        }
    }
}

#[async_trait]
impl CatalogRepository for CatalogRepositoryImpl {
    // ===== 类目 =====

    async fn get_categories(&self) -> RepositoryResult<Vec<Category>> {
        debug!("GET /categories");
        let response = self
            .with_auth(self.client.get(self.url("/categories")))
            .send()
            .await?;
        self.decode_json(response).await
    }

    async fn create_category(&self, name: &str) -> RepositoryResult<Category> {
        let response = self
            .with_auth(self.client.post(self.url("/categories")))
            .json(&NamePayload { name })
            .send()
            .await?;
        self.decode_json(response).await
    }

    async fn update_category(&self, id: &str, name: &str) -> RepositoryResult<Category> {
        let response = self
            .with_auth(self.client.put(self.url(&format!("/categories/{}", id))))
            .json(&NamePayload { name })
            .send()
            .await?;
        self.decode_json(response)
            .await
            .map_err(|e| Self::map_not_found(e, "category", id))
    }

    async fn delete_category(&self, id: &str) -> RepositoryResult<()> {
        let response = self
            .with_auth(self.client.delete(self.url(&format!("/categories/{}", id))))
            .send()
            .await?;
        self.expect_ok(response)
            .await
            .map_err(|e| Self::map_not_found(e, "category", id))
    }

    // ===== 厂商 =====

    async fn get_manufacturers(&self) -> RepositoryResult<Vec<Manufacturer>> {
        debug!("GET /manufacturers");
        let response = self
            .with_auth(self.client.get(self.url("/manufacturers")))
            .send()
            .await?;
        self.decode_json(response).await
    }

    async fn create_manufacturer(&self, name: &str) -> RepositoryResult<Manufacturer> {
        let response = self
            .with_auth(self.client.post(self.url("/manufacturers")))
            .json(&NamePayload { name })
            .send()
            .await?;
        self.decode_json(response).await
    }

    async fn update_manufacturer(&self, id: &str, name: &str) -> RepositoryResult<Manufacturer> {
        let response = self
            .with_auth(
                self.client
                    .put(self.url(&format!("/manufacturers/{}", id))),
            )
            .json(&NamePayload { name })
            .send()
            .await?;
        self.decode_json(response)
            .await
            .map_err(|e| Self::map_not_found(e, "manufacturer", id))
    }

    async fn delete_manufacturer(&self, id: &str) -> RepositoryResult<()> {
        let response = self
            .with_auth(
                self.client
                    .delete(self.url(&format!("/manufacturers/{}", id))),
            )
            .send()
            .await?;
        self.expect_ok(response)
            .await
            .map_err(|e| Self::map_not_found(e, "manufacturer", id))
    }

    // ===== 商品 =====

    async fn get_products_admin(&self) -> RepositoryResult<Vec<Product>> {
        debug!("GET /products/admin");
        let response = self
            .with_auth(self.client.get(self.url("/products/admin")))
            .send()
            .await?;
        self.decode_json(response).await
    }

    async fn insert_product(&self, record: &ProductRecord) -> RepositoryResult<Product> {
        debug!(code = %record.code, "POST /products");
        let response = self
            .with_auth(self.client.post(self.url("/products")))
            .json(record)
            .send()
            .await?;
        self.decode_json(response).await
    }

    async fn update_product(&self, id: &str, record: &ProductRecord) -> RepositoryResult<Product> {
        debug!(id = %id, code = %record.code, "PUT /products/:id");
        let response = self
            .with_auth(self.client.put(self.url(&format!("/products/{}", id))))
            .json(record)
            .send()
            .await?;
        self.decode_json(response)
            .await
            .map_err(|e| Self::map_not_found(e, "product", id))
    }

    async fn delete_product(&self, id: &str) -> RepositoryResult<()> {
        let response = self
            .with_auth(self.client.delete(self.url(&format!("/products/{}", id))))
            .send()
            .await?;
        self.expect_ok(response)
            .await
            .map_err(|e| Self::map_not_found(e, "product", id))
    }

    // ===== 销售记录 =====

    async fn get_sales(&self) -> RepositoryResult<Vec<SaleRecord>> {
        debug!("GET /sales");
        let response = self
            .with_auth(self.client.get(self.url("/sales")))
            .send()
            .await?;
        self.decode_json(response).await
    }

    async fn create_sale(&self, new_sale: &NewSale) -> RepositoryResult<SaleRecord> {
        debug!(code = %new_sale.code, quantity = new_sale.quantity, "POST /sales");
        let response = self
            .with_auth(self.client.post(self.url("/sales")))
            .json(new_sale)
            .send()
            .await?;
        self.decode_json(response).await
    }

    // ===== 用户 =====

    async fn get_users(&self) -> RepositoryResult<Vec<User>> {
        debug!("GET /users");
        let response = self
            .with_auth(self.client.get(self.url("/users")))
            .send()
            .await?;
        self.decode_json(response).await
    }

    async fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        let response = self
            .with_auth(self.client.post(self.url("/users")))
            .json(new_user)
            .send()
            .await?;
        self.decode_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = ClientConfig {
            base_url: "http://127.0.0.1:4000/".to_string(),
            timeout_secs: 5,
        };
        let repo = CatalogRepositoryImpl::new(&config, Session::new()).expect("创建仓储失败");

        assert_eq!(repo.url("/categories"), "http://127.0.0.1:4000/categories");
    }

    #[test]
    fn test_error_body_parsing() {
        let body: ServiceErrorBody =
            serde_json::from_str("{\"message\":\"code already exists\"}").unwrap();
        assert_eq!(body.message, "code already exists");
        assert!(body.details.is_none());
    }
}
