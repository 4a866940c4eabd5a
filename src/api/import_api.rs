// ==========================================
// 服装零售POS系统 - 商品导入API
// ==========================================
// 职责: 封装一次完整对账过程的装配与调用
// ==========================================

use crate::api::error::ApiResult;
use crate::config::{ImportConfigManager, ImportConfigReader, ImportTunables};
use crate::domain::import::{PassCondition, RowWarning};
use crate::importer::error::ImportError;
use crate::importer::row_parser::{RowParser, RowParserOptions};
use crate::importer::{ProductImporter, ProductImporterImpl, UniversalFileParser};
use crate::store::{CatalogStore, Mutation};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

// ==========================================
// ImportApiResponse - 导入API响应
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportApiResponse {
    /// 新建的商品数量
    pub inserted: usize,
    /// 更新的商品数量
    pub updated: usize,
    /// 被拒绝的行数
    pub rejected: usize,
    /// 数据行总数(不含表头)
    pub total_rows: usize,
    /// 批次ID(用于日志追溯)
    pub batch_id: String,
    /// 整体结论
    pub condition: PassCondition,
    /// 非致命警告明细
    pub warnings: Vec<RowWarning>,
    /// 拒绝明细(行序)
    pub rejection_details: Vec<String>,
    /// 导入耗时(毫秒)
    pub elapsed_ms: i64,
}

// ==========================================
// ImportApi - 导入API
// ==========================================
pub struct ImportApi {
    store: Arc<CatalogStore>,
    tunables: ImportTunables,
}

impl ImportApi {
    /// 创建新的 ImportApi 实例
    pub fn new(store: Arc<CatalogStore>, tunables: ImportTunables) -> Self {
        Self { store, tunables }
    }

    /// 导入商品数据(一次完整对账过程)
    ///
    /// # 参数
    /// - file_path: 表格文件路径(.csv / .xlsx)
    ///
    /// # 返回
    /// - Ok(ImportApiResponse): 对账汇总(逐行失败在明细中,不算整体失败)
    /// - Err(ApiError): 文件不可读/行数超限等整体失败
    pub async fn import_products(&self, file_path: &Path) -> ApiResult<ImportApiResponse> {
        let importer = self.create_importer().await?;

        let report = importer.import_from_file(file_path).await?;

        // 缓存契约: 对账过程对商品集合整体失效一次,而非逐行失效
        self.store.apply_mutation(Mutation::ProductWrite).await;

        Ok(ImportApiResponse {
            inserted: report.inserted,
            updated: report.updated,
            rejected: report.rejected,
            total_rows: report.total_rows,
            batch_id: report.batch_id,
            condition: report.condition,
            warnings: report.warnings,
            rejection_details: report.rejection_details,
            elapsed_ms: report.elapsed_ms,
        })
    }

    /// 装配导入引擎(每次调用新建,配置在过程开始时读取一次)
    async fn create_importer(&self) -> ApiResult<ProductImporterImpl<ImportConfigManager>> {
        let config = ImportConfigManager::new(self.tunables.clone());

        let options = RowParserOptions {
            one_size_label: config
                .get_one_size_label()
                .await
                .map_err(|e| ImportError::ConfigReadError(e.to_string()))?,
            affirmative_tokens: config
                .get_affirmative_tokens()
                .await
                .map_err(|e| ImportError::ConfigReadError(e.to_string()))?,
        };

        Ok(ProductImporterImpl::new(
            self.store.repository(),
            config,
            Box::new(UniversalFileParser),
            Box::new(RowParser::new(options)),
        ))
    }
}
