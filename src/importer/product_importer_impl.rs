// ==========================================
// 服装零售POS系统 - 商品导入对账引擎实现
// ==========================================
// 职责: 整合导入流程,从文件到远端目录
// 流程: 解析 → 建索引 → 逐行校验 → 按货号对账 → 串行变更 → 汇总
// 红线: 行级失败不中断过程;变更严格串行;索引过程内只读
// ==========================================

use crate::config::ImportConfigReader;
use crate::domain::import::{
    CatalogIndex, ImportReport, ImportRow, ReconciliationOutcome, RowOutcome, RowWarning,
};
use crate::importer::error::ImportError;
use crate::importer::product_importer_trait::{
    FileParser, ParsedRow, ProductImporter, RowParser,
};
use crate::importer::row_parser::COL_CODE;
use crate::repository::catalog_repo::CatalogRepository;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// ProductImporterImpl - 商品导入对账引擎
// ==========================================
pub struct ProductImporterImpl<C>
where
    C: ImportConfigReader,
{
    // 数据访问层(变更通道)
    repo: Arc<dyn CatalogRepository>,

    // 配置读取器
    config: C,

    // 导入组件
    file_parser: Box<dyn FileParser>,
    row_parser: Box<dyn RowParser>,
}

impl<C> ProductImporterImpl<C>
where
    C: ImportConfigReader,
{
    /// 创建新的 ProductImporterImpl 实例
    ///
    /// # 参数
    /// - repo: 目录数据仓储
    /// - config: 导入配置读取器
    /// - file_parser: 文件解析器
    /// - row_parser: 行校验器
    pub fn new(
        repo: Arc<dyn CatalogRepository>,
        config: C,
        file_parser: Box<dyn FileParser>,
        row_parser: Box<dyn RowParser>,
    ) -> Self {
        Self {
            repo,
            config,
            file_parser,
            row_parser,
        }
    }

    /// 构建本次过程的目录快照索引(整个过程只构建一次)
    async fn build_index(&self) -> Result<CatalogIndex, ImportError> {
        let categories = self
            .repo
            .get_categories()
            .await
            .map_err(|e| ImportError::ServiceError(format!("获取类目快照失败: {}", e)))?;
        let manufacturers = self
            .repo
            .get_manufacturers()
            .await
            .map_err(|e| ImportError::ServiceError(format!("获取厂商快照失败: {}", e)))?;
        let products = self
            .repo
            .get_products_admin()
            .await
            .map_err(|e| ImportError::ServiceError(format!("获取商品快照失败: {}", e)))?;

        debug!(
            categories = categories.len(),
            manufacturers = manufacturers.len(),
            products = products.len(),
            "目录快照索引构建完成"
        );

        Ok(CatalogIndex::build(&categories, &manufacturers, &products))
    }

    /// 取原始行中的货号(用于拒绝行的结果标注)
    fn raw_code(row: &ImportRow) -> Option<String> {
        row.get(COL_CODE)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(String::from)
    }
}

#[async_trait::async_trait]
impl<C> ProductImporter for ProductImporterImpl<C>
where
    C: ImportConfigReader + Send + Sync,
{
    #[instrument(skip(self, file_path))]
    async fn import_from_file(&self, file_path: &Path) -> Result<ImportReport, ImportError> {
        let file_path_str = file_path.display().to_string();
        info!(file_path = %file_path_str, "开始解析导入文件");

        // === 阶段 0: 文件解析(不可读即整体失败,区别于逐行拒绝) ===
        let rows = self.file_parser.parse_to_rows(file_path)?;
        info!(total_rows = rows.len(), "文件解析完成");

        self.reconcile_rows(rows).await
    }

    #[instrument(skip(self, rows), fields(batch_id))]
    async fn reconcile_rows(&self, rows: Vec<ImportRow>) -> Result<ImportReport, ImportError> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        let total_rows = rows.len();
        info!(batch_id = %batch_id, total_rows = total_rows, "开始商品对账过程");

        // === 阶段 1: 行数上限检查 ===
        let max_rows = self
            .config
            .get_max_rows()
            .await
            .map_err(|e| ImportError::ConfigReadError(e.to_string()))?;
        if total_rows > max_rows {
            return Err(ImportError::TooManyRows {
                actual: total_rows,
                max: max_rows,
            });
        }

        // === 阶段 2: 构建目录快照索引(过程内只读,不随变更增量维护) ===
        let index = self.build_index().await?;

        // === 阶段 3: 逐行校验 + 按货号对账,变更严格串行 ===
        let mut outcomes: Vec<RowOutcome> = Vec::with_capacity(total_rows);
        let mut warnings: Vec<RowWarning> = Vec::new();
        let mut inserted = 0usize;
        let mut updated = 0usize;
        let mut rejected = 0usize;

        for (idx, row) in rows.iter().enumerate() {
            // 数据行下标 i (0 起) 报告为 i + 2,补偿表头行
            let row_number = idx + 2;

            let parsed = match self.row_parser.parse_row(row, &index) {
                Ok(parsed) => parsed,
                Err(reasons) => {
                    // 校验失败: 拒绝,不触网
                    warn!(row_number = row_number, reasons = ?reasons, "行校验失败");
                    rejected += 1;
                    outcomes.push(RowOutcome {
                        row_number,
                        code: Self::raw_code(row),
                        outcome: ReconciliationOutcome::Rejected { reasons },
                    });
                    continue;
                }
            };

            let ParsedRow { record, warning } = parsed;
            if let Some(message) = warning {
                warnings.push(RowWarning {
                    row_number,
                    message,
                });
            }

            // 货号命中既有商品 → 更新;未命中 → 新建。
            // 索引是过程开始时的静态快照: 同批两行相同的新货号会各自尝试新建,
            // 第二行不会自动转为对第一行的更新(既定口径,见 DESIGN.md)。
            let outcome = match index.product_by_code(&record.code) {
                Some(existing) => match self.repo.update_product(&existing.id, &record).await {
                    Ok(_) => {
                        updated += 1;
                        ReconciliationOutcome::Updated
                    }
                    Err(e) => {
                        // 远端失败转为该行拒绝,不中断后续行
                        warn!(row_number = row_number, code = %record.code, error = %e, "更新商品失败");
                        rejected += 1;
                        ReconciliationOutcome::Rejected {
                            reasons: vec![ImportError::ServiceError(e.to_string()).to_string()],
                        }
                    }
                },
                None => match self.repo.insert_product(&record).await {
                    Ok(_) => {
                        inserted += 1;
                        ReconciliationOutcome::Inserted
                    }
                    Err(e) => {
                        warn!(row_number = row_number, code = %record.code, error = %e, "新建商品失败");
                        rejected += 1;
                        ReconciliationOutcome::Rejected {
                            reasons: vec![ImportError::ServiceError(e.to_string()).to_string()],
                        }
                    }
                },
            };

            outcomes.push(RowOutcome {
                row_number,
                code: Some(record.code),
                outcome,
            });
        }

        // === 阶段 4: 汇总 ===
        let rejection_details: Vec<String> = outcomes
            .iter()
            .filter_map(|o| match &o.outcome {
                ReconciliationOutcome::Rejected { reasons } => {
                    Some(format!("第 {} 行: {}", o.row_number, reasons.join("; ")))
                }
                _ => None,
            })
            .collect();

        let condition = ImportReport::derive_condition(total_rows, inserted + updated, rejected);
        let elapsed_ms = start_time.elapsed().as_millis() as i64;

        info!(
            batch_id = %batch_id,
            condition = %condition,
            inserted = inserted,
            updated = updated,
            rejected = rejected,
            warnings = warnings.len(),
            elapsed_ms = elapsed_ms,
            "商品对账过程完成"
        );

        Ok(ImportReport {
            batch_id,
            condition,
            total_rows,
            inserted,
            updated,
            rejected,
            outcomes,
            warnings,
            rejection_details,
            elapsed_ms,
        })
    }
}
