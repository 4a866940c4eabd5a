// ==========================================
// 服装零售POS系统 - 商品导出投影
// ==========================================
// 职责: 当前(已筛选排序的)商品列表 → 平面表格行
// 契约: 与导入互逆,未改动的导出文件再导入应全部命中为更新
// ==========================================

use crate::domain::catalog::{Category, Manufacturer, Product};
use crate::importer::error::ImportError;
use crate::importer::row_parser::{
    COL_CATEGORY, COL_CODE, COL_IMAGE, COL_MANUFACTURER, COL_PRICE, COL_SIZES_JSON, COL_TITLE,
    COL_VISIBLE,
};
use csv::Writer;
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// 导出列集(与导入识别列一致;尺码库存始终用结构化载荷列)
pub const EXPORT_HEADERS: [&str; 8] = [
    COL_TITLE,
    COL_CODE,
    COL_PRICE,
    COL_CATEGORY,
    COL_MANUFACTURER,
    COL_IMAGE,
    COL_SIZES_JSON,
    COL_VISIBLE,
];

// ==========================================
// ProductExporter - 导出投影器
// ==========================================
// 说明: 导入按名称解析类目/厂商,导出因此要把 id 还原为名称
pub struct ProductExporter {
    category_names: HashMap<String, String>,
    manufacturer_names: HashMap<String, String>,
}

impl ProductExporter {
    /// 创建新的 ProductExporter 实例
    ///
    /// # 参数
    /// - categories / manufacturers: 当前目录快照(id → 名称还原用)
    pub fn new(categories: &[Category], manufacturers: &[Manufacturer]) -> Self {
        let category_names = categories
            .iter()
            .map(|c| (c.id.clone(), c.name.clone()))
            .collect();
        let manufacturer_names = manufacturers
            .iter()
            .map(|m| (m.id.clone(), m.name.clone()))
            .collect();

        Self {
            category_names,
            manufacturer_names,
        }
    }

    /// 单个商品 → 一行(列顺序与 EXPORT_HEADERS 对齐)
    ///
    /// 引用失配(商品指向已不存在的类目/厂商)时写空值,
    /// 再导入会在该行报缺必填列,失配得以显式暴露。
    pub fn project_row(&self, product: &Product) -> Result<Vec<String>, ImportError> {
        let sizes_json = serde_json::to_string(&product.sizes)
            .map_err(|e| ImportError::InternalError(format!("尺码载荷序列化失败: {}", e)))?;

        Ok(vec![
            product.title.clone(),
            product.code.clone(),
            product.price.to_string(),
            self.category_names
                .get(&product.category_id)
                .cloned()
                .unwrap_or_default(),
            self.manufacturer_names
                .get(&product.manufacturer_id)
                .cloned()
                .unwrap_or_default(),
            product.image.clone(),
            sizes_json,
            if product.is_visible { "yes" } else { "no" }.to_string(),
        ])
    }

    /// 导出为 CSV 到任意 Writer
    pub fn write_csv<W: Write>(&self, products: &[Product], writer: W) -> Result<(), ImportError> {
        let mut csv_writer = Writer::from_writer(writer);

        csv_writer.write_record(EXPORT_HEADERS)?;
        for product in products {
            csv_writer.write_record(self.project_row(product)?)?;
        }
        csv_writer.flush()?;

        Ok(())
    }

    /// 导出为 CSV 文件
    pub fn export_to_path(&self, products: &[Product], path: &Path) -> Result<(), ImportError> {
        let file = File::create(path)?;
        self.write_csv(products, file)?;

        info!(count = products.len(), path = %path.display(), "商品导出完成");
        Ok(())
    }
}
