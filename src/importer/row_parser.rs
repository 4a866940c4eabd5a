// ==========================================
// 服装零售POS系统 - 行校验器实现
// ==========================================
// 职责: 单行校验 → ProductRecord 或拒绝原因列表
// 红线: 纯函数,不触网,不抛异常;坏数据一律转为判别结果
// ==========================================

use crate::domain::catalog::{ProductRecord, SizeStock};
use crate::domain::import::{CatalogIndex, ImportRow};
use crate::importer::error::ImportError;
use crate::importer::product_importer_trait::{ParsedRow, RowParser as RowParserTrait};

// ===== 识别的列名 =====
pub const COL_TITLE: &str = "Title";
pub const COL_CODE: &str = "Code";
pub const COL_PRICE: &str = "Price";
pub const COL_CATEGORY: &str = "Category";
pub const COL_MANUFACTURER: &str = "Manufacturer";
pub const COL_IMAGE: &str = "Image URL";
pub const COL_SIZES_JSON: &str = "SizesStockJSON";
pub const COL_SIZES: &str = "Sizes";
pub const COL_STOCKS: &str = "Stocks";
pub const COL_VISIBLE: &str = "Is Visible";

/// 必填列(缺任一即拒绝,且不再做后续校验)
const REQUIRED_COLUMNS: [&str; 6] = [
    COL_TITLE,
    COL_CODE,
    COL_PRICE,
    COL_CATEGORY,
    COL_MANUFACTURER,
    COL_IMAGE,
];

/// 聚合库存列的候选列名(按此顺序取第一个非空者)
const TOTAL_STOCK_COLUMNS: [&str; 2] = ["TotalStock", "Stock"];

/// 可见性列的否定取值(解析为不可见)
const NEGATIVE_TOKENS: [&str; 3] = ["no", "false", "0"];

// ==========================================
// RowParserOptions - 行校验参数
// ==========================================
#[derive(Debug, Clone)]
pub struct RowParserOptions {
    /// 聚合库存策略合成的占位尺码名
    pub one_size_label: String,
    /// 可见性列的肯定取值(已转小写)
    pub affirmative_tokens: Vec<String>,
}

impl Default for RowParserOptions {
    fn default() -> Self {
        Self {
            one_size_label: "One Size".to_string(),
            affirmative_tokens: vec!["yes".to_string(), "true".to_string()],
        }
    }
}

// ==========================================
// RowParser - 行校验器
// ==========================================
pub struct RowParser {
    options: RowParserOptions,
}

impl RowParser {
    pub fn new(mut options: RowParserOptions) -> Self {
        // 肯定取值统一小写,匹配时行值同样小写
        options.affirmative_tokens = options
            .affirmative_tokens
            .iter()
            .map(|t| t.trim().to_lowercase())
            .collect();
        Self { options }
    }

    /// 取单元格文本(trim 后非空才算有值)
    fn get_cell<'a>(row: &'a ImportRow, column: &str) -> Option<&'a str> {
        row.get(column).map(|v| v.trim()).filter(|v| !v.is_empty())
    }

    /// 解析价格: 必须是有限正数
    fn parse_price(raw: &str) -> Result<f64, String> {
        match raw.parse::<f64>() {
            Ok(price) if price.is_finite() && price > 0.0 => Ok(price),
            _ => Err(ImportError::InvalidNumber {
                field: COL_PRICE.to_string(),
                value: raw.to_string(),
            }
            .to_string()),
        }
    }

    /// 尺码库存解析: 三种互斥策略,按优先级尝试
    ///
    /// 1. SizesStockJSON: 结构化载荷,解析失败或元素非法即拒绝
    /// 2. Sizes + Stocks: 平行逗号列表,按位配对;此策略内首个位置失败即止
    /// 3. TotalStock / Stock: 聚合数量,合成单个占位尺码
    ///
    /// 三者皆无 → 非致命警告,空尺码列表,行仍导入
    fn resolve_sizes(&self, row: &ImportRow) -> Result<(Vec<SizeStock>, Option<String>), String> {
        // 策略 1: 结构化载荷
        if let Some(raw) = Self::get_cell(row, COL_SIZES_JSON) {
            return self.parse_structured_sizes(raw).map(|sizes| (sizes, None));
        }

        // 策略 2: 平行列表
        let size_names = Self::get_cell(row, COL_SIZES);
        let stock_values = Self::get_cell(row, COL_STOCKS);
        if let (Some(names), Some(values)) = (size_names, stock_values) {
            return self
                .parse_parallel_sizes(names, values)
                .map(|sizes| (sizes, None));
        }

        // 策略 3: 聚合库存
        for column in TOTAL_STOCK_COLUMNS {
            if let Some(raw) = Self::get_cell(row, column) {
                return match raw.parse::<i64>() {
                    Ok(total) if total >= 0 => Ok((
                        vec![SizeStock {
                            size: self.options.one_size_label.clone(),
                            stock: total,
                        }],
                        None,
                    )),
                    _ => Err(ImportError::InvalidNumber {
                        field: column.to_string(),
                        value: raw.to_string(),
                    }
                    .to_string()),
                };
            }
        }

        // 三种策略均无数据: 非致命,零可售尺码导入
        Ok((
            Vec::new(),
            Some("未提供尺码库存数据,按零可售尺码导入".to_string()),
        ))
    }

    /// 策略 1: 结构化 JSON 载荷
    fn parse_structured_sizes(&self, raw: &str) -> Result<Vec<SizeStock>, String> {
        let sizes: Vec<SizeStock> = serde_json::from_str(raw).map_err(|e| {
            ImportError::MalformedSizePayload(format!("{} 解析失败: {}", COL_SIZES_JSON, e))
                .to_string()
        })?;

        for (idx, entry) in sizes.iter().enumerate() {
            if entry.size.trim().is_empty() {
                return Err(ImportError::MalformedSizePayload(format!(
                    "{} 第 {} 项尺码名为空",
                    COL_SIZES_JSON,
                    idx + 1
                ))
                .to_string());
            }
            if entry.stock < 0 {
                return Err(ImportError::MalformedSizePayload(format!(
                    "{} 第 {} 项库存为负: {}",
                    COL_SIZES_JSON,
                    idx + 1,
                    entry.stock
                ))
                .to_string());
            }
        }

        Ok(sizes)
    }

    /// 策略 2: 平行逗号列表,按位配对;首个位置失败即止
    fn parse_parallel_sizes(&self, names: &str, values: &str) -> Result<Vec<SizeStock>, String> {
        let name_list: Vec<&str> = names.split(',').map(str::trim).collect();
        let value_list: Vec<&str> = values.split(',').map(str::trim).collect();

        if name_list.len() != value_list.len() {
            return Err(ImportError::MalformedSizePayload(format!(
                "{} 与 {} 数量不一致: {} vs {}",
                COL_SIZES,
                COL_STOCKS,
                name_list.len(),
                value_list.len()
            ))
            .to_string());
        }

        let mut sizes = Vec::with_capacity(name_list.len());
        for (idx, (name, value)) in name_list.iter().zip(value_list.iter()).enumerate() {
            if name.is_empty() {
                return Err(ImportError::MalformedSizePayload(format!(
                    "{} 第 {} 项尺码名为空",
                    COL_SIZES,
                    idx + 1
                ))
                .to_string());
            }

            let stock = match value.parse::<i64>() {
                Ok(stock) if stock >= 0 => stock,
                _ => {
                    return Err(ImportError::InvalidNumber {
                        field: COL_STOCKS.to_string(),
                        value: value.to_string(),
                    }
                    .to_string())
                }
            };

            sizes.push(SizeStock {
                size: name.to_string(),
                stock,
            });
        }

        Ok(sizes)
    }

    /// 可见性解析
    ///
    /// - 肯定取值(yes/true,可配置) → 可见
    /// - 否定取值(no/false/0) → 不可见
    /// - 列缺失/空值/无法识别 → 可见(既定口径: 缺失此列是常态,缺省即可见)
    fn parse_visibility(&self, row: &ImportRow) -> bool {
        match Self::get_cell(row, COL_VISIBLE) {
            None => true,
            Some(raw) => {
                let lowered = raw.to_lowercase();
                if self.options.affirmative_tokens.iter().any(|t| *t == lowered) {
                    true
                } else if NEGATIVE_TOKENS.contains(&lowered.as_str()) {
                    false
                } else {
                    true
                }
            }
        }
    }
}

impl RowParserTrait for RowParser {
    fn parse_row(&self, row: &ImportRow, index: &CatalogIndex) -> Result<ParsedRow, Vec<String>> {
        // === 必填列检查(先行;缺任一即止,单条原因列出全部缺失列) ===
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| Self::get_cell(row, col).is_none())
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(vec![ImportError::MissingRequiredField {
                fields: missing.join(", "),
            }
            .to_string()]);
        }

        // 必填列已确认存在,此处取值不会落空
        let title = Self::get_cell(row, COL_TITLE).unwrap_or_default();
        let code = Self::get_cell(row, COL_CODE).unwrap_or_default();
        let price_raw = Self::get_cell(row, COL_PRICE).unwrap_or_default();
        let category_name = Self::get_cell(row, COL_CATEGORY).unwrap_or_default();
        let manufacturer_name = Self::get_cell(row, COL_MANUFACTURER).unwrap_or_default();
        let image = Self::get_cell(row, COL_IMAGE).unwrap_or_default();

        // === 累积校验(不在首个错误处截断) ===
        let mut reasons: Vec<String> = Vec::new();

        let category_id = match index.category_id(category_name) {
            Some(id) => Some(id.to_string()),
            None => {
                reasons.push(
                    ImportError::UnresolvedReference {
                        field: COL_CATEGORY.to_string(),
                        value: category_name.to_string(),
                    }
                    .to_string(),
                );
                None
            }
        };

        let manufacturer_id = match index.manufacturer_id(manufacturer_name) {
            Some(id) => Some(id.to_string()),
            None => {
                reasons.push(
                    ImportError::UnresolvedReference {
                        field: COL_MANUFACTURER.to_string(),
                        value: manufacturer_name.to_string(),
                    }
                    .to_string(),
                );
                None
            }
        };

        let price = match Self::parse_price(price_raw) {
            Ok(price) => Some(price),
            Err(reason) => {
                reasons.push(reason);
                None
            }
        };

        let sizes = match self.resolve_sizes(row) {
            Ok(resolved) => Some(resolved),
            Err(reason) => {
                reasons.push(reason);
                None
            }
        };

        let is_visible = self.parse_visibility(row);

        match (category_id, manufacturer_id, price, sizes) {
            (Some(category_id), Some(manufacturer_id), Some(price), Some((sizes, warning)))
                if reasons.is_empty() =>
            {
                Ok(ParsedRow {
                    record: ProductRecord {
                        title: title.to_string(),
                        code: code.to_string(),
                        price,
                        category_id,
                        manufacturer_id,
                        sizes,
                        image: image.to_string(),
                        is_visible,
                    },
                    warning,
                })
            }
            _ => Err(reasons),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Category, Manufacturer};
    use std::collections::HashMap;

    fn test_index() -> CatalogIndex {
        CatalogIndex::build(
            &[Category {
                id: "c1".to_string(),
                name: "T恤".to_string(),
            }],
            &[Manufacturer {
                id: "m1".to_string(),
                name: "North Wind".to_string(),
            }],
            &[],
        )
    }

    fn base_row() -> ImportRow {
        let mut row = HashMap::new();
        row.insert("Title".to_string(), "基础款T恤".to_string());
        row.insert("Code".to_string(), "TS-001".to_string());
        row.insert("Price".to_string(), "99.5".to_string());
        row.insert("Category".to_string(), "T恤".to_string());
        row.insert("Manufacturer".to_string(), "north wind".to_string());
        row.insert(
            "Image URL".to_string(),
            "https://img.example.com/ts-001.jpg".to_string(),
        );
        row
    }

    fn parser() -> RowParser {
        RowParser::new(RowParserOptions::default())
    }

    #[test]
    fn test_valid_row_with_structured_payload() {
        let mut row = base_row();
        row.insert(
            "SizesStockJSON".to_string(),
            "[{\"size\":\"S\",\"stock\":2},{\"size\":\"M\",\"stock\":0}]".to_string(),
        );

        let parsed = parser().parse_row(&row, &test_index()).expect("应当通过");
        assert_eq!(parsed.record.code, "TS-001");
        assert_eq!(parsed.record.category_id, "c1");
        assert_eq!(parsed.record.manufacturer_id, "m1");
        assert_eq!(parsed.record.sizes.len(), 2);
        assert_eq!(parsed.record.sizes[0].size, "S");
        assert!(parsed.warning.is_none());
        assert!(parsed.record.is_visible);
    }

    #[test]
    fn test_missing_required_fields_single_reason() {
        let mut row = base_row();
        row.remove("Price");
        row.insert("Category".to_string(), "".to_string());

        let reasons = parser().parse_row(&row, &test_index()).unwrap_err();

        // 单条原因列出全部缺失列,且不再做后续校验
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].contains("Price"));
        assert!(reasons[0].contains("Category"));
    }

    #[test]
    fn test_unresolved_references_accumulate() {
        let mut row = base_row();
        row.insert("Category".to_string(), "裤装".to_string());
        row.insert("Manufacturer".to_string(), "South Wind".to_string());
        row.insert("Price".to_string(), "-3".to_string());
        row.insert("Stock".to_string(), "5".to_string());

        let reasons = parser().parse_row(&row, &test_index()).unwrap_err();

        // 引用解析失败不截断,后续字段继续校验并累积
        assert_eq!(reasons.len(), 3);
        assert!(reasons[0].contains("裤装"));
        assert!(reasons[1].contains("South Wind"));
        assert!(reasons[2].contains("Price"));
    }

    #[test]
    fn test_structured_payload_takes_priority() {
        let mut row = base_row();
        row.insert(
            "SizesStockJSON".to_string(),
            "[{\"size\":\"S\",\"stock\":1}]".to_string(),
        );
        row.insert("Sizes".to_string(), "S,M".to_string());
        row.insert("Stocks".to_string(), "1,2".to_string());
        row.insert("Stock".to_string(), "10".to_string());

        let parsed = parser().parse_row(&row, &test_index()).expect("应当通过");
        assert_eq!(parsed.record.sizes.len(), 1);
    }

    #[test]
    fn test_malformed_structured_payload_rejects() {
        let mut row = base_row();
        row.insert("SizesStockJSON".to_string(), "not-json".to_string());

        let reasons = parser().parse_row(&row, &test_index()).unwrap_err();
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].contains("SizesStockJSON"));
    }

    #[test]
    fn test_structured_payload_negative_stock_rejects() {
        let mut row = base_row();
        row.insert(
            "SizesStockJSON".to_string(),
            "[{\"size\":\"S\",\"stock\":-1}]".to_string(),
        );

        let reasons = parser().parse_row(&row, &test_index()).unwrap_err();
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].contains("库存为负"));
    }

    #[test]
    fn test_parallel_lists_zip() {
        let mut row = base_row();
        row.insert("Sizes".to_string(), " S , M , L ".to_string());
        row.insert("Stocks".to_string(), "1, 2 ,3".to_string());

        let parsed = parser().parse_row(&row, &test_index()).expect("应当通过");
        assert_eq!(
            parsed
                .record
                .sizes
                .iter()
                .map(|s| (s.size.as_str(), s.stock))
                .collect::<Vec<_>>(),
            vec![("S", 1), ("M", 2), ("L", 3)]
        );
    }

    #[test]
    fn test_parallel_lists_length_mismatch_rejects() {
        let mut row = base_row();
        row.insert("Sizes".to_string(), "S,M,L".to_string());
        row.insert("Stocks".to_string(), "1,2".to_string());

        let reasons = parser().parse_row(&row, &test_index()).unwrap_err();
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].contains("3 vs 2"));
    }

    #[test]
    fn test_parallel_lists_negative_stock_rejects() {
        let mut row = base_row();
        row.insert("Sizes".to_string(), "S,M".to_string());
        row.insert("Stocks".to_string(), "1,-2".to_string());

        let reasons = parser().parse_row(&row, &test_index()).unwrap_err();
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].contains("-2"));
    }

    #[test]
    fn test_aggregate_stock_synthesizes_one_size() {
        let mut row = base_row();
        row.insert("TotalStock".to_string(), "7".to_string());

        let parsed = parser().parse_row(&row, &test_index()).expect("应当通过");
        assert_eq!(parsed.record.sizes.len(), 1);
        assert_eq!(parsed.record.sizes[0].size, "One Size");
        assert_eq!(parsed.record.sizes[0].stock, 7);
    }

    #[test]
    fn test_aggregate_stock_alternate_column() {
        let mut row = base_row();
        row.insert("Stock".to_string(), "3".to_string());

        let parsed = parser().parse_row(&row, &test_index()).expect("应当通过");
        assert_eq!(parsed.record.sizes[0].stock, 3);
    }

    #[test]
    fn test_no_size_data_warns_but_imports() {
        let row = base_row();

        let parsed = parser().parse_row(&row, &test_index()).expect("应当通过");
        assert!(parsed.record.sizes.is_empty());
        assert!(parsed.warning.is_some());
    }

    #[test]
    fn test_visibility_defaults_and_tokens() {
        let index = test_index();
        let p = parser();

        // 列缺失 → 可见
        let parsed = p.parse_row(&base_row(), &index).expect("应当通过");
        assert!(parsed.record.is_visible);

        // 肯定取值(大小写不敏感) → 可见
        let mut row = base_row();
        row.insert("Is Visible".to_string(), "YES".to_string());
        assert!(p.parse_row(&row, &index).unwrap().record.is_visible);

        // 否定取值 → 不可见
        row.insert("Is Visible".to_string(), "no".to_string());
        assert!(!p.parse_row(&row, &index).unwrap().record.is_visible);

        // 无法识别的取值 → 缺省可见
        row.insert("Is Visible".to_string(), "maybe".to_string());
        assert!(p.parse_row(&row, &index).unwrap().record.is_visible);
    }

    #[test]
    fn test_price_must_be_positive_number() {
        let index = test_index();
        let p = parser();

        for bad in ["abc", "0", "-1.5", "NaN", "inf"] {
            let mut row = base_row();
            row.insert("Price".to_string(), bad.to_string());
            row.insert("Stock".to_string(), "1".to_string());
            let reasons = p.parse_row(&row, &index).unwrap_err();
            assert_eq!(reasons.len(), 1, "price={}", bad);
            assert!(reasons[0].contains("Price"));
        }
    }
}
