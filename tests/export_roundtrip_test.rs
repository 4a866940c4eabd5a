// ==========================================
// 服装零售POS系统 - 导出/导入互逆性测试
// ==========================================
// 契约: 未改动的导出文件再导入 → 全部命中为更新,零新建零拒绝
// ==========================================


use pos_backoffice::api::{ImportApi, ProductApi, ProductFilter};
use pos_backoffice::config::ImportTunables;
use pos_backoffice::domain::catalog::SizeStock;
use pos_backoffice::domain::import::PassCondition;
use pos_backoffice::importer::row_parser::COL_SIZES_JSON;
use pos_backoffice::importer::{CsvParser, FileParser};
use pos_backoffice::repository::catalog_repo::CatalogRepository;
use pos_backoffice::store::CatalogStore;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use test_helpers::{product, MockCatalogRepository};

fn store_with_products(repo: &Arc<MockCatalogRepository>) -> Arc<CatalogStore> {
    Arc::new(CatalogStore::new(
        Arc::clone(repo) as Arc<dyn CatalogRepository>
    ))
}

#[tokio::test]
async fn test_reimport_of_unmodified_export_yields_all_updated() {
    let repo = Arc::new(MockCatalogRepository::with_base_catalog());
    {
        let mut products = repo.products.lock().unwrap();
        products.push(product("p1", "TS-001", "基础款T恤", 99.5));
        products.push(product("p2", "HD-010", "连帽卫衣", 199.0));
        products.push(product("p3", "JK-777", "牛仔外套", 399.0));
    }
    let store = store_with_products(&repo);

    // 导出当前目录
    let export_file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("创建临时文件失败");
    let exported = ProductApi::new(Arc::clone(&store))
        .export_products(&ProductFilter::default(), export_file.path())
        .await
        .expect("导出失败");
    assert_eq!(exported, 3);

    // 原样再导入
    let response = ImportApi::new(Arc::clone(&store), ImportTunables::default())
        .import_products(export_file.path())
        .await
        .expect("再导入失败");

    assert_eq!(response.condition, PassCondition::Success);
    assert_eq!(response.updated, 3);
    assert_eq!(response.inserted, 0);
    assert_eq!(response.rejected, 0);
    assert!(response.warnings.is_empty());
    assert_eq!(repo.update_calls.load(Ordering::SeqCst), 3);

    // 再导入后目录内容不变
    let products = repo.products.lock().unwrap();
    assert_eq!(products.len(), 3);
    let ts = products.iter().find(|p| p.code == "TS-001").unwrap();
    assert_eq!(ts.title, "基础款T恤");
    assert_eq!(
        ts.sizes,
        vec![
            SizeStock {
                size: "S".to_string(),
                stock: 2
            },
            SizeStock {
                size: "M".to_string(),
                stock: 5
            }
        ]
    );
}

#[tokio::test]
async fn test_structured_payload_roundtrips_byte_identical() {
    let repo = Arc::new(MockCatalogRepository::with_base_catalog());
    let payload = "[{\"size\":\"S\",\"stock\":2},{\"size\":\"One Size\",\"stock\":0}]";
    {
        let mut entry = product("p1", "TS-001", "基础款T恤", 99.5);
        entry.sizes = serde_json::from_str(payload).unwrap();
        repo.products.lock().unwrap().push(entry);
    }
    let store = store_with_products(&repo);

    let export_file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("创建临时文件失败");
    ProductApi::new(Arc::clone(&store))
        .export_products(&ProductFilter::default(), export_file.path())
        .await
        .expect("导出失败");

    // 导出文件中的结构化载荷与源载荷逐字节一致
    let rows = CsvParser.parse_to_rows(export_file.path()).expect("解析失败");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get(COL_SIZES_JSON).map(String::as_str), Some(payload));
}

#[tokio::test]
async fn test_export_respects_filter_and_sort() {
    let repo = Arc::new(MockCatalogRepository::with_base_catalog());
    {
        let mut products = repo.products.lock().unwrap();
        let mut hidden = product("p1", "TS-001", "下架T恤", 59.0);
        hidden.is_visible = false;
        products.push(hidden);
        products.push(product("p2", "TS-002", "基础款T恤", 99.5));
        products.push(product("p3", "TS-003", "印花T恤", 129.0));
    }
    let store = store_with_products(&repo);

    let export_file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("创建临时文件失败");
    let filter = ProductFilter {
        visible_only: true,
        sort_key: Some(pos_backoffice::domain::types::ProductSortKey::Price),
        sort_order: pos_backoffice::domain::types::SortOrder::Desc,
        ..ProductFilter::default()
    };
    let exported = ProductApi::new(Arc::clone(&store))
        .export_products(&filter, export_file.path())
        .await
        .expect("导出失败");

    // 每个商品恰好一行,且只含通过筛选的商品,顺序为当前排序
    assert_eq!(exported, 2);
    let rows = CsvParser.parse_to_rows(export_file.path()).expect("解析失败");
    assert_eq!(rows[0].get("Code").map(String::as_str), Some("TS-003"));
    assert_eq!(rows[1].get("Code").map(String::as_str), Some("TS-002"));
}

#[test]
fn test_export_headers_cover_import_required_columns() {
    for required in [
        "Title",
        "Code",
        "Price",
        "Category",
        "Manufacturer",
        "Image URL",
    ] {
        assert!(
            pos_backoffice::importer::EXPORT_HEADERS.contains(&required),
            "导出列缺少 {}",
            required
        );
    }
}
