// ==========================================
// 服装零售POS系统 - 操作层集成测试
// ==========================================
// 覆盖: 本地筛选/排序/搜索 + 缓存失效契约 + 销售汇总
// ==========================================


use chrono::{TimeZone, Utc};
use pos_backoffice::api::{
    ApiError, CartLine, CatalogApi, CheckoutApi, ProductApi, ProductFilter, SalesApi, SalesFilter,
};
use pos_backoffice::domain::sale::SaleRecord;
use pos_backoffice::domain::types::{ProductSortKey, SortOrder};
use pos_backoffice::repository::catalog_repo::CatalogRepository;
use pos_backoffice::store::CatalogStore;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use test_helpers::{product, MockCatalogRepository};

fn setup() -> (Arc<MockCatalogRepository>, Arc<CatalogStore>) {
    let repo = Arc::new(MockCatalogRepository::with_base_catalog());
    {
        let mut products = repo.products.lock().unwrap();
        products.push(product("p1", "TS-001", "基础款T恤", 99.5));
        let mut hoodie = product("p2", "HD-010", "连帽卫衣", 199.0);
        hoodie.category_id = "c2".to_string();
        products.push(hoodie);
        let mut hidden = product("p3", "TS-099", "下架T恤", 49.0);
        hidden.is_visible = false;
        products.push(hidden);
    }
    let store = Arc::new(CatalogStore::new(
        Arc::clone(&repo) as Arc<dyn CatalogRepository>
    ));
    (repo, store)
}

// ==========================================
// 本地筛选/排序/搜索
// ==========================================

#[tokio::test]
async fn test_filter_by_category_and_visibility() {
    let (_repo, store) = setup();
    let api = ProductApi::new(store);

    let by_category = api
        .list_products(&ProductFilter {
            category_id: Some("c1".to_string()),
            ..ProductFilter::default()
        })
        .await
        .expect("列表失败");
    assert_eq!(by_category.len(), 2);

    let visible_only = api
        .list_products(&ProductFilter {
            category_id: Some("c1".to_string()),
            visible_only: true,
            ..ProductFilter::default()
        })
        .await
        .expect("列表失败");
    assert_eq!(visible_only.len(), 1);
    assert_eq!(visible_only[0].code, "TS-001");
}

#[tokio::test]
async fn test_search_matches_title_and_code_case_insensitively() {
    let (_repo, store) = setup();
    let api = ProductApi::new(store);

    let by_title = api
        .list_products(&ProductFilter {
            search: Some("卫衣".to_string()),
            ..ProductFilter::default()
        })
        .await
        .expect("列表失败");
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].code, "HD-010");

    let by_code = api
        .list_products(&ProductFilter {
            search: Some("ts-0".to_string()),
            ..ProductFilter::default()
        })
        .await
        .expect("列表失败");
    assert_eq!(by_code.len(), 2);
}

#[tokio::test]
async fn test_sort_by_price_desc() {
    let (_repo, store) = setup();
    let api = ProductApi::new(store);

    let sorted = api
        .list_products(&ProductFilter {
            sort_key: Some(ProductSortKey::Price),
            sort_order: SortOrder::Desc,
            ..ProductFilter::default()
        })
        .await
        .expect("列表失败");

    let prices: Vec<f64> = sorted.iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![199.0, 99.5, 49.0]);
}

// ==========================================
// 缓存失效契约
// ==========================================

#[tokio::test]
async fn test_repeated_reads_hit_cache() {
    let (repo, store) = setup();
    let api = ProductApi::new(store);

    for _ in 0..3 {
        api.list_products(&ProductFilter::default())
            .await
            .expect("列表失败");
    }

    // 三次列表只触发一次远端拉取
    assert_eq!(repo.product_fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_product_write_invalidates_products_only() {
    let (repo, store) = setup();
    let api = ProductApi::new(Arc::clone(&store));

    // 预热两类缓存
    api.list_products(&ProductFilter::default())
        .await
        .expect("列表失败");
    store.categories().await.expect("类目失败");

    let record = product("ignored", "NEW-1", "新款T恤", 159.0).to_record();
    api.create_product(&record).await.expect("新建失败");

    // 商品集合失效 → 重新拉取;类目集合不受影响
    let listed = api
        .list_products(&ProductFilter::default())
        .await
        .expect("列表失败");
    assert_eq!(listed.len(), 4);
    assert_eq!(repo.product_fetches.load(Ordering::SeqCst), 2);

    store.categories().await.expect("类目失败");
    assert_eq!(repo.category_fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_category_rename_invalidates_products_too() {
    let (repo, store) = setup();
    let products_api = ProductApi::new(Arc::clone(&store));
    let catalog_api = CatalogApi::new(Arc::clone(&store));

    products_api
        .list_products(&ProductFilter::default())
        .await
        .expect("列表失败");
    catalog_api.list_categories().await.expect("类目失败");

    catalog_api
        .rename_category("c1", "短袖T恤")
        .await
        .expect("改名失败");

    // 类目与商品集合都重新拉取
    catalog_api.list_categories().await.expect("类目失败");
    products_api
        .list_products(&ProductFilter::default())
        .await
        .expect("列表失败");
    assert_eq!(repo.category_fetches.load(Ordering::SeqCst), 2);
    assert_eq!(repo.product_fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_create_product_validation_rejects_bad_input() {
    let (_repo, store) = setup();
    let api = ProductApi::new(store);

    let mut record = product("ignored", "NEW-1", "新款T恤", 159.0).to_record();
    record.price = 0.0;

    let result = api.create_product(&record).await;
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}

// ==========================================
// 销售汇总
// ==========================================

fn sale(id: &str, product_id: &str, code: &str, quantity: i64, price: f64, day: u32) -> SaleRecord {
    SaleRecord {
        id: id.to_string(),
        product_id: product_id.to_string(),
        title: format!("商品{}", product_id),
        code: code.to_string(),
        size: "M".to_string(),
        quantity,
        unit_price: price,
        sold_at: Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap(),
    }
}

// ==========================================
// 收银结账
// ==========================================

#[tokio::test]
async fn test_checkout_writes_sales_and_invalidates_caches() {
    let (repo, store) = setup();
    let api = CheckoutApi::new(Arc::clone(&store));

    // 预热商品缓存
    store.products().await.expect("商品失败");

    let cart = vec![
        CartLine {
            product_id: "p1".to_string(),
            size: "M".to_string(),
            quantity: 2,
        },
        CartLine {
            product_id: "p2".to_string(),
            size: "S".to_string(),
            quantity: 1,
        },
    ];
    let records = api.checkout(&cart).await.expect("结账失败");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].code, "TS-001");
    assert_eq!(records[0].quantity, 2);
    // 单价取下单时刻商品快照
    assert!((records[0].unit_price - 99.5).abs() < f64::EPSILON);
    assert_eq!(repo.sales.lock().unwrap().len(), 2);

    // 结账扣减库存,商品集合失效后重新拉取可见
    let fresh = store.products().await.expect("商品失败");
    let p1 = fresh.iter().find(|p| p.id == "p1").unwrap();
    assert_eq!(p1.sizes.iter().find(|s| s.size == "M").unwrap().stock, 3);
    assert_eq!(repo.product_fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_checkout_rejects_insufficient_stock_without_writes() {
    let (repo, store) = setup();
    let api = CheckoutApi::new(store);

    let cart = vec![
        CartLine {
            product_id: "p1".to_string(),
            size: "S".to_string(),
            quantity: 1,
        },
        // S 码库存只有 2
        CartLine {
            product_id: "p1".to_string(),
            size: "S".to_string(),
            quantity: 99,
        },
    ];
    let result = api.checkout(&cart).await;

    // 任一行校验失败,整车不发起任何写入
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    assert!(repo.sales.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_checkout_rejects_hidden_product_and_unknown_size() {
    let (_repo, store) = setup();
    let api = CheckoutApi::new(store);

    // p3 已下架
    let hidden = vec![CartLine {
        product_id: "p3".to_string(),
        size: "M".to_string(),
        quantity: 1,
    }];
    assert!(matches!(
        api.checkout(&hidden).await,
        Err(ApiError::InvalidInput(_))
    ));

    // 尺码不存在
    let unknown_size = vec![CartLine {
        product_id: "p1".to_string(),
        size: "XXL".to_string(),
        quantity: 1,
    }];
    assert!(matches!(
        api.checkout(&unknown_size).await,
        Err(ApiError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn test_cart_total_uses_current_prices() {
    let (_repo, store) = setup();
    let api = CheckoutApi::new(store);

    let cart = vec![
        CartLine {
            product_id: "p1".to_string(),
            size: "M".to_string(),
            quantity: 2,
        },
        CartLine {
            product_id: "p2".to_string(),
            size: "S".to_string(),
            quantity: 1,
        },
    ];
    let total = api.cart_total(&cart).await.expect("计算金额失败");
    assert!((total - (99.5 * 2.0 + 199.0)).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_sales_listing_filters_range_and_sorts_newest_first() {
    let (repo, store) = setup();
    repo.sales.lock().unwrap().extend([
        sale("s1", "p1", "TS-001", 1, 99.5, 1),
        sale("s2", "p2", "HD-010", 2, 199.0, 5),
        sale("s3", "p1", "TS-001", 3, 99.5, 9),
    ]);
    let api = SalesApi::new(store);

    let filter = SalesFilter {
        from: Some(Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap()),
        to: None,
    };
    let listed = api.list_sales(&filter).await.expect("销售列表失败");

    assert_eq!(listed.len(), 2);
    // 最新在前
    assert_eq!(listed[0].id, "s3");

    let summary = api.sales_summary(&filter).await.expect("汇总失败");
    assert_eq!(summary.total_units, 5);
    // 按销售额降序: HD-010 (398) > TS-001 (298.5)
    assert_eq!(summary.by_product[0].code, "HD-010");
}
