// ==========================================
// 服装零售POS系统 - 命令行入口
// ==========================================
// 技术栈: Rust + Tokio + Reqwest
// 职责: 不经 UI 壳直接驱动导入/导出/列表操作
// ==========================================

use pos_backoffice::api::{
    CartLine, CheckoutApi, ImportApi, ProductApi, ProductFilter, SalesApi, SalesFilter,
};
use pos_backoffice::config::{ClientConfig, ImportTunables};
use pos_backoffice::repository::CatalogRepositoryImpl;
use pos_backoffice::session::Session;
use pos_backoffice::store::CatalogStore;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const USAGE: &str = "用法:
  pos-backoffice import <文件.csv|.xlsx>   批量导入商品并输出对账报告
  pos-backoffice export <文件.csv>         导出当前商品目录
  pos-backoffice products [关键字]          商品列表(可选名称/货号搜索)
  pos-backoffice checkout <商品ID> <尺码> <数量>   单行结账
  pos-backoffice summary                   销售汇总";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // 初始化日志系统
    pos_backoffice::logging::init();

    tracing::info!("==================================================");
    tracing::info!("服装零售POS系统 - 后台管理核心");
    tracing::info!("系统版本: {}", pos_backoffice::VERSION);
    tracing::info!("==================================================");

    // 加载配置与会话(进程边界处显式加载)
    let config_path = ClientConfig::default_path().unwrap_or_else(|| PathBuf::from("config.json"));
    let config = ClientConfig::load(&config_path)?;
    tracing::info!("远端数据服务: {}", config.base_url);

    let session_path = Session::default_path().unwrap_or_else(|| PathBuf::from("session.json"));
    let session = Session::load(&session_path)?;
    if !session.is_authenticated() {
        tracing::warn!("当前为匿名会话,远端可能拒绝写操作");
    }

    // 装配数据通道与缓存
    let repo = Arc::new(CatalogRepositoryImpl::new(&config, session)?);
    let store = Arc::new(CatalogStore::new(repo));

    let mut args = std::env::args().skip(1);
    let command = match args.next() {
        Some(cmd) => cmd,
        None => {
            eprintln!("{}", USAGE);
            return Ok(());
        }
    };

    match command.as_str() {
        "import" => {
            let file = args.next().ok_or("缺少文件路径参数")?;
            let api = ImportApi::new(store, ImportTunables::default());
            let response = api.import_products(Path::new(&file)).await?;

            println!("对账批次: {}", response.batch_id);
            println!("整体结论: {}", response.condition);
            println!(
                "数据行 {} / 新建 {} / 更新 {} / 拒绝 {} ({} ms)",
                response.total_rows,
                response.inserted,
                response.updated,
                response.rejected,
                response.elapsed_ms
            );
            for warning in &response.warnings {
                println!("警告 第 {} 行: {}", warning.row_number, warning.message);
            }
            for detail in &response.rejection_details {
                println!("拒绝 {}", detail);
            }
        }
        "export" => {
            let file = args.next().ok_or("缺少文件路径参数")?;
            let api = ProductApi::new(store);
            let count = api
                .export_products(&ProductFilter::default(), Path::new(&file))
                .await?;
            println!("已导出 {} 件商品到 {}", count, file);
        }
        "products" => {
            let filter = ProductFilter {
                search: args.next(),
                ..ProductFilter::default()
            };
            let api = ProductApi::new(store);
            let products = api.list_products(&filter).await?;

            for product in &products {
                println!(
                    "{}\t{}\t{:.2}\t库存 {}\t{}",
                    product.code,
                    product.title,
                    product.price,
                    product.total_stock(),
                    if product.is_visible { "可见" } else { "隐藏" }
                );
            }
            println!("共 {} 件商品", products.len());
        }
        "checkout" => {
            let product_id = args.next().ok_or("缺少商品ID参数")?;
            let size = args.next().ok_or("缺少尺码参数")?;
            let quantity: i64 = args.next().ok_or("缺少数量参数")?.parse()?;

            let api = CheckoutApi::new(store);
            let records = api
                .checkout(&[CartLine {
                    product_id,
                    size,
                    quantity,
                }])
                .await?;

            for record in &records {
                println!(
                    "已售出 {} {} x{} 单价 {:.2}",
                    record.code, record.size, record.quantity, record.unit_price
                );
            }
        }
        "summary" => {
            let api = SalesApi::new(store);
            let summary = api.sales_summary(&SalesFilter::default()).await?;

            println!(
                "总件数 {} / 总销售额 {:.2}",
                summary.total_units, summary.total_revenue
            );
            for tally in summary.by_product.iter().take(10) {
                println!(
                    "{}\t{}\t{} 件\t{:.2}",
                    tally.code, tally.title, tally.units, tally.revenue
                );
            }
        }
        other => {
            eprintln!("未知命令: {}", other);
            eprintln!("{}", USAGE);
        }
    }

    Ok(())
}
