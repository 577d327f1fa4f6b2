//! CoinMarketCap 榜单抓取工具
//!
//! 获取市值排名前 N 的加密货币，打印表格并导出为 JSON 和 CSV
//! 数据来源：CoinMarketCap 首页及 data-api 榜单接口

mod config;    // 配置加载
mod models;    // 数据模型定义
mod services;  // 业务逻辑服务

use env_logger::Env;

use crate::config::AppConfig;
use crate::services::display::render_table;
use crate::services::export::{save_csv, save_json};
use crate::services::listing::ListingFetcher;

/// 应用程序入口
///
/// 单线程运行时，所有请求按顺序执行
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let (config, config_path) = AppConfig::load()?;

    // 初始化日志系统，RUST_LOG 优先，否则使用配置中的级别
    env_logger::init_from_env(Env::default().default_filter_or(config.log.level.as_str()));

    match config_path {
        Some(path) => log::info!("从 {} 加载配置成功", path),
        None => log::info!("使用默认配置"),
    }

    let limit = config.output.limit;
    let fetcher = ListingFetcher::new(config.source)?;

    println!("Fetching top {} cryptocurrencies from CoinMarketCap...", limit);
    let coins = fetcher.fetch_top(limit).await;

    if coins.is_empty() {
        println!("No data retrieved");
        return Ok(());
    }

    println!();
    println!("{}", render_table(&coins));
    println!();

    let count = save_json(&coins, &config.output.json_path)?;
    println!("Saved {} coins to {}", count, config.output.json_path);

    let count = save_csv(&coins, &config.output.csv_path)?;
    println!("Saved {} coins to {}", count, config.output.csv_path);

    Ok(())
}
