//! 加密货币榜单服务
//!
//! 从 CoinMarketCap 获取市值排名前 N 的币种
//!
//! ## 数据来源
//! - 首页内嵌 __NEXT_DATA__ JSON
//! - 首页榜单表格
//! - data-api v3 榜单接口（备用）

mod api;
pub mod common;
mod fetcher;
mod mapping;
mod next_data;
mod table;

pub use fetcher::{ListingFetcher, Strategy};
