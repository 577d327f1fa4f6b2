//! CoinMarketCap data-api 备用数据源
//!
//! 对接 https://api.coinmarketcap.com/data-api/v3/cryptocurrency/listing

use anyhow::{anyhow, Result};
use reqwest::Client;

use super::mapping::{project, API_MAPPING};
use crate::models::CoinRecord;

/// 请求榜单 API 并解析
pub async fn fetch_listing_api(client: &Client, api_url: &str, limit: usize) -> Result<Vec<CoinRecord>> {
    log::info!("📡 请求榜单 API URL: {}", api_url);

    let limit_param = limit.to_string();
    let response = client
        .get(api_url)
        .query(&[
            ("start", "1"),
            ("limit", limit_param.as_str()),
            ("sortBy", "market_cap"),
            ("sortType", "desc"),
            ("convert", "USD"),
            ("cryptoType", "all"),
            ("tagType", "all"),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(anyhow!("获取榜单 API 数据失败: {}", response.status()));
    }

    let json_data: serde_json::Value = response.json().await?;
    parse_listing_api(&json_data, limit)
}

/// 解析 data.cryptoCurrencyList
fn parse_listing_api(json_data: &serde_json::Value, limit: usize) -> Result<Vec<CoinRecord>> {
    let list = json_data["data"]["cryptoCurrencyList"]
        .as_array()
        .ok_or_else(|| anyhow!("响应中缺少 cryptoCurrencyList"))?;

    let coins: Vec<CoinRecord> = list
        .iter()
        .take(limit)
        .filter(|item| item.is_object())
        .map(|item| project(item, API_MAPPING))
        .collect();

    log::info!("📊 从榜单 API 解析到 {} 条数据", coins.len());
    Ok(coins)
}
