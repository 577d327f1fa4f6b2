//! 首页内嵌数据解析
//!
//! CoinMarketCap 首页由 Next.js 渲染，榜单数据以 JSON 形式内嵌在
//! `<script id="__NEXT_DATA__">` 中，路径为
//! props.initialState.cryptocurrency.listingLatest.data

use anyhow::{anyhow, Result};
use regex::Regex;
use scraper::Html;

use super::common::{selector, NEXT_DATA_MARKER};
use super::mapping::{project, NEXT_DATA_MAPPING};
use crate::models::CoinRecord;

/// 从首页 HTML 中提取榜单
///
/// 未找到脚本标签或 JSON 解析失败时返回错误；
/// 找到数据但榜单为空时返回空列表
pub fn parse_next_data(html: &str, limit: usize) -> Result<Vec<CoinRecord>> {
    let json_text = find_next_data_json(html)?;
    let json_data: serde_json::Value =
        serde_json::from_str(&json_text).map_err(|e| anyhow!("解析JSON失败: {}", e))?;

    let listings = match json_data["props"]["initialState"]["cryptocurrency"]["listingLatest"]["data"]
        .as_array()
    {
        Some(list) => list,
        None => {
            log::info!("__NEXT_DATA__ 中没有 listingLatest 数据");
            return Ok(Vec::new());
        }
    };

    let mut coins = Vec::new();
    for item in listings.iter().take(limit) {
        if item.is_object() {
            coins.push(project(item, NEXT_DATA_MAPPING));
        } else {
            log::debug!("跳过非对象条目: {}", item);
        }
    }

    log::info!("📊 从 __NEXT_DATA__ 解析到 {} 条榜单数据", coins.len());
    Ok(coins)
}

/// 在所有内联脚本中查找带 __NEXT_DATA__ 标记的一个，并截取其中的 JSON 文本
fn find_next_data_json(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let script_selector = selector("script")?;
    let json_re = Regex::new(r#"(?s)<script[^>]*id="__NEXT_DATA__"[^>]*>(.*?)</script>"#)?;

    for script in document.select(&script_selector) {
        let outer = script.html();
        if !outer.contains(NEXT_DATA_MARKER) {
            continue;
        }

        if let Some(body) = json_re.captures(&outer).and_then(|c| c.get(1)) {
            return Ok(body.as_str().to_string());
        }
    }

    Err(anyhow!("未找到__NEXT_DATA__脚本标签"))
}
