//! 榜单获取器
//!
//! 按配置的策略顺序依次尝试，取第一个非空结果：
//! 1. next_data - 首页内嵌的 __NEXT_DATA__ JSON
//! 2. table     - 首页榜单表格
//! 3. api       - data-api 榜单接口
//!
//! 首页只下载一次，供前两个策略共用

use anyhow::{anyhow, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use super::api::fetch_listing_api;
use super::next_data::parse_next_data;
use super::table::parse_table;
use crate::config::SourceConfig;
use crate::models::CoinRecord;

/// 数据获取策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    NextData,
    Table,
    Api,
}

impl Strategy {
    /// 默认回退顺序
    pub const FALLBACK_CHAIN: [Strategy; 3] = [Strategy::NextData, Strategy::Table, Strategy::Api];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::NextData => "next_data",
            Strategy::Table => "table",
            Strategy::Api => "api",
        }
    }
}

pub struct ListingFetcher {
    client: Client,
    config: SourceConfig,
}

impl ListingFetcher {
    /// 创建获取器，HTTP 客户端在多次请求间复用
    pub fn new(config: SourceConfig) -> Result<Self> {
        Url::parse(&config.site_url).map_err(|e| anyhow!("首页地址 {} 无效: {}", config.site_url, e))?;
        Url::parse(&config.api_url).map_err(|e| anyhow!("API 地址 {} 无效: {}", config.api_url, e))?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);
        headers.insert(ACCEPT, HeaderValue::from_str(&config.accept)?);
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_str(&config.accept_language)?);

        let mut builder = Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .gzip(true);

        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        if config.connect_timeout_secs > 0 {
            builder = builder.connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// 获取排名前 limit 的币种
    ///
    /// 不返回错误：所有失败都会记录日志并转入下一个策略，全部失败时返回空列表
    pub async fn fetch_top(&self, limit: usize) -> Vec<CoinRecord> {
        // None: 尚未下载；Some(None): 下载失败
        let mut page: Option<Option<String>> = None;

        for &strategy in &self.config.strategies {
            let result = match strategy {
                Strategy::NextData | Strategy::Table => {
                    if page.is_none() {
                        page = Some(match self.fetch_page().await {
                            Ok(html) => Some(html),
                            Err(e) => {
                                log::warn!("获取首页失败: {}", e);
                                None
                            }
                        });
                    }

                    let Some(Some(html)) = page.as_ref() else {
                        log::debug!("首页不可用，跳过策略 {}", strategy.name());
                        continue;
                    };

                    if strategy == Strategy::NextData {
                        parse_next_data(html, limit)
                    } else {
                        parse_table(html, limit)
                    }
                }
                Strategy::Api => fetch_listing_api(&self.client, &self.config.api_url, limit).await,
            };

            match result {
                Ok(mut coins) if !coins.is_empty() => {
                    coins.truncate(limit);
                    log::info!("✅ 策略 {} 获取到 {} 条数据", strategy.name(), coins.len());
                    return coins;
                }
                Ok(_) => log::info!("策略 {} 未获取到数据", strategy.name()),
                Err(e) if strategy == Strategy::Api => log::error!("API 错误: {}", e),
                Err(e) => log::warn!("策略 {} 失败: {}", strategy.name(), e),
            }
        }

        Vec::new()
    }

    /// 下载首页 HTML
    async fn fetch_page(&self) -> Result<String> {
        log::info!("📡 请求首页 URL: {}", self.config.site_url);

        let response = self.client.get(&self.config.site_url).send().await?;

        if !response.status().is_success() {
            return Err(anyhow!("获取首页失败: {}", response.status()));
        }

        Ok(response.text().await?)
    }
}
