//! 配置模块
//!
//! 支持从 JSON 文件加载系统配置，所有字段均有默认值

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::services::listing::common::{
    BROWSER_ACCEPT, BROWSER_ACCEPT_LANGUAGE, BROWSER_USER_AGENT, CMC_LISTING_API, CMC_SITE_URL,
};
use crate::services::listing::Strategy;

/// 数据源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// 首页地址
    #[serde(default = "default_site_url")]
    pub site_url: String,
    /// 备用榜单 API 地址
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_accept")]
    pub accept: String,
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
    /// 请求超时时间（秒，0 表示不限制）
    #[serde(default)]
    pub timeout_secs: u64,
    /// 连接超时时间（秒，0 表示不限制）
    #[serde(default)]
    pub connect_timeout_secs: u64,
    /// 数据获取策略，按顺序尝试
    #[serde(default = "default_strategies")]
    pub strategies: Vec<Strategy>,
}

/// 输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 获取的币种数量
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// JSON 输出文件
    #[serde(default = "default_json_path")]
    pub json_path: String,
    /// CSV 输出文件
    #[serde(default = "default_csv_path")]
    pub csv_path: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub log: LogConfig,
}

// 默认值函数
fn default_site_url() -> String { CMC_SITE_URL.to_string() }
fn default_api_url() -> String { CMC_LISTING_API.to_string() }
fn default_user_agent() -> String { BROWSER_USER_AGENT.to_string() }
fn default_accept() -> String { BROWSER_ACCEPT.to_string() }
fn default_accept_language() -> String { BROWSER_ACCEPT_LANGUAGE.to_string() }
fn default_strategies() -> Vec<Strategy> { Strategy::FALLBACK_CHAIN.to_vec() }
fn default_limit() -> usize { 20 }
fn default_json_path() -> String { "coins_data.json".to_string() }
fn default_csv_path() -> String { "coins_data.csv".to_string() }
fn default_log_level() -> String { "info".to_string() }

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            site_url: default_site_url(),
            api_url: default_api_url(),
            user_agent: default_user_agent(),
            accept: default_accept(),
            accept_language: default_accept_language(),
            timeout_secs: 0,
            connect_timeout_secs: 0,
            strategies: default_strategies(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            json_path: default_json_path(),
            csv_path: default_csv_path(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// 配置文件查找路径
const CONFIG_PATHS: [&str; 2] = ["config.json", "config/config.json"];

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 返回第一个存在的配置文件路径
    pub fn find_config_file() -> Option<&'static str> {
        CONFIG_PATHS.into_iter().find(|path| Path::new(path).exists())
    }

    /// 加载配置，存在配置文件则读取，否则使用默认值
    ///
    /// 配置文件存在但格式错误时返回错误
    pub fn load() -> anyhow::Result<(Self, Option<&'static str>)> {
        let (config, path) = match Self::find_config_file() {
            Some(path) => (Self::from_file(path)?, Some(path)),
            None => (Self::default(), None),
        };
        config.validate()?;
        Ok((config, path))
    }

    /// 校验取值范围
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.output.limit == 0 {
            return Err(anyhow!("output.limit 必须为正整数"));
        }
        if self.source.strategies.is_empty() {
            return Err(anyhow!("source.strategies 不能为空"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_demo_parameters() {
        let config = AppConfig::default();
        assert_eq!(config.output.limit, 20);
        assert_eq!(config.output.json_path, "coins_data.json");
        assert_eq!(config.output.csv_path, "coins_data.csv");
        assert_eq!(config.source.timeout_secs, 0);
        assert_eq!(config.source.strategies, Strategy::FALLBACK_CHAIN.to_vec());
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"output": {{"limit": 5}}, "source": {{"strategies": ["api"], "timeout_secs": 15}}}}"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.output.limit, 5);
        assert_eq!(config.output.csv_path, "coins_data.csv");
        assert_eq!(config.source.strategies, vec![Strategy::Api]);
        assert_eq!(config.source.timeout_secs, 15);
        assert_eq!(config.source.site_url, CMC_SITE_URL);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_validate_rejects_zero_limit_and_empty_chain() {
        assert!(AppConfig::default().validate().is_ok());

        let mut config = AppConfig::default();
        config.output.limit = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.source.strategies.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        assert!(AppConfig::from_file(file.path()).is_err());
    }
}
