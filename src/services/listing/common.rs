//! 公共常量和数值清洗函数

use anyhow::{anyhow, Result};
use scraper::Selector;

// ==================== CoinMarketCap 常量 ====================

/// CoinMarketCap 首页
pub const CMC_SITE_URL: &str = "https://coinmarketcap.com/";
/// CoinMarketCap 榜单数据 API（备用数据源）
pub const CMC_LISTING_API: &str = "https://api.coinmarketcap.com/data-api/v3/cryptocurrency/listing";

/// 模拟浏览器的请求头
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
pub const BROWSER_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

/// Next.js 内嵌数据脚本标记
pub const NEXT_DATA_MARKER: &str = "__NEXT_DATA__";

/// 解析 CSS 选择器
pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("选择器 {} 解析失败: {}", css, e))
}

// ==================== 数值清洗 ====================

/// 清洗结果：区分真实解析值与回退的默认值
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cleaned<T> {
    Parsed(T),
    Defaulted,
}

impl<T: Default> Cleaned<T> {
    /// 取值，解析失败时返回零值
    pub fn value(self) -> T {
        match self {
            Cleaned::Parsed(v) => v,
            Cleaned::Defaulted => T::default(),
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Cleaned::Defaulted)
    }
}

impl<T, E> From<Result<T, E>> for Cleaned<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => Cleaned::Parsed(v),
            Err(_) => Cleaned::Defaulted,
        }
    }
}

/// 提取文本中的全部数字并解析为整数，如 "Rank #7" -> 7
pub fn parse_integer(text: &str) -> Cleaned<u64> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse::<u64>().into()
}

/// 解析金额，如 "$1,234.56" -> 1234.56
pub fn parse_currency(text: &str) -> Cleaned<f64> {
    let cleaned = text.replace('$', "").replace(',', "");
    cleaned.trim().parse::<f64>().into()
}

/// 解析百分比，如 "+3.25%" -> 3.25
pub fn parse_percent(text: &str) -> Cleaned<f64> {
    let cleaned = text.replace('%', "").replace(',', "");
    cleaned.trim().parse::<f64>().into()
}

/// 清洗排名等整数单元格，无法解析时返回 0
pub fn clean_integer(text: &str) -> u64 {
    lossy(parse_integer(text), "整数", text)
}

/// 清洗金额单元格，无法解析时返回 0.0
pub fn clean_currency(text: &str) -> f64 {
    lossy(parse_currency(text), "金额", text)
}

/// 清洗百分比单元格，无法解析时返回 0.0
pub fn clean_percent(text: &str) -> f64 {
    lossy(parse_percent(text), "百分比", text)
}

fn lossy<T: Default>(cleaned: Cleaned<T>, kind: &str, text: &str) -> T {
    if cleaned.is_defaulted() {
        log::trace!("无法解析{}: {:?}，使用 0", kind, text);
    }
    cleaned.value()
}
