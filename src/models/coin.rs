//! 加密货币行情数据模型
//!
//! 定义榜单记录及输出文件的数据结构

use serde::{Deserialize, Serialize};

/// 单个币种的行情记录
///
/// 所有字段均可缺失，缺失时 JSON 中为 null，CSV 中为空单元格
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinRecord {
    /// 市值排名
    pub rank: Option<u64>,
    /// 名称
    pub name: Option<String>,
    /// 代码
    pub symbol: Option<String>,
    /// 价格（美元）
    pub price: Option<f64>,
    /// 1小时涨跌幅（百分比）
    pub change_1h: Option<f64>,
    /// 24小时涨跌幅（百分比）
    pub change_24h: Option<f64>,
    /// 7天涨跌幅（百分比）
    pub change_7d: Option<f64>,
    /// 市值（美元）
    pub market_cap: Option<f64>,
    /// 24小时成交额（美元）
    pub volume_24h: Option<f64>,
    /// 流通量
    pub circulating_supply: Option<f64>,
}

/// CoinRecord 的字段标识，供声明式字段映射表使用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinField {
    Rank,
    Name,
    Symbol,
    Price,
    Change1h,
    Change24h,
    Change7d,
    MarketCap,
    Volume24h,
    CirculatingSupply,
}

impl CoinField {
    /// 序列化后的字段名
    pub fn key(self) -> &'static str {
        match self {
            CoinField::Rank => "rank",
            CoinField::Name => "name",
            CoinField::Symbol => "symbol",
            CoinField::Price => "price",
            CoinField::Change1h => "change_1h",
            CoinField::Change24h => "change_24h",
            CoinField::Change7d => "change_7d",
            CoinField::MarketCap => "market_cap",
            CoinField::Volume24h => "volume_24h",
            CoinField::CirculatingSupply => "circulating_supply",
        }
    }
}

/// JSON 输出文件的外层结构
#[derive(Debug, Serialize, Deserialize)]
pub struct ListingEnvelope {
    /// 生成时间（ISO 8601 格式）
    pub timestamp: String,
    /// 记录条数
    pub count: usize,
    /// 榜单数据
    pub data: Vec<CoinRecord>,
}
