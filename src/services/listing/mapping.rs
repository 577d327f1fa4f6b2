//! 字段映射表
//!
//! 不同数据源的字段名各不相同，这里用声明式映射表统一转换为 CoinRecord。
//! 每个目标字段对应一组 JSON Pointer 路径，按顺序取第一个非空值。

use serde_json::Value;

use crate::models::{CoinField, CoinRecord};

/// 单个字段的映射规则
pub struct FieldMapping {
    pub field: CoinField,
    pub sources: &'static [&'static str],
}

const fn map(field: CoinField, sources: &'static [&'static str]) -> FieldMapping {
    FieldMapping { field, sources }
}

/// 首页 __NEXT_DATA__ 中 listingLatest 条目的字段映射
pub const NEXT_DATA_MAPPING: &[FieldMapping] = &[
    map(CoinField::Rank, &["/cmc_rank", "/rank"]),
    map(CoinField::Name, &["/name"]),
    map(CoinField::Symbol, &["/symbol"]),
    map(CoinField::Price, &["/quote/USD/price"]),
    map(CoinField::Change1h, &["/quote/USD/percent_change_1h"]),
    map(CoinField::Change24h, &["/quote/USD/percent_change_24h"]),
    map(CoinField::Change7d, &["/quote/USD/percent_change_7d"]),
    map(CoinField::MarketCap, &["/quote/USD/market_cap"]),
    map(CoinField::Volume24h, &["/quote/USD/volume_24h"]),
    map(CoinField::CirculatingSupply, &["/circulating_supply"]),
];

/// data-api v3 cryptoCurrencyList 条目的字段映射
pub const API_MAPPING: &[FieldMapping] = &[
    map(CoinField::Rank, &["/cmcRank"]),
    map(CoinField::Name, &["/name"]),
    map(CoinField::Symbol, &["/symbol"]),
    map(CoinField::Price, &["/quotes/0/price"]),
    map(CoinField::Change1h, &["/quotes/0/percentChange1h"]),
    map(CoinField::Change24h, &["/quotes/0/percentChange24h"]),
    map(CoinField::Change7d, &["/quotes/0/percentChange7d"]),
    map(CoinField::MarketCap, &["/quotes/0/marketCap"]),
    map(CoinField::Volume24h, &["/quotes/0/volume24h"]),
    map(CoinField::CirculatingSupply, &["/circulatingSupply"]),
];

/// 按映射表把一个 JSON 对象投影为 CoinRecord，缺失或类型不符的字段留空
pub fn project(item: &Value, mappings: &[FieldMapping]) -> CoinRecord {
    let mut record = CoinRecord::default();

    for mapping in mappings {
        let mut assigned = false;
        for value in mapping
            .sources
            .iter()
            .filter_map(|path| item.pointer(path))
            .filter(|v| !v.is_null())
        {
            if assign(&mut record, mapping.field, value) {
                assigned = true;
                break;
            }
            log::debug!("字段 {} 类型不符，已忽略: {}", mapping.field.key(), value);
        }

        if !assigned {
            log::trace!("字段 {} 无可用数据", mapping.field.key());
        }
    }

    record
}

fn assign(record: &mut CoinRecord, field: CoinField, value: &Value) -> bool {
    match field {
        CoinField::Rank => set(&mut record.rank, as_integer(value)),
        CoinField::Name => set(&mut record.name, as_text(value)),
        CoinField::Symbol => set(&mut record.symbol, as_text(value)),
        CoinField::Price => set(&mut record.price, as_number(value)),
        CoinField::Change1h => set(&mut record.change_1h, as_number(value)),
        CoinField::Change24h => set(&mut record.change_24h, as_number(value)),
        CoinField::Change7d => set(&mut record.change_7d, as_number(value)),
        CoinField::MarketCap => set(&mut record.market_cap, as_number(value)),
        CoinField::Volume24h => set(&mut record.volume_24h, as_number(value)),
        CoinField::CirculatingSupply => set(&mut record.circulating_supply, as_number(value)),
    }
}

fn set<T>(slot: &mut Option<T>, value: Option<T>) -> bool {
    let assigned = value.is_some();
    *slot = value;
    assigned
}

fn as_integer(v: &Value) -> Option<u64> {
    if let Some(n) = v.as_u64() {
        Some(n)
    } else if let Some(f) = v.as_f64() {
        (f >= 0.0 && f.fract() == 0.0).then_some(f as u64)
    } else {
        v.as_str().and_then(|s| s.trim().parse::<u64>().ok())
    }
}

fn as_number(v: &Value) -> Option<f64> {
    if let Some(s) = v.as_str() {
        s.trim().parse::<f64>().ok()
    } else {
        v.as_f64()
    }
}

fn as_text(v: &Value) -> Option<String> {
    v.as_str().map(|s| s.to_string())
}
