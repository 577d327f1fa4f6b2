//! 控制台表格输出

use num_format::{Locale, ToFormattedString};

use crate::models::CoinRecord;

const RULE_WIDTH: usize = 80;

/// 渲染定宽榜单表格
pub fn render_table(coins: &[CoinRecord]) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = Vec::with_capacity(coins.len() + 4);

    lines.push(rule.clone());
    lines.push(format!(
        "{:<6}{:<10}{:<20}{:>15}{:>10}{:>20}",
        "Rank", "Symbol", "Name", "Price", "24h %", "Market Cap"
    ));
    lines.push(rule.clone());

    for coin in coins {
        lines.push(format!(
            "{:<6}{:<10}{:<20}{:>15}{:>10}{:>20}",
            coin.rank.map(|r| r.to_string()).unwrap_or_else(|| "N/A".to_string()),
            coin.symbol.as_deref().unwrap_or("N/A"),
            coin.name.as_deref().unwrap_or("N/A"),
            format_price(coin.price),
            format_change(coin.change_24h),
            format_market_cap(coin.market_cap),
        ));
    }

    lines.push(rule);
    lines.join("\n")
}

/// 0 和缺失都显示为 N/A
fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

fn format_price(price: Option<f64>) -> String {
    match non_zero(price) {
        Some(p) => format!("${}", with_thousands(p, 2)),
        None => "N/A".to_string(),
    }
}

fn format_change(change: Option<f64>) -> String {
    match non_zero(change) {
        Some(c) => format!("{:+.2}%", c),
        None => "N/A".to_string(),
    }
}

fn format_market_cap(market_cap: Option<f64>) -> String {
    match non_zero(market_cap) {
        Some(m) => format!("${}B", with_thousands(m / 1e9, 2)),
        None => "N/A".to_string(),
    }
}

/// 带千分位的定点格式，如 1234567.891 -> "1,234,567.89"
fn with_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    // 先定点舍入再分组，999.999 -> 1,000.00
    let grouped = int_part
        .parse::<u128>()
        .map(|n| n.to_formatted_string(&Locale::en))
        .unwrap_or_else(|_| int_part.to_string());

    // 舍入后为零时不显示负号
    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') { "-" } else { "" };
    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(with_thousands(1234.5, 2), "1,234.50");
        assert_eq!(with_thousands(999.999, 2), "1,000.00");
        assert_eq!(with_thousands(0.05, 2), "0.05");
        assert_eq!(with_thousands(1234567.891, 2), "1,234,567.89");
        assert_eq!(with_thousands(-1234.0, 2), "-1,234.00");
        assert_eq!(with_thousands(-0.001, 2), "0.00");
        assert_eq!(with_thousands(1e18, 2), "1,000,000,000,000,000,000.00");
    }

    #[test]
    fn test_value_formatting() {
        assert_eq!(format_price(Some(64123.456)), "$64,123.46");
        assert_eq!(format_price(Some(0.0)), "N/A");
        assert_eq!(format_price(None), "N/A");
        assert_eq!(format_change(Some(1.234)), "+1.23%");
        assert_eq!(format_change(Some(-0.5)), "-0.50%");
        assert_eq!(format_change(None), "N/A");
        assert_eq!(format_market_cap(Some(1_262_345_000_000.0)), "$1,262.35B");
        assert_eq!(format_market_cap(Some(0.0)), "N/A");
    }

    #[test]
    fn test_render_table_layout() {
        let coins = vec![
            CoinRecord {
                rank: Some(1),
                name: Some("Bitcoin".to_string()),
                symbol: Some("BTC".to_string()),
                price: Some(64123.45),
                change_24h: Some(1.5),
                market_cap: Some(1.262e12),
                ..Default::default()
            },
            CoinRecord::default(),
        ];

        let table = render_table(&coins);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "=".repeat(80));
        assert!(lines[1].starts_with("Rank  Symbol    Name"));
        assert_eq!(lines[1].len(), 81);
        assert_eq!(
            lines[3],
            format!("{:<6}{:<10}{:<20}{:>15}{:>10}{:>20}", "1", "BTC", "Bitcoin", "$64,123.45", "+1.50%", "$1,262.00B")
        );
        assert!(lines[4].starts_with("N/A   N/A       N/A"));
        assert!(lines[4].ends_with("N/A"));
        assert_eq!(lines[5], "=".repeat(80));
    }
}
