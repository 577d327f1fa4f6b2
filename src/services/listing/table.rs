//! 首页榜单表格解析
//!
//! 内嵌数据不可用时，直接按单元格位置解析页面上的第一个表格：
//! 1 排名 / 2 名称和代码 / 3 价格 / 4 24h涨跌 / 5 7d涨跌 / 6 市值 / 7 成交额（可选）

use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};

use super::common::{clean_currency, clean_integer, clean_percent, selector};
use crate::models::CoinRecord;

/// 一行至少需要的单元格数量
const MIN_CELLS: usize = 7;

pub fn parse_table(html: &str, limit: usize) -> Result<Vec<CoinRecord>> {
    let document = Html::parse_document(html);

    let table_selector = selector("table")?;
    let tr_selector = selector("tr")?;
    let td_selector = selector("td")?;
    let name_selector = selector(".coin-item-name")?;
    let symbol_selector = selector(".coin-item-symbol")?;

    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| anyhow!("页面中未找到榜单表格"))?;

    let mut coins = Vec::new();

    // 第一行是表头
    for row in table.select(&tr_selector).skip(1).take(limit) {
        let cells: Vec<ElementRef> = row.select(&td_selector).collect();
        if cells.len() < MIN_CELLS {
            log::debug!("跳过单元格不足的行: {} 列", cells.len());
            continue;
        }

        let (name, symbol) = name_and_symbol(cells[2], &name_selector, &symbol_selector);

        coins.push(CoinRecord {
            rank: Some(clean_integer(&cell_text(cells[1]))),
            name,
            symbol,
            price: Some(clean_currency(&cell_text(cells[3]))),
            change_1h: None,
            change_24h: Some(clean_percent(&cell_text(cells[4]))),
            change_7d: Some(clean_percent(&cell_text(cells[5]))),
            market_cap: Some(clean_currency(&cell_text(cells[6]))),
            volume_24h: cells.get(7).map(|c| clean_currency(&cell_text(*c))),
            circulating_supply: None,
        });
    }

    log::info!("📊 从表格解析到 {} 条榜单数据", coins.len());
    Ok(coins)
}

/// 单元格文本：各文本节点去除首尾空白后拼接
fn cell_text(cell: ElementRef) -> String {
    cell.text().map(str::trim).collect()
}

/// 名称优先取 .coin-item-name，否则取第一个文本片段；
/// 代码优先取 .coin-item-symbol，否则在有多个文本片段时取最后一个
fn name_and_symbol(
    cell: ElementRef,
    name_selector: &Selector,
    symbol_selector: &Selector,
) -> (Option<String>, Option<String>) {
    let fragments: Vec<&str> = cell
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();

    let name = cell
        .select(name_selector)
        .next()
        .map(cell_text)
        .filter(|t| !t.is_empty())
        .or_else(|| fragments.first().map(|t| t.to_string()));

    let symbol = cell
        .select(symbol_selector)
        .next()
        .map(cell_text)
        .filter(|t| !t.is_empty())
        .or_else(|| {
            if fragments.len() > 1 {
                fragments.last().map(|t| t.to_string())
            } else {
                None
            }
        });

    (name, symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE_PAGE: &str = r#"<html><body>
<table>
  <thead><tr><th></th><th>#</th><th>Name</th><th>Price</th><th>24h %</th><th>7d %</th><th>Market Cap</th><th>Volume(24h)</th></tr></thead>
  <tbody>
    <tr><td>☆</td><td>1</td><td><div><p class="coin-item-name">Bitcoin</p><p class="coin-item-symbol">BTC</p></div></td>
        <td>$64,123.45</td><td>+1.25%</td><td>-3.10%</td><td>$1,262,000,000,000</td><td>$28,500,000,000</td></tr>
    <tr><td>☆</td><td>2</td><td><span>Ethereum</span><span>ETH</span></td>
        <td>$3,100.00</td><td>0.50%</td><td>2.00%</td><td>$372,000,000,000</td></tr>
    <tr><td>☆</td><td>3</td><td>Tether</td>
        <td>$1.00</td><td>N/A</td><td>0.01%</td><td>$110,000,000,000</td></tr>
    <tr><td>only</td><td>two</td></tr>
  </tbody>
</table>
<table><tr><td>second table is ignored</td></tr></table>
</body></html>"#;

    #[test]
    fn test_parse_rows_by_position() {
        let coins = parse_table(TABLE_PAGE, 10).unwrap();
        assert_eq!(coins.len(), 3);

        let btc = &coins[0];
        assert_eq!(btc.rank, Some(1));
        assert_eq!(btc.name.as_deref(), Some("Bitcoin"));
        assert_eq!(btc.symbol.as_deref(), Some("BTC"));
        assert_eq!(btc.price, Some(64123.45));
        assert_eq!(btc.change_24h, Some(1.25));
        assert_eq!(btc.change_7d, Some(-3.10));
        assert_eq!(btc.market_cap, Some(1_262_000_000_000.0));
        assert_eq!(btc.volume_24h, Some(28_500_000_000.0));
        assert!(btc.change_1h.is_none());
        assert!(btc.circulating_supply.is_none());
    }

    #[test]
    fn test_symbol_fallbacks() {
        let coins = parse_table(TABLE_PAGE, 10).unwrap();

        assert_eq!(coins[1].name.as_deref(), Some("Ethereum"));
        assert_eq!(coins[1].symbol.as_deref(), Some("ETH"));
        assert!(coins[1].volume_24h.is_none());

        assert_eq!(coins[2].name.as_deref(), Some("Tether"));
        assert!(coins[2].symbol.is_none());
        assert_eq!(coins[2].change_24h, Some(0.0));
    }

    #[test]
    fn test_limit_counts_rows_after_header() {
        let coins = parse_table(TABLE_PAGE, 2).unwrap();
        assert_eq!(coins.len(), 2);
        assert_eq!(coins[1].rank, Some(2));
    }

    #[test]
    fn test_missing_table_is_error() {
        assert!(parse_table("<html><body><p>blocked</p></body></html>", 5).is_err());
    }
}
