//! 榜单数据导出
//!
//! 每次调用整体覆盖目标文件

use anyhow::Result;
use chrono::Local;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::models::{CoinRecord, ListingEnvelope};

/// 保存为 JSON：{ timestamp, count, data }，两空格缩进
///
/// 返回写入的记录条数
pub fn save_json<P: AsRef<Path>>(coins: &[CoinRecord], path: P) -> Result<usize> {
    let envelope = ListingEnvelope {
        timestamp: Local::now().to_rfc3339(),
        count: coins.len(),
        data: coins.to_vec(),
    };

    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer_pretty(&mut writer, &envelope)?;
    writer.flush()?;

    log::debug!("已写入 JSON 文件 {}", path.as_ref().display());
    Ok(envelope.count)
}

/// 保存为 CSV，表头为 CoinRecord 的字段名
///
/// 空列表不创建文件，返回 0
pub fn save_csv<P: AsRef<Path>>(coins: &[CoinRecord], path: P) -> Result<usize> {
    if coins.is_empty() {
        return Ok(0);
    }

    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for coin in coins {
        writer.serialize(coin)?;
    }
    writer.flush()?;

    log::debug!("已写入 CSV 文件 {}", path.as_ref().display());
    Ok(coins.len())
}
