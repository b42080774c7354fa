//! 时间工具函数
//!
//! 账本按本地日历日划分；订单筛选按 `created_at` 的 UTC 日期。

use crate::core::{EngineError, EngineResult};
use chrono::{Local, NaiveDate};

/// 当前本地日期 (账本键)
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| EngineError::invalid_field("date", format!("invalid date format: {}", date)))
}
