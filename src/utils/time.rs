//! 时间处理工具

use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

/// 某月的自然天数（下月第一天的前一天）
///
/// 月份越界时按年进位，与日历换算一致；超出可表示范围时返回 None
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let months = i64::from(year) * 12 + i64::from(month);
    let next_year = i32::try_from(months.div_euclid(12)).ok()?;
    let next_month = u32::try_from(months.rem_euclid(12)).ok()? + 1;

    NaiveDate::from_ymd_opt(next_year, next_month, 1)?
        .pred_opt()
        .map(|d| d.day())
}

/// 指定时区的今天
pub fn today_in(tz: &Tz) -> NaiveDate {
    Utc::now().with_timezone(tz).date_naive()
}

/// 长日期格式，例如 "February 3, 2024"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// 解析 "YYYY-MM-DD"
pub fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
}
