//! 光伏数据转换工具
//!
//! 全部为纯函数：输入已拉取的数据，输出图表序列和汇总指标，不做任何 I/O。

use super::days_in_month;
use crate::models::{
    ChartDataPoint, DailyProduction, MonthlyStatItem, MonthlyStatistics, MonthlyStatsResponse,
    MonthlyTotals, PowerHistoryResponse, PowerRecord, PowerStatistics,
};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// 超出 chrono 可表示范围的时间戳按 Unix 纪元处理并记录告警
fn local_time(timestamp: i64, tz: &Tz) -> DateTime<Tz> {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .unwrap_or_else(|| {
            tracing::warn!(timestamp, "采样时间戳超出范围，按 1970-01-01 处理");
            DateTime::<Utc>::default()
        })
        .with_timezone(tz)
}

/// Unix 秒转 24 小时制 "HH:MM"
pub fn format_time(timestamp: i64, tz: &Tz) -> String {
    local_time(timestamp, tz).format("%H:%M").to_string()
}

/// Unix 秒转小时标签 "HH"
pub fn format_hour(timestamp: i64, tz: &Tz) -> String {
    local_time(timestamp, tz).format("%H").to_string()
}

/// 生成 24 小时曲线数据，按时间升序
///
/// 相同时间戳保持输入顺序
pub fn process_chart_data(records: &[PowerRecord], tz: &Tz) -> Vec<ChartDataPoint> {
    let mut points: Vec<ChartDataPoint> = records
        .iter()
        .map(|record| ChartDataPoint {
            time: format_time(record.date_time, tz),
            hour: format_hour(record.date_time, tz),
            power: record.generation_power,
            timestamp: record.date_time,
        })
        .collect();

    points.sort_by_key(|p| p.timestamp);
    points
}

/// 峰值功率，空输入返回 None
pub fn calculate_peak_power(records: &[PowerRecord]) -> Option<f64> {
    records
        .iter()
        .map(|r| r.generation_power)
        .reduce(f64::max)
}

/// 当前功率：按时间倒序第一条发电功率大于 0 的采样，没有则为 0
pub fn calculate_current_power(records: &[PowerRecord]) -> f64 {
    let mut sorted: Vec<&PowerRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.date_time.cmp(&a.date_time));

    sorted
        .into_iter()
        .find(|r| r.generation_power > 0.0)
        .map(|r| r.generation_power)
        .unwrap_or(0.0)
}

/// 最近 `window` 条采样（按接收顺序，不重新排序）中是否有正发电功率
///
/// 与 `calculate_current_power` 的排序口径不同，上游乱序时两者可能不一致
pub fn is_system_active(records: &[PowerRecord], window: usize) -> bool {
    let start = records.len().saturating_sub(window);
    records[start..].iter().any(|r| r.generation_power > 0.0)
}

/// W → kW，不做取整
pub fn watts_to_kilowatts(watts: f64) -> f64 {
    watts / 1000.0
}

fn date_key(year: i32, month: u32, day: u32) -> String {
    format!("{}-{:02}-{:02}", year, month, day)
}

/// 单条日统计转为发电量条目
pub fn daily_production(stat: &PowerStatistics) -> DailyProduction {
    DailyProduction {
        date: date_key(stat.year, stat.month, stat.day),
        generation: stat.generation_value,
        full_power_hours: stat.full_power_hours_day,
    }
}

fn sorted_by_date<'a, I>(stats: I) -> Vec<DailyProduction>
where
    I: IntoIterator<Item = &'a PowerStatistics>,
{
    let mut keyed: Vec<((i32, u32, u32), DailyProduction)> = stats
        .into_iter()
        .map(|s| ((s.year, s.month, s.day), daily_production(s)))
        .collect();

    keyed.sort_by_key(|(key, _)| *key);
    keyed.into_iter().map(|(_, d)| d).collect()
}

/// 多日功率历史转为按日期升序的发电量序列
///
/// 缺少统计信息的响应被跳过
pub fn process_daily_data(responses: &[PowerHistoryResponse]) -> Vec<DailyProduction> {
    sorted_by_date(responses.iter().filter_map(|r| r.statistics.as_ref()))
}

/// 月度统计响应逐条映射，保持上游顺序
pub fn process_monthly_stats_data(response: &MonthlyStatsResponse) -> Vec<DailyProduction> {
    response.records.iter().map(daily_production).collect()
}

/// 月度单日条目映射并按日期升序排序
pub fn normalize_monthly_items(items: &[MonthlyStatItem]) -> Vec<DailyProduction> {
    sorted_by_date(items)
}

/// 总发电量，空序列为 0
pub fn calculate_total_production(daily: &[DailyProduction]) -> f64 {
    daily.iter().map(|d| d.generation).sum()
}

/// 按有记录的天数求日均发电量，空序列返回 None
pub fn average_daily_production(daily: &[DailyProduction]) -> Option<f64> {
    if daily.is_empty() {
        return None;
    }
    Some(calculate_total_production(daily) / daily.len() as f64)
}

/// 月度汇总
///
/// 日均值除以自然月天数，而不是实际有数据的天数；数据不全时日均值偏低
pub fn calculate_monthly_totals(statistics: &MonthlyStatistics) -> MonthlyTotals {
    let avg_daily_generation = match days_in_month(statistics.year, statistics.month) {
        Some(days) => statistics.generation_value / f64::from(days),
        None => 0.0,
    };

    MonthlyTotals {
        total_generation: statistics.generation_value,
        total_full_power_hours: statistics.full_power_hours_day,
        avg_daily_generation,
    }
}

/// 单日最高发电量
pub fn peak_day_generation(daily: &[DailyProduction]) -> Option<f64> {
    daily.iter().map(|d| d.generation).reduce(f64::max)
}

/// 有发电的天数
pub fn active_days(daily: &[DailyProduction]) -> usize {
    daily.iter().filter(|d| d.generation > 0.0).count()
}
