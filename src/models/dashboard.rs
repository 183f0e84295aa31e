//! 仪表盘视图模型
//!
//! 每次拉取后重新计算，不做增量更新

use super::MonthlyStatistics;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// 24 小时功率曲线上的一个点
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartDataPoint {
    /// "HH:MM"
    pub time: String,
    /// "HH"
    pub hour: String,
    /// 发电功率（W）
    pub power: f64,
    /// Unix 秒
    pub timestamp: i64,
}

/// 单日发电量
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyProduction {
    /// "YYYY-MM-DD"
    pub date: String,
    /// kWh
    pub generation: f64,
    pub full_power_hours: f64,
}

/// 月度汇总指标
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotals {
    pub total_generation: f64,
    pub total_full_power_hours: f64,
    /// 按自然月天数平均，而非按实际有数据的天数
    pub avg_daily_generation: f64,
}

/// 查看模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardView {
    /// 实时视图（当天）
    Live,
    /// 指定日期视图
    Dated(NaiveDate),
}

/// 单日明细摘要
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub chart: Vec<ChartDataPoint>,
    pub current_power_w: f64,
    pub current_power_kw: f64,
    /// 无采样时为空
    pub peak_power_w: Option<f64>,
    pub peak_power_kw: Option<f64>,
    pub is_active: bool,
    pub generation_kwh: f64,
    pub full_power_hours: f64,
}

/// 单日数据获取结果
///
/// 单日数据缺失不影响整体刷新，仅以 `unavailable` 呈现
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DayOutcome {
    Available(DaySummary),
    Unavailable { message: String },
}

impl DayOutcome {
    pub fn is_available(&self) -> bool {
        matches!(self, DayOutcome::Available(_))
    }
}

/// 月度视图
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyView {
    pub statistics: Option<MonthlyStatistics>,
    pub daily: Vec<DailyProduction>,
    pub totals: Option<MonthlyTotals>,
    /// 月统计发电量；月统计缺失或为 0 时为各日之和
    pub monthly_generation_kwh: f64,
    pub total_production_kwh: f64,
    /// 按有记录的天数平均，无记录时为空
    pub average_production_kwh: Option<f64>,
    pub peak_day_kwh: Option<f64>,
    pub active_days: usize,
}

/// 客户端自动刷新提示
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshHint {
    pub auto_refresh: bool,
    pub interval_seconds: Option<u64>,
}

/// 仪表盘快照
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub date: NaiveDate,
    pub day: DayOutcome,
    pub monthly: MonthlyView,
    pub refresh: RefreshHint,
    /// 客户端据此丢弃过期快照
    pub generated_at: DateTime<Utc>,
}
