//! 仪表盘聚合服务
//!
//! 并发拉取单日明细与月度汇总，转换为图表和指标卡片所需的视图模型。
//! 单日数据缺失（例如当天尚未产生数据）只记录日志，月度数据缺失视为刷新失败。

use crate::config::{DashboardSettings, Settings};
use crate::errors::AppError;
use crate::models::{
    DailyProduction, DashboardSnapshot, DashboardView, DayOutcome, DaySummary,
    MonthlyStatsResponse, MonthlyView, PowerHistoryResponse,
};
use crate::services::SolarSource;
use crate::utils::{
    active_days, average_daily_production, calculate_current_power, calculate_monthly_totals,
    calculate_peak_power, calculate_total_production, format_long_date, is_system_active,
    normalize_monthly_items, peak_day_generation, process_chart_data, refresh_hint, today_in,
    watts_to_kilowatts,
};
use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use std::sync::Arc;

/// 仪表盘聚合服务
pub struct DashboardService {
    source: Arc<dyn SolarSource>,
    settings: DashboardSettings,
    tz: Tz,
}

impl DashboardService {
    pub fn new(source: Arc<dyn SolarSource>, settings: &Settings) -> Self {
        Self {
            source,
            tz: settings.dashboard.tz(),
            settings: settings.dashboard.clone(),
        }
    }

    /// 配置时区下的今天
    pub fn today(&self) -> NaiveDate {
        today_in(&self.tz)
    }

    /// 生成仪表盘快照
    pub async fn snapshot(&self, view: DashboardView) -> Result<DashboardSnapshot, AppError> {
        let today = self.today();
        self.snapshot_at(view, today).await
    }

    /// 以指定的 "今天" 生成快照
    pub async fn snapshot_at(
        &self,
        view: DashboardView,
        today: NaiveDate,
    ) -> Result<DashboardSnapshot, AppError> {
        let date = match view {
            DashboardView::Live => today,
            DashboardView::Dated(date) => date,
        };

        let (day_result, month_result) = futures::join!(
            self.source
                .fetch_daily_record(date.year(), date.month(), date.day()),
            self.source.fetch_monthly_summary(date.year(), date.month())
        );

        // 月度数据失败（含结构不符）：整次刷新失败
        let monthly = month_result.and_then(|payload| payload.parse()).map_err(|e| {
            tracing::error!(%date, error = %e, "月度数据获取失败");
            e
        })?;

        // 单日数据失败：降级为不可用，不影响月度数据展示
        let day = match day_result.and_then(|payload| payload.parse()) {
            Ok(history) => DayOutcome::Available(self.summarize_day(&history)),
            Err(e) => {
                tracing::warn!(%date, error = %e, "单日数据不可用");
                DayOutcome::Unavailable {
                    message: describe_day_error(date, &e),
                }
            }
        };

        Ok(DashboardSnapshot {
            date,
            day,
            monthly: summarize_month(monthly),
            refresh: refresh_hint(view, today, &self.settings),
            generated_at: Utc::now(),
        })
    }

    fn summarize_day(&self, history: &PowerHistoryResponse) -> DaySummary {
        let records = &history.records;
        let current = calculate_current_power(records);
        let peak = calculate_peak_power(records);
        let (generation_kwh, full_power_hours) = history
            .statistics
            .as_ref()
            .map(|s| (s.generation_value, s.full_power_hours_day))
            .unwrap_or((0.0, 0.0));

        DaySummary {
            chart: process_chart_data(records, &self.tz),
            current_power_w: current,
            current_power_kw: watts_to_kilowatts(current),
            peak_power_w: peak,
            peak_power_kw: peak.map(watts_to_kilowatts),
            is_active: is_system_active(records, self.settings.activity_window),
            generation_kwh,
            full_power_hours,
        }
    }
}

fn summarize_month(response: MonthlyStatsResponse) -> MonthlyView {
    let daily: Vec<DailyProduction> = normalize_monthly_items(&response.records);
    let total_production_kwh = calculate_total_production(&daily);
    let totals = response.statistics.as_ref().map(calculate_monthly_totals);

    // 月统计缺失或发电量为 0 时，以各日之和代替
    let monthly_generation_kwh = totals
        .as_ref()
        .map(|t| t.total_generation)
        .filter(|generation| *generation > 0.0)
        .unwrap_or(total_production_kwh);

    MonthlyView {
        monthly_generation_kwh,
        total_production_kwh,
        average_production_kwh: average_daily_production(&daily),
        peak_day_kwh: peak_day_generation(&daily),
        active_days: active_days(&daily),
        statistics: response.statistics,
        daily,
        totals,
    }
}

/// 单日数据不可用时展示给用户的说明
pub fn describe_day_error(date: NaiveDate, err: &AppError) -> String {
    let date_str = format_long_date(date);

    let (status, transport, message) = match err {
        AppError::Upstream { source, .. } => (
            source.status().map(|s| s.as_u16()),
            source.is_transport(),
            source.to_string(),
        ),
        other => (None, false, other.to_string()),
    };

    if status == Some(404) || message.to_lowercase().contains("not found") {
        format!(
            "No solar data available for {}. This date may be before system installation or data recording began.",
            date_str
        )
    } else if transport {
        format!(
            "Network error while fetching data for {}. Please check your internet connection and try again.",
            date_str
        )
    } else {
        format!("Failed to load solar data for {}: {}", date_str, message)
    }
}

/// 刷新失败时展示给用户的严重错误说明
pub fn describe_critical_error(err: &AppError) -> String {
    format!(
        "Critical Error: {}. Please refresh the page or contact technical support if the problem persists.",
        err
    )
}
