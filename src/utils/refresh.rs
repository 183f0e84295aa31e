//! 自动刷新策略

use crate::config::DashboardSettings;
use crate::models::{DashboardView, RefreshHint};
use chrono::NaiveDate;

/// 计算客户端自动刷新提示
///
/// 实时视图固定短间隔刷新；日期视图只在选中日期为今天时刷新，查看历史日期不刷新
pub fn refresh_hint(view: DashboardView, today: NaiveDate, settings: &DashboardSettings) -> RefreshHint {
    let interval = match view {
        DashboardView::Live => Some(settings.live_refresh_seconds),
        DashboardView::Dated(date) if date == today => Some(settings.dated_refresh_seconds),
        DashboardView::Dated(_) => None,
    };

    RefreshHint {
        auto_refresh: interval.is_some(),
        interval_seconds: interval,
    }
}
