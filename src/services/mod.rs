//! 业务逻辑层（Service）

mod dashboard_service;
mod solar_client;

pub use dashboard_service::{describe_critical_error, describe_day_error, DashboardService};
pub use solar_client::{
    SolarApiClient, SolarSource, DAILY_RECORD_LABEL, MISSING_TOKEN_MESSAGE, MONTHLY_SUMMARY_LABEL,
};
