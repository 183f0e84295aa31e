//! 上游光伏监控 API 客户端
//!
//! 固定设备，两个只读接口：单日 5 分钟功率记录、整月按日汇总。
//! 不重试、不缓存、不覆盖传输层默认超时，每次调用都直接请求上游。

use crate::config::{Settings, UpstreamSettings};
use crate::errors::{AppError, UpstreamError};
use crate::models::{MonthlyStatsResponse, PowerHistoryResponse, UpstreamPayload};
use crate::security::build_upstream_client;
use reqwest::{header, Client};
use secrecy::{ExposeSecret, SecretString};
use serde::de::{DeserializeOwned, IgnoredAny};
use std::time::Instant;

/// 单日接口失败时对外的错误标签
pub const DAILY_RECORD_LABEL: &str = "Failed to fetch power history";
/// 月度接口失败时对外的错误标签
pub const MONTHLY_SUMMARY_LABEL: &str = "Failed to fetch monthly stats";
/// 未配置令牌时的错误信息
pub const MISSING_TOKEN_MESSAGE: &str = "TOKEN environment variable is not set";

/// 光伏数据源（用于依赖注入）
#[async_trait::async_trait]
pub trait SolarSource: Send + Sync {
    /// 访问凭据是否已配置
    fn is_configured(&self) -> bool {
        true
    }

    /// 单日 5 分钟粒度功率记录
    async fn fetch_daily_record(
        &self,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<UpstreamPayload<PowerHistoryResponse>, AppError>;

    /// 整月按日汇总
    async fn fetch_monthly_summary(
        &self,
        year: i32,
        month: u32,
    ) -> Result<UpstreamPayload<MonthlyStatsResponse>, AppError>;
}

/// 上游 API 客户端
pub struct SolarApiClient {
    client: Client,
    base_url: String,
    device_id: String,
    token: Option<SecretString>,
}

impl SolarApiClient {
    /// 创建客户端，TLS 配置无效时失败
    pub fn new(settings: &Settings, token: Option<SecretString>) -> Result<Self, AppError> {
        Self::from_upstream(&settings.upstream, token)
    }

    pub fn from_upstream(
        upstream: &UpstreamSettings,
        token: Option<SecretString>,
    ) -> Result<Self, AppError> {
        if token.is_none() {
            tracing::warn!("上游令牌未配置（SOLAR_API_TOKEN / TOKEN），代理请求将返回配置错误");
        }

        Ok(Self {
            client: build_upstream_client(&upstream.tls)?,
            base_url: upstream.base_url.trim_end_matches('/').to_string(),
            device_id: upstream.device_id.clone(),
            token,
        })
    }

    fn bearer(&self) -> Result<&str, AppError> {
        self.token
            .as_ref()
            .map(|t| t.expose_secret().as_str())
            .ok_or_else(|| AppError::ConfigError(MISSING_TOKEN_MESSAGE.to_string()))
    }

    fn endpoint_url(&self, suffix: &str) -> String {
        format!(
            "{}/maintain-s/history/power/{}/{}",
            self.base_url, self.device_id, suffix
        )
    }

    /// 发起请求，2xx 时只确认响应体是 JSON，不做结构校验
    async fn get_payload<T: DeserializeOwned>(
        &self,
        label: &'static str,
        endpoint: &'static str,
        year: i32,
        month: u32,
        day: Option<u32>,
    ) -> Result<UpstreamPayload<T>, AppError> {
        let token = self.bearer()?;
        let url = self.endpoint_url(endpoint);
        let start = Instant::now();

        let mut query = vec![("year", year.to_string()), ("month", month.to_string())];
        if let Some(day) = day {
            query.push(("day", day.to_string()));
        }

        let response = self
            .client
            .get(&url)
            .query(&query)
            .bearer_auth(token)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!(endpoint, year, month, day, error = %e, "上游请求失败");
                AppError::upstream(label, UpstreamError::from(e))
            })?;

        let status = response.status();
        let raw = response
            .bytes()
            .await
            .map_err(|e| AppError::upstream(label, UpstreamError::from(e)))?;

        tracing::debug!(
            endpoint,
            year,
            month,
            day,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "上游响应"
        );

        if !status.is_success() {
            tracing::error!(endpoint, year, month, day, status = status.as_u16(), "上游返回错误状态");
            return Err(AppError::upstream(
                label,
                UpstreamError::from_status(status, UpstreamError::capture_body(&raw)),
            ));
        }

        if let Err(e) = serde_json::from_slice::<IgnoredAny>(&raw) {
            tracing::error!(endpoint, year, month, day, error = %e, "上游返回非 JSON 响应");
            return Err(AppError::upstream(
                label,
                UpstreamError::Malformed {
                    message: format!("Upstream returned invalid JSON: {}", e),
                    body: UpstreamError::capture_body(&raw),
                },
            ));
        }

        Ok(UpstreamPayload::new(label, raw))
    }
}

#[async_trait::async_trait]
impl SolarSource for SolarApiClient {
    fn is_configured(&self) -> bool {
        self.token.is_some()
    }

    async fn fetch_daily_record(
        &self,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<UpstreamPayload<PowerHistoryResponse>, AppError> {
        self.get_payload(DAILY_RECORD_LABEL, "record", year, month, Some(day))
            .await
    }

    async fn fetch_monthly_summary(
        &self,
        year: i32,
        month: u32,
    ) -> Result<UpstreamPayload<MonthlyStatsResponse>, AppError> {
        self.get_payload(MONTHLY_SUMMARY_LABEL, "stats/month", year, month, None)
            .await
    }
}
