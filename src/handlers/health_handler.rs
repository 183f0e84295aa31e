//! 健康检查 API 处理器

use crate::config::Settings;
use crate::models::{HealthCheckResponse, UpstreamStatus};
use crate::services::SolarSource;
use actix_web::{web, HttpResponse};
use std::sync::Arc;
use std::time::Instant;

/// 应用启动时间
static START_TIME: once_cell::sync::Lazy<Instant> = once_cell::sync::Lazy::new(Instant::now);

/// 记录启动时间（在 main 中调用）
pub fn mark_started() {
    once_cell::sync::Lazy::force(&START_TIME);
}

/// 简单健康检查（用于负载均衡器）
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok"
    }))
}

/// 详细健康检查
///
/// 只报告本地配置状态，不访问上游
pub async fn health_detailed(
    settings: web::Data<Arc<Settings>>,
    source: web::Data<Arc<dyn SolarSource>>,
) -> HttpResponse {
    let token_configured = source.is_configured();

    let response = HealthCheckResponse {
        status: if token_configured {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        upstream: UpstreamStatus {
            base_url: settings.upstream.base_url.clone(),
            device_id: settings.upstream.device_id.clone(),
            token_configured,
            tls_mode: settings.upstream.tls.mode.as_str().to_string(),
        },
        uptime_seconds: START_TIME.elapsed().as_secs(),
    };

    HttpResponse::Ok().json(response)
}

/// 存活检查（用于 Kubernetes）
pub async fn live() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "alive": true
    }))
}
