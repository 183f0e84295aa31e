//! 通用数据结构

use serde::Serialize;
use serde_json::Value;

/// 统一错误信封
///
/// 缺失的字段直接省略，不输出 null
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            response: None,
        }
    }
}

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub version: String,
    pub upstream: UpstreamStatus,
    pub uptime_seconds: u64,
}

/// 上游配置状态（不发起网络请求）
#[derive(Debug, Serialize)]
pub struct UpstreamStatus {
    pub base_url: String,
    pub device_id: String,
    pub token_configured: bool,
    pub tls_mode: String,
}
