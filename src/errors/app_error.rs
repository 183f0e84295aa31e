//! 统一错误类型定义

use super::UpstreamError;
use crate::models::ErrorEnvelope;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};

/// 应用错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // 请求验证错误 (400)
    #[error("{0}")]
    ValidationError(String),

    // 部署缺少必需配置 (500)
    #[error("{0}")]
    ConfigError(String),

    // 上游调用失败 (500)，label 为对外暴露的固定错误标签
    #[error("{label}: {source}")]
    Upstream {
        label: &'static str,
        #[source]
        source: UpstreamError,
    },

    // 内部错误 (500)
    #[error("{0}")]
    InternalError(String),
}

impl AppError {
    pub fn upstream(label: &'static str, source: UpstreamError) -> Self {
        AppError::Upstream { label, source }
    }

    /// 转换为对外错误信封
    pub fn envelope(&self) -> ErrorEnvelope {
        match self {
            AppError::ValidationError(msg)
            | AppError::ConfigError(msg)
            | AppError::InternalError(msg) => ErrorEnvelope::new(msg.clone()),
            AppError::Upstream { label, source } => ErrorEnvelope {
                error: label.to_string(),
                details: Some(source.to_string()),
                response: source.body().cloned(),
            },
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // 记录详细错误日志（内部）
        if status.is_server_error() {
            tracing::error!(error = %self, status = %status, "请求处理错误");
        } else {
            tracing::debug!(error = %self, status = %status, "请求参数错误");
        }

        HttpResponse::build(status).json(self.envelope())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}
