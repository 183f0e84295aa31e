//! 上游 API 错误类型

use reqwest::StatusCode;
use serde_json::Value;

/// 上游调用失败
///
/// 保留上游状态码与错误响应体，原样透传给调用方用于排障
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// 未收到响应（连接、DNS、TLS 握手等）
    #[error("{message}")]
    Transport { message: String },

    /// 上游返回非 2xx 状态码
    #[error("{message}")]
    Status {
        status: StatusCode,
        message: String,
        body: Option<Value>,
    },

    /// 响应体不是合法 JSON 或不符合约定结构
    #[error("{message}")]
    Malformed { message: String, body: Option<Value> },
}

impl UpstreamError {
    /// 保留响应体用于排障：能解析为 JSON 则原样保留，否则保留原始文本，空响应体为 None
    pub fn capture_body(raw: &[u8]) -> Option<Value> {
        let text = String::from_utf8_lossy(raw);
        if text.trim().is_empty() {
            return None;
        }
        Some(serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text.into_owned())))
    }

    pub(crate) fn from_status(status: StatusCode, body: Option<Value>) -> Self {
        UpstreamError::Status {
            status,
            message: format!("Request failed with status code {}", status.as_u16()),
            body,
        }
    }

    /// 上游状态码（仅非 2xx 响应时存在）
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 上游错误响应体
    pub fn body(&self) -> Option<&Value> {
        match self {
            UpstreamError::Status { body, .. } | UpstreamError::Malformed { body, .. } => {
                body.as_ref()
            }
            _ => None,
        }
    }

    /// 是否为网络层错误
    pub fn is_transport(&self) -> bool {
        matches!(self, UpstreamError::Transport { .. })
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => UpstreamError::from_status(status, None),
            None => UpstreamError::Transport {
                message: err.to_string(),
            },
        }
    }
}
