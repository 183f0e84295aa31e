//! 错误类型模块

mod app_error;
mod upstream_error;

pub use app_error::AppError;
pub use upstream_error::UpstreamError;
