//! HTTP 处理器模块

mod dashboard_handler;
mod health_handler;
mod solar_handler;

pub use dashboard_handler::*;
pub use health_handler::*;
pub use solar_handler::*;
