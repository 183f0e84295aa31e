//! 安全模块

mod tls;

pub use tls::*;
