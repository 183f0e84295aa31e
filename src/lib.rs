//! Helianthus - 光伏逆变器监控代理服务
//!
//! 代理第三方光伏监控 API 并生成仪表盘数据，支持：
//! - 单日 5 分钟功率记录代理
//! - 月度按日汇总代理
//! - 24 小时功率曲线与发电指标聚合
//! - 上游自签名证书的指纹固定

pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod security;
pub mod services;
pub mod utils;

pub use errors::AppError;
