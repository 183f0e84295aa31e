//! 数据模型模块

mod common;
mod dashboard;
mod query;
mod solar;

pub use common::*;
pub use dashboard::*;
pub use query::*;
pub use solar::*;
