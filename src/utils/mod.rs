//! 工具函数模块

mod refresh;
mod solar;
mod time;
mod validators;

pub use refresh::*;
pub use solar::*;
pub use time::*;
pub use validators::*;
