//! 数据验证工具

use crate::errors::AppError;
use std::str::FromStr;

/// 去除空白后为空的参数视为缺失
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 解析整数查询参数
pub fn parse_int_param<T: FromStr>(name: &str, value: &str) -> Result<T, AppError> {
    value.parse::<T>().map_err(|_| {
        AppError::ValidationError(format!("Invalid parameter {}: expected an integer, got '{}'", name, value))
    })
}
