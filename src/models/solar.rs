//! 上游光伏监控 API 数据结构
//!
//! 只声明派生计算需要的字段，其余字段在校验时忽略，透传时原样保留

use crate::errors::{AppError, UpstreamError};
use bytes::Bytes;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::marker::PhantomData;

/// 数值字段为 null 时按 0 处理
fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(|v| v.unwrap_or(0.0))
}

/// `records` 为 null 或不是数组时按空列表处理，数组元素仍按结构校验
fn lenient_records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(D::Error::custom))
            .collect(),
        Value::Null => Ok(Vec::new()),
        other => {
            tracing::warn!(records = %other, "上游 records 不是数组，按空列表处理");
            Ok(Vec::new())
        }
    }
}

/// 单条 5 分钟功率采样
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PowerRecord {
    /// 采样时间（Unix 秒）
    pub date_time: i64,
    /// 瞬时发电功率（W）
    #[serde(default, deserialize_with = "null_as_zero")]
    pub generation_power: f64,
    #[serde(default)]
    pub system_id: Option<i64>,
    #[serde(default)]
    pub use_power: Option<f64>,
    #[serde(default)]
    pub grid_power: Option<f64>,
    #[serde(default)]
    pub buy_power: Option<f64>,
    #[serde(default)]
    pub charge_power: Option<f64>,
    #[serde(default)]
    pub discharge_power: Option<f64>,
    #[serde(default)]
    pub battery_soc: Option<f64>,
    #[serde(default)]
    pub battery_power: Option<f64>,
    #[serde(default)]
    pub generation_capacity: Option<f64>,
    #[serde(default)]
    pub time_zone_offset: Option<f64>,
}

impl PowerRecord {
    /// 构造只含发电功率的采样（测试与示例数据使用）
    pub fn new(date_time: i64, generation_power: f64) -> Self {
        Self {
            date_time,
            generation_power,
            system_id: None,
            use_power: None,
            grid_power: None,
            buy_power: None,
            charge_power: None,
            discharge_power: None,
            battery_soc: None,
            battery_power: None,
            generation_capacity: None,
            time_zone_offset: None,
        }
    }
}

/// 日统计（按天聚合）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PowerStatistics {
    #[serde(default)]
    pub system_id: Option<i64>,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// 当日累计发电量（kWh）
    #[serde(default, deserialize_with = "null_as_zero")]
    pub generation_value: f64,
    /// 满发小时数
    #[serde(default, deserialize_with = "null_as_zero")]
    pub full_power_hours_day: f64,
    #[serde(default)]
    pub use_value: Option<f64>,
    #[serde(default)]
    pub grid_value: Option<f64>,
    #[serde(default)]
    pub buy_value: Option<f64>,
    #[serde(default)]
    pub charge_value: Option<f64>,
    #[serde(default)]
    pub discharge_value: Option<f64>,
    #[serde(default)]
    pub income_value: Option<f64>,
}

/// 月度汇总中的单日条目，结构与日统计一致
pub type MonthlyStatItem = PowerStatistics;

/// 月统计，`day` 为 0 表示整月汇总
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStatistics {
    #[serde(default)]
    pub system_id: Option<i64>,
    pub year: i32,
    pub month: u32,
    #[serde(default)]
    pub day: u32,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub generation_value: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub full_power_hours_day: f64,
    #[serde(default)]
    pub use_value: Option<f64>,
    #[serde(default)]
    pub grid_value: Option<f64>,
    #[serde(default)]
    pub buy_value: Option<f64>,
    #[serde(default)]
    pub income_value: Option<f64>,
}

impl MonthlyStatistics {
    /// 是否为整月汇总（而非单日）
    pub fn is_month_summary(&self) -> bool {
        self.day == 0
    }
}

/// 单日功率历史响应（`.../record`）
///
/// records 在上游不保证按时间排序
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PowerHistoryResponse {
    #[serde(default)]
    pub statistics: Option<PowerStatistics>,
    #[serde(default, deserialize_with = "lenient_records")]
    pub records: Vec<PowerRecord>,
}

/// 月度统计响应（`.../stats/month`）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyStatsResponse {
    #[serde(default)]
    pub statistics: Option<MonthlyStatistics>,
    #[serde(default, deserialize_with = "lenient_records")]
    pub records: Vec<MonthlyStatItem>,
}

/// 上游 2xx 响应体
///
/// 保存上游原始字节，代理按字节原样转发；只有聚合计算才按 `T` 解析
#[derive(Debug, Clone)]
pub struct UpstreamPayload<T> {
    label: &'static str,
    raw: Bytes,
    _schema: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> UpstreamPayload<T> {
    /// `label` 为解析失败时对外的错误标签
    pub fn new(label: &'static str, raw: impl Into<Bytes>) -> Self {
        Self {
            label,
            raw: raw.into(),
            _schema: PhantomData,
        }
    }

    pub fn raw(&self) -> &Bytes {
        &self.raw
    }

    pub fn into_raw(self) -> Bytes {
        self.raw
    }

    /// 按约定结构解析，不符合时为 `Malformed` 并附带原始响应体
    pub fn parse(&self) -> Result<T, AppError> {
        serde_json::from_slice(&self.raw).map_err(|e| {
            tracing::error!(label = self.label, error = %e, "上游响应结构不符合约定");
            AppError::upstream(
                self.label,
                UpstreamError::Malformed {
                    message: format!(
                        "Upstream response did not match the expected schema: {}",
                        e
                    ),
                    body: UpstreamError::capture_body(&self.raw),
                },
            )
        })
    }
}
