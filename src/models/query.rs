//! 代理接口查询参数

use crate::errors::AppError;
use crate::utils::{non_empty, parse_date, parse_int_param};
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

/// `/api/solar` 原始查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyRecordQuery {
    pub year: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
}

/// `/api/solar/monthly` 原始查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonthlySummaryQuery {
    pub year: Option<String>,
    pub month: Option<String>,
}

/// `/api/dashboard` 查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardQuery {
    /// "YYYY-MM-DD"，缺省为实时视图
    pub date: Option<String>,
}

/// 校验后的单日参数
///
/// 日期是否真实存在（如 2 月 30 日）不在本地校验，以上游为准
#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate)]
pub struct DailyRecordParams {
    #[validate(range(min = 1000, max = 9999, message = "year must be a four-digit number"))]
    pub year: i32,
    #[validate(range(min = 1, max = 12, message = "month must be between 1 and 12"))]
    pub month: u32,
    #[validate(range(min = 1, max = 31, message = "day must be between 1 and 31"))]
    pub day: u32,
}

/// 校验后的月度参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate)]
pub struct MonthlySummaryParams {
    #[validate(range(min = 1000, max = 9999, message = "year must be a four-digit number"))]
    pub year: i32,
    #[validate(range(min = 1, max = 12, message = "month must be between 1 and 12"))]
    pub month: u32,
}

impl DailyRecordQuery {
    pub const MISSING_MESSAGE: &'static str =
        "Missing required parameters: year, month, and day are required";

    pub fn into_params(self) -> Result<DailyRecordParams, AppError> {
        let (Some(year), Some(month), Some(day)) =
            (non_empty(self.year), non_empty(self.month), non_empty(self.day))
        else {
            return Err(AppError::ValidationError(Self::MISSING_MESSAGE.to_string()));
        };

        let params = DailyRecordParams {
            year: parse_int_param("year", &year)?,
            month: parse_int_param("month", &month)?,
            day: parse_int_param("day", &day)?,
        };
        params
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        Ok(params)
    }
}

impl MonthlySummaryQuery {
    pub const MISSING_MESSAGE: &'static str =
        "Missing required parameters: year and month are required";

    pub fn into_params(self) -> Result<MonthlySummaryParams, AppError> {
        let (Some(year), Some(month)) = (non_empty(self.year), non_empty(self.month)) else {
            return Err(AppError::ValidationError(Self::MISSING_MESSAGE.to_string()));
        };

        let params = MonthlySummaryParams {
            year: parse_int_param("year", &year)?,
            month: parse_int_param("month", &month)?,
        };
        params
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        Ok(params)
    }
}

impl DashboardQuery {
    /// 解析日期，缺省返回 None
    pub fn date(&self) -> Result<Option<NaiveDate>, AppError> {
        match non_empty(self.date.clone()) {
            None => Ok(None),
            Some(s) => parse_date(&s).map(Some).map_err(|_| {
                AppError::ValidationError(format!("Invalid date '{}': expected YYYY-MM-DD", s))
            }),
        }
    }
}
