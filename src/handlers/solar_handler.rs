//! 光伏数据代理 API 处理器
//!
//! 校验查询参数后转发到上游，成功时按字节原样返回上游响应体（不重排字段）

use crate::errors::AppError;
use crate::models::{DailyRecordQuery, MonthlySummaryQuery};
use crate::services::SolarSource;
use actix_web::{http::header::ContentType, web, HttpResponse};
use std::sync::Arc;

/// 单日 5 分钟功率记录
///
/// `GET /api/solar?year=YYYY&month=M&day=D`
pub async fn get_daily_record(
    source: web::Data<Arc<dyn SolarSource>>,
    query: web::Query<DailyRecordQuery>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner().into_params()?;

    let response = source
        .fetch_daily_record(params.year, params.month, params.day)
        .await?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(response.into_raw()))
}

/// 整月按日汇总
///
/// `GET /api/solar/monthly?year=YYYY&month=M`
pub async fn get_monthly_summary(
    source: web::Data<Arc<dyn SolarSource>>,
    query: web::Query<MonthlySummaryQuery>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner().into_params()?;

    let response = source
        .fetch_monthly_summary(params.year, params.month)
        .await?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(response.into_raw()))
}
