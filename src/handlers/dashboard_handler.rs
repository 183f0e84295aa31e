//! 仪表盘 API 处理器

use crate::errors::AppError;
use crate::models::{DashboardQuery, DashboardView, ErrorEnvelope};
use crate::services::{describe_critical_error, DashboardService};
use actix_web::{web, HttpResponse, ResponseError};
use std::sync::Arc;

/// 仪表盘快照
///
/// 不带 `date` 为实时视图；`date=YYYY-MM-DD` 为指定日期视图
pub async fn get_dashboard(
    dashboard_service: web::Data<Arc<DashboardService>>,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse, AppError> {
    let view = match query.date()? {
        Some(date) => DashboardView::Dated(date),
        None => DashboardView::Live,
    };

    match dashboard_service.snapshot(view).await {
        Ok(snapshot) => Ok(HttpResponse::Ok().json(snapshot)),
        Err(e) => {
            // 刷新失败：与单日数据缺失区分，以严重错误呈现
            tracing::error!(error = %e, "仪表盘刷新失败");
            let envelope = e.envelope();
            Ok(HttpResponse::build(e.status_code()).json(ErrorEnvelope {
                error: describe_critical_error(&e),
                details: envelope.details.or(Some(envelope.error)),
                response: envelope.response,
            }))
        }
    }
}
