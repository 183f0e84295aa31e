//! 路由配置模块

use crate::handlers;
use actix_web::web;

/// 配置所有路由
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // 健康检查路由
        .service(
            web::scope("/health")
                .route("", web::get().to(handlers::health))
                .route("/detailed", web::get().to(handlers::health_detailed))
                .route("/live", web::get().to(handlers::live)),
        )
        .service(
            web::scope("/api")
                // 上游代理路由（只读）
                .service(
                    web::scope("/solar")
                        .route("", web::get().to(handlers::get_daily_record))
                        .route("/monthly", web::get().to(handlers::get_monthly_summary)),
                )
                // 仪表盘聚合路由
                .route("/dashboard", web::get().to(handlers::get_dashboard)),
        );
}
