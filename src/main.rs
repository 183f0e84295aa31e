//! Helianthus - 光伏逆变器监控代理服务
//!
//! 日/月发电数据代理与图表数据聚合

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use helianthus::{
    config::{LoggingSettings, Settings},
    handlers,
    middleware::RequestLogger,
    routes,
    services::{DashboardService, SolarApiClient, SolarSource},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 加载环境变量
    dotenvy::dotenv().ok();

    // 加载配置
    let settings = Arc::new(Settings::load().expect("配置加载失败"));

    // 初始化日志
    init_tracing(&settings.logging);
    handlers::mark_started();

    info!("🌻 Helianthus 服务启动中...");
    info!(
        base_url = %settings.upstream.base_url,
        device_id = %settings.upstream.device_id,
        tls_mode = settings.upstream.tls.mode.as_str(),
        "✅ 配置加载完成"
    );

    // 初始化上游客户端
    let solar_source: Arc<dyn SolarSource> = Arc::new(
        SolarApiClient::new(&settings, Settings::api_token()).expect("上游客户端初始化失败"),
    );
    info!("✅ 上游客户端初始化完成");

    // 初始化服务
    let dashboard_service = Arc::new(DashboardService::new(solar_source.clone(), &settings));

    let server_addr = settings.server_addr();
    let workers = if settings.server.workers == 0 {
        num_cpus::get()
    } else {
        settings.server.workers
    };

    info!("🚀 服务启动在 http://{}", server_addr);
    info!("📊 工作线程数: {}", workers);

    // 启动 HTTP 服务器
    HttpServer::new(move || {
        // 配置 CORS（只读接口，仅允许 GET）
        let cors = Cors::default()
            .allowed_origin_fn(|origin, _req_head| {
                origin.as_bytes().starts_with(b"http://localhost")
                    || origin.as_bytes().starts_with(b"https://")
            })
            .allowed_methods(vec!["GET"])
            .allowed_headers(vec!["Content-Type", "X-Request-ID"])
            .max_age(3600);

        App::new()
            // 全局中间件
            .wrap(cors)
            .wrap(RequestLogger::new())
            .wrap(middleware::Compress::default())
            // 注入服务
            .app_data(web::Data::new(settings.clone()))
            .app_data(web::Data::new(solar_source.clone()))
            .app_data(web::Data::new(dashboard_service.clone()))
            // 配置 HTTP 路由
            .configure(routes::configure)
    })
    .workers(workers)
    .bind(&server_addr)?
    .run()
    .await
}

/// 初始化日志系统
fn init_tracing(logging: &LoggingSettings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if logging.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}
