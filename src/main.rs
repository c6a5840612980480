use axum::{
    routing::{get, post},
    Router,
};
use drop_station_rust::{
    config::LogConfig, intake::ensure_output_dir, logging, server::handlers, AppState,
};
use std::path::PathBuf;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::info;

/// 检测前端资源目录（拖放上传页面）
/// 按优先级尝试以下路径：
/// 1. ./frontend/dist - 开发环境标准路径
/// 2. ./frontend - 打包路径（dist 内容直接在 frontend 下）
/// 3. /app/frontend - 容器部署路径
/// 4. {exe_dir}/frontend - 相对于可执行文件的路径
fn detect_frontend_dir() -> PathBuf {
    let mut candidates = vec![
        PathBuf::from("./frontend/dist"),
        PathBuf::from("./frontend"),
        PathBuf::from("/app/frontend"),
    ];

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.push(exe_dir.join("frontend"));
        }
    }

    for path in &candidates {
        // 必须包含 index.html 才算有效的前端构建
        if path.join("index.html").is_file() {
            info!("✓ 找到前端资源目录: {:?}", path);
            return path.clone();
        }
    }

    let default = PathBuf::from("./frontend");
    tracing::warn!(
        "未找到前端资源目录，使用默认路径: {:?}（拖放页面将不可用，API 不受影响）",
        default
    );
    default
}

/// 加载日志配置
///
/// 尝试从配置文件加载，失败时返回默认配置
async fn load_log_config() -> LogConfig {
    let config_path = "config/app.toml";
    if let Ok(content) = tokio::fs::read_to_string(config_path).await {
        if let Ok(config) = toml::from_str::<toml::Value>(&content) {
            if let Some(log_table) = config.get("log") {
                if let Ok(log_config) = log_table.clone().try_into::<LogConfig>() {
                    return log_config;
                }
            }
        }
    }

    LogConfig::default()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 先加载日志配置，失败时使用默认配置
    let log_config = load_log_config().await;

    // 初始化日志系统（必须保持 _log_guard 存活）
    let _log_guard = logging::init_logging(&log_config);

    info!("Drop Station Rust 启动中...");

    // 创建应用状态
    let app_state = AppState::new().await?;
    let config = app_state.config.clone();
    let addr = format!("{}:{}", config.server.host, config.server.port);

    // 启动时幂等创建输出目录（请求时还会再检查一次）
    ensure_output_dir(&config.storage.output_dir).await?;
    info!("输出目录: {:?}", config.storage.output_dir);

    // 配置中间件层
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http()) // HTTP 请求日志
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // 静态文件服务（拖放上传页面）
    let frontend_dir = detect_frontend_dir();
    let index_html_path = frontend_dir.join("index.html");
    let static_service =
        ServeDir::new(&frontend_dir).not_found_service(ServeFile::new(&index_html_path));

    // 构建完整应用
    let app = Router::new()
        .route("/store", post(handlers::store_content))
        .route("/health", get(handlers::health_check))
        .with_state(app_state)
        .fallback_service(static_service)
        .layer(middleware);

    info!("服务器启动在: http://{}", addr);
    info!("存储接口: POST http://{}/store", addr);
    info!("健康检查: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let server = axum::serve(listener, app);

    // 监听关闭信号，支持优雅关闭
    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("服务器错误: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("收到 Ctrl+C，开始优雅关闭...");
        }
    }

    info!("应用已安全退出");
    Ok(())
}
