//! Gate 应用装配：路由、CORS 与监听。

use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, get_service, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeFile,
};
use tracing::{info, warn};

use crate::{
    auth::{
        credentials::CredentialStore,
        guard::protect,
        handlers::{login_handler, me_handler, verify_handler},
    },
    banner::print_startup_banner,
    config::{AppConfig, SecretSource},
    state::AppState,
};

/// Gate 入口：解析配置并启动 HTTP 路由。
pub(crate) async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    if config.secret_source == SecretSource::Generated {
        warn!("AUTH_SECRET_KEY not set; using a random per-process secret, tokens will not survive restart");
    }
    if !config.index_path().is_file() {
        warn!("static page not found: {}", config.index_path().display());
    }

    let addr = config.listen_addr();
    let state = AppState::new(config, CredentialStore::default());
    let app = build_router(state.clone());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    print_startup_banner(&state.config, &state.credentials);
    info!("gate listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

/// 组装全部路由；受保护路由经 [`protect`] 包裹。
pub(crate) fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    Router::new()
        .route(
            "/",
            get_service(ServeFile::new(state.config.index_path())),
        )
        .route("/healthz", get(healthz))
        .route("/api/login", post(login_handler))
        .route("/api/me", protect(&state, get(me_handler)))
        .route("/api/verify", protect(&state, get(verify_handler)))
        .layer(cors)
        .with_state(state)
}

/// 健康检查接口。
async fn healthz() -> &'static str {
    "ok"
}
