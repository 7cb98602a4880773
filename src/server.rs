use axum::{
    Router,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Duration;

use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use tracing::info;

use crate::AppState;
use crate::config::AppConfig;
use crate::routes::{self, CHAT_PATH, api, auth, chat};
use crate::session::gate::LOGIN_PATH;

/// Upper bound for any single request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Stylesheet directory, independent of the working directory.
const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/login", post(api::login))
        .route("/logout", post(api::logout))
        .route("/conversation", get(api::conversation))
        .route("/conversation/messages", post(api::post_message));

    Router::new()
        .route("/", get(routes::index))
        .route(LOGIN_PATH, get(auth::login_page).post(auth::login_submit))
        .route("/logout", post(auth::logout))
        .route(CHAT_PATH, get(chat::chat_page).post(chat::chat_submit))
        .nest("/api", api)
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(
            |req: Request, next: Next| async move {
                match tokio::time::timeout(REQUEST_TIMEOUT, next.run(req)).await {
                    Ok(res) => res,
                    Err(_) => (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response(),
                }
            },
        ))
        .with_state(state)
}

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    info!(
        name: "chat.config.loaded",
        reply_delay_ms = config.chat.reply_delay_ms,
        seeded = config.chat.seed.is_some(),
        "Chat configuration loaded"
    );

    let state = AppState::new(Arc::clone(&config))?;
    let app = router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(name: "server.stopped", "Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!(name: "server.shutdown", "Shutdown signal received");
}
