use axum::{
    Router,
    extract::{DefaultBodyLimit, Request},
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
};
use std::sync::Arc;
use std::time::Duration;

use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use tracing::info;

use crate::AppState;
use crate::config::AppConfig;
use crate::{api, ui};

/// Interval between sweeps of idle guests.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Assemble the router: chat API, page and fragment routes, static assets.
pub fn build_router(state: AppState) -> Router {
    let timeout = state.config.server.request_timeout();
    let static_dir = state.config.server.static_dir.clone();

    Router::new()
        .merge(api::router())
        .merge(ui::router())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(axum::middleware::from_fn(
            move |req: Request, next: Next| async move {
                match tokio::time::timeout(timeout, next.run(req)).await {
                    Ok(res) => res,
                    Err(_) => (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response(),
                }
            },
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Periodically drop guests idle longer than the configured timeout.
fn spawn_guest_sweeper(state: &AppState) {
    let guests = state.guests.clone();
    let idle = state.config.session.idle_timeout();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let removed = guests.cleanup_expired_with_timeout(idle);
            if removed > 0 {
                info!(name: "session.swept", removed, remaining = guests.len(), "Idle guests removed");
            }
        }
    });
}

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let state = AppState::new((*config).clone())?;

    info!(
        name: "widget.config.loaded",
        variant = %config.widget.variant,
        backend = config.widget.backend_url.as_deref().unwrap_or("in-process"),
        "Widget configuration loaded"
    );

    spawn_guest_sweeper(&state);
    let app = build_router(state);

    let addr = config.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
