/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config 読み込み → AuthGate 生成 → Router 組み立て
 * - Middleware の適用 (auth gate / http layers)
 * - axum::serve() で起動
 */
use std::{panic, process};

use anyhow::Result;
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::api::v1::handlers::health::health;
use crate::config::Config;
use crate::middleware::{self, auth::build_auth_gate, http::HttpLimits};
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG wins; otherwise a quiet default.
    // ex: RUST_LOG=info,auth_gateway=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Outside production, crash the whole process so it gets noticed.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    let state = AppState::new(build_auth_gate(&config));

    tracing::info!(
        environment = %config.environment,
        auth_disabled = state.gate.policy().is_auth_disabled(),
        "starting gateway on {}",
        config.addr
    );
    if state.gate.policy().is_auth_disabled() {
        tracing::warn!(
            environment = %config.environment,
            "authentication is DISABLED for this environment"
        );
    }

    let app = build_router(state, config.http_limits);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Full router: public `/health`, gated `/api/v1`, HTTP layers around everything.
pub fn build_router(state: AppState, limits: HttpLimits) -> Router {
    let v1 = middleware::auth::access::apply(api::v1::routes(), state.clone());

    let router = Router::new()
        .route("/health", get(health))
        .nest("/api/v1", v1)
        .with_state(state);

    middleware::http::apply(router, limits)
}
