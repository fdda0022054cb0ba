use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use taxvoice_common::{Config, LogFormat, SpendingSource, StaticSpending};
use taxvoice_suggest::{Catalog, SuggestionEngine};

mod prompt;
mod rest;

pub struct AppState {
    pub engine: SuggestionEngine,
    pub spending: Arc<dyn SpendingSource>,
    pub badge_seed: Option<u64>,
}

impl AppState {
    /// Fresh RNG for one request; seeded when `BADGE_SEED` is configured.
    pub fn rng(&self) -> StdRng {
        match self.badge_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        // REST API
        .route("/api/spending", get(rest::api_spending))
        .route("/api/suggestions", post(rest::suggest::api_suggestions))
        .route(
            "/api/generate-ai-prompt",
            post(rest::prompt::api_generate_ai_prompt),
        )
        .with_state(state)
        // CORS
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Nothing is persisted; keep it out of caches too
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::PRAGMA,
            HeaderValue::from_static("no-cache"),
        ))
        // Logging layer: method + path only (no bodies, no query params, no IP)
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}

fn init_tracing(format: LogFormat) -> Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive("taxvoice=info".parse()?)
        .add_directive("api=info".parse()?);

    match format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format)?;

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::builtin()?,
    };

    let engine =
        SuggestionEngine::new(Arc::new(catalog)).with_max_suggestions(config.max_suggestions);

    let state = Arc::new(AppState {
        engine,
        spending: Arc::new(StaticSpending),
        badge_seed: config.badge_seed,
    });

    if let Some(seed) = config.badge_seed {
        info!(seed, "Badge selection is seeded");
    }

    let app = build_router(state);

    let addr = config.bind_addr();
    info!("TaxVoice API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
