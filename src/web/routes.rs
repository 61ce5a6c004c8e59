use crate::config::WebConfig;
use crate::error::{AppError, AppResult};
use crate::upstream::{UpstreamClient, WALLET_GEN_PATH};
use crate::web::view::{qr_svg, IndexPage};
use axum::{
    extract::{Query, RawQuery, State},
    http::{header, HeaderValue},
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// Value sent on every API response so neither browsers nor intermediaries
/// keep a copy of generated wallets.
pub const NO_STORE: &str = "no-store, max-age=0";

/// Shared state for web handlers
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
    pub web: Arc<WebConfig>,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Forward a generation request upstream and relay the JSON body untouched.
///
/// The caller's query (usually its own `_` cache-buster) is only logged; any
/// shape is accepted.
pub async fn generate_wallet(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> AppResult<impl IntoResponse> {
    debug!("walletGen requested (client query={:?})", query);
    let wallet: Value = state.upstream.generate_wallet().await?;
    info!("Relayed generated wallet to client");
    Ok(Json(wallet))
}

#[derive(Debug, Deserialize)]
pub struct QrParams {
    #[serde(default)]
    pub data: String,
}

/// Render `data` as an SVG QR code
pub async fn qr_code(Query(params): Query<QrParams>) -> AppResult<impl IntoResponse> {
    let svg = qr_svg(&params.data)?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

/// Serve the generator page
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let page = IndexPage::new(&state.web);
    page.render_html()
        .map(Html)
        .map_err(|e| AppError::internal(format!("template render failed: {}", e)))
}

/// Create the web router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route(WALLET_GEN_PATH, get(generate_wallet))
        .route("/api/qr", get(qr_code))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static(NO_STORE),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::PRAGMA,
            HeaderValue::from_static("no-cache"),
        ));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .merge(api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
