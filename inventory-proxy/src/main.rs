use std::net::SocketAddr;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_UPSTREAM: &str = "https://dev.electorq.com/dummy/inventory";

#[derive(Clone)]
struct AppState {
    client: reqwest::Client,
    upstream: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let upstream =
        std::env::var("UPSTREAM_INVENTORY_URL").unwrap_or_else(|_| DEFAULT_UPSTREAM.to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let state = AppState {
        client: reqwest::Client::new(),
        upstream,
    };

    let app = Router::new()
        .route("/api/inventory", get(get_inventory))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("inventory proxy listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Pass-through to the upstream inventory endpoint. The body is relayed
/// verbatim (including upstream error bodies) as application/json; only a
/// transport failure becomes a 502.
async fn get_inventory(State(state): State<AppState>) -> Response {
    info!("GET /api/inventory -> {}", state.upstream);

    match relay(&state).await {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(err) => {
            error!("upstream fetch failed: {err:#}");
            (
                StatusCode::BAD_GATEWAY,
                format!("upstream inventory fetch failed: {err}"),
            )
                .into_response()
        }
    }
}

async fn relay(state: &AppState) -> anyhow::Result<Vec<u8>> {
    let response = state.client.get(&state.upstream).send().await?;
    Ok(response.bytes().await?.to_vec())
}
