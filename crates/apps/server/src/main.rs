use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod substack;

pub const DEFAULT_USER_AGENT: &str = "QBU-Vibraline/1.0";
pub const DEFAULT_CACHE_CONTROL: &str = "s-maxage=300, stale-while-revalidate=600";
pub const DEFAULT_POST_LIMIT: u32 = 10;

#[derive(Clone)]
pub struct AppState {
    relay: Arc<RelayConfig>,
    http: reqwest::Client,
}

impl AppState {
    fn new(relay: RelayConfig) -> Self {
        Self {
            relay: Arc::new(relay),
            http: reqwest::Client::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RelayConfig {
    pub user_agent: String,
    pub post_limit: u32,
    pub cache_control: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            post_limit: DEFAULT_POST_LIMIT,
            cache_control: DEFAULT_CACHE_CONTROL.to_string(),
        }
    }
}

impl RelayConfig {
    fn from_env() -> Self {
        Self {
            user_agent: env::var("RELAY_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            post_limit: env_var_u32("RELAY_POST_LIMIT", DEFAULT_POST_LIMIT).max(1),
            cache_control: env::var("RELAY_CACHE_CONTROL")
                .unwrap_or_else(|_| DEFAULT_CACHE_CONTROL.to_string()),
        }
    }
}

fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/substack", get(substack::substack_posts))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let addr: SocketAddr = env::var("RELAY_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:9200".to_string())
        .parse()
        .expect("invalid RELAY_ADDR");

    let relay = RelayConfig::from_env();
    info!(
        "relay config: limit={} user_agent={:?}",
        relay.post_limit, relay.user_agent
    );
    let app = router(AppState::new(relay));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind {addr}: {err}");
            return;
        }
    };
    info!("feed relay listening on http://{addr}");
    if let Err(err) = axum::serve(listener, app).await {
        error!("server error: {err}");
    }
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

fn env_var_u32(key: &str, default: u32) -> u32 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
