use axum::{
    BoxError, Router, serve,
    error_handling::HandleErrorLayer,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post}
};
use chrono::Utc;
use jsonwebtoken::DecodingKey;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io,
    net::{IpAddr, SocketAddr},
    sync::Arc,
    time::Duration
};
use tokio::net::TcpListener;
use tower::{
    ServiceBuilder,
    buffer::BufferLayer,
    limit::RateLimitLayer
};
use tower_http::{
    cors::CorsLayer,
    trace::TraceLayer
};
use tracing_subscriber::EnvFilter;

mod app;
mod backend;
mod core;
mod directory;
mod envelope;
mod errors;
mod extractors;
mod handlers;
mod model;
mod prod_core;
mod timelog;
mod token;
mod userinfo;

use crate::{
    app::AppState,
    core::CoreArc,
    errors::AppError,
    prod_core::ProdCore,
    timelog::TimeLogClient,
    token::{TokenCodec, Tutorial},
    userinfo::UserInfoClient
};

impl From<&AppError> for StatusCode {
    fn from(err: &AppError) -> Self {
        match err {
            AppError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::MalformedQuery => StatusCode::BAD_REQUEST,
            AppError::RequestError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
struct HttpError {
    error: String
}

impl From<AppError> for HttpError {
    fn from(err: AppError) -> Self {
        HttpError { error: format!("{}", err) }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = StatusCode::from(&self);
        let body = Json(HttpError::from(self));
        (code, body).into_response()
    }
}

fn routes(api: &str) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{api}/"),
            get(handlers::root_get)
        )
        .route(
            &format!("{api}/state"),
            post(handlers::state_post)
        )
        .route(
            &format!("{api}/task/{{unit}}/{{task}}"),
            post(handlers::task_unit_task_post)
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::very_permissive())
        )
}

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("{0}")]
    AddrParseError(#[from] std::net::AddrParseError),
    #[error("{0}")]
    TomlParseError(#[from] toml::de::Error),
    #[error("{0}")]
    IOError(#[from] io::Error)
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub jwt_key: String,
    pub time_token_secret: String,
    pub api_base_path: String,
    pub listen_ip: String,
    pub listen_port: u16,
    pub userinfo_url: String,
    pub timelog_url: String
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config: Config = toml::from_str(&fs::read_to_string("config.toml")?)?;

    let (writer, _guard) = tracing_appender::non_blocking(io::stdout());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(writer)
        .init();
    std::panic::set_hook(Box::new(tracing_panic::panic_hook));

    let core = ProdCore {
        directory: UserInfoClient::new(&config.userinfo_url),
        backend: TimeLogClient::new(&config.timelog_url),
        codec: TokenCodec::new(config.time_token_secret.as_bytes()),
        tutorial: Tutorial::FinancialServices,
        now: Utc::now
    };

    let state = AppState {
        core: Arc::new(core) as CoreArc,
        jwt_key: DecodingKey::from_secret(config.jwt_key.as_bytes())
    };

    let app = routes(&config.api_base_path)
        .with_state(state)
        .layer(
            ServiceBuilder::new().layer(
                HandleErrorLayer::new(|err: BoxError| async move {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Unhandled error: {}", err)
                    )
                })
            )
            .layer(BufferLayer::new(1024))
            .layer(RateLimitLayer::new(50, Duration::from_secs(1)))
        );

    let ip: IpAddr = config.listen_ip.parse()?;
    let addr = SocketAddr::from((ip, config.listen_port));
    let listener = TcpListener::bind(addr).await?;
    serve(listener, app).await?;

    Ok(())
}
