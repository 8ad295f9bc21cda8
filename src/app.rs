use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit};
use http::{HeaderName, HeaderValue, Method, Request, StatusCode, header};
use tower::Layer;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    normalize_path::{NormalizePath, NormalizePathLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::{AppConfig, CorsConfig, StorageBackend},
    database,
    error::{AppError, Result},
    middleware::{REQUEST_ID_HEADER, request_id_middleware},
    routes,
    storage::{InMemoryStorage, PgStorage, Storage},
};

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}

/// Connects the configured storage backend and assembles the router.
pub async fn build(config: &AppConfig) -> Result<Router> {
    let storage: Arc<dyn Storage> = match config.storage {
        StorageBackend::Postgres => {
            let pool = database::create_pool(&config.database).await?;
            Arc::new(PgStorage::new(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on restart");
            Arc::new(InMemoryStorage::new())
        }
    };

    router(AppState::new(storage), config)
}

/// Routes plus the middleware stack, outermost last: body limit, timeout,
/// panic recovery, request id, tracing, then CORS when configured.
pub fn router(state: AppState, config: &AppConfig) -> Result<Router> {
    let app = routes::create_router()
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.server.timeout,
        ))
        .layer(CatchPanicLayer::new())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state);

    let app = match &config.cors {
        Some(cors) => app.layer(cors_layer(cors)?),
        None => app,
    };

    Ok(app)
}

/// Trims trailing slashes before routing, so `/products/` hits `/products`.
/// This has to wrap the router from outside; a `Router::layer` runs after
/// the route is already chosen.
pub fn normalize_path(router: Router) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router)
}

fn cors_layer(config: &CorsConfig) -> Result<CorsLayer> {
    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| AppError::ConfigError(format!("Invalid CORS origin: {}", origin)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
        .allow_origin(allowed_origins))
}
