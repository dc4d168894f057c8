//! HTTP surface: router, CORS, request tracing, and the serve loop.

pub mod error;
pub mod extract;
pub mod openapi;
pub mod routes;

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::extract::Request;
use axum::http::HeaderValue;
use axum::response::Redirect;
use axum::routing::{any, delete, get, post, put};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

pub use error::ApiError;

use crate::store::RecordStore;

const WILDCARD_ORIGIN: &str = "*";

/// Errors from building or running the server.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("invalid CORS origin {origin:?}")]
    InvalidOrigin { origin: String },

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared handler state. Cloning is cheap; all clones see the same store.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<RecordStore>>,
}

impl AppState {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    pub fn store(&self) -> &Mutex<RecordStore> {
        &self.store
    }
}

/// CORS policy: listed origins only, any method and header, credentials allowed.
///
/// A `*` entry allows every origin. Credentialed responses cannot carry a
/// literal `*`, so the request's own origin is echoed back instead.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, ServerError> {
    let allow_origin = if origins.iter().any(|o| o == WILDCARD_ORIGIN) {
        AllowOrigin::mirror_request()
    } else {
        let values = origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o)
                    .map_err(|_| ServerError::InvalidOrigin { origin: o.clone() })
            })
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(values)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// Build the application router.
///
/// The collection paths also answer without their trailing slash with a 307
/// to the canonical path, which keeps the method and body.
pub fn router(state: AppState, cors: CorsLayer) -> Router {
    let trace = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            tracing::info_span!(
                "request",
                id = %uuid::Uuid::new_v4(),
                method = %req.method(),
                uri = %req.uri(),
            )
        })
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/users/", get(routes::list_users))
        .route("/users", any(|| async { Redirect::temporary("/users/") }))
        .route("/users/create_user/", post(routes::create_user))
        .route(
            "/users/create_user",
            any(|| async { Redirect::temporary("/users/create_user/") }),
        )
        .route("/users/get/{user_id}", get(routes::get_user))
        .route("/users/update_user/{user_id}", put(routes::update_user))
        .route("/users/delete_user/{user_id}", delete(routes::delete_user))
        .route("/openapi.json", get(openapi::document))
        .layer(cors)
        .layer(trace)
        .with_state(state)
}

/// Serve `router` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("server stopped");
    Ok(())
}
