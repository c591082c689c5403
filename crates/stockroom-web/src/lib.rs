//! HTTP surface for Stockroom.
//!
//! ## Routes
//!
//! - `GET|POST /items`, `GET|PUT|PATCH|DELETE /items/:id`
//! - `GET /items/categories`, `GET /items/recent_items`
//! - `GET /weather?city=`
//! - `GET /dashboard` (HTML), `GET /dashboard/data` (JSON)
//! - `GET /browse` (HTML)
//! - `GET /health`

pub mod error;
pub mod handlers;
pub mod state;
pub mod views;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::routing::get;
use axum::Router;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/items",
            get(handlers::list_items).post(handlers::create_item),
        )
        .route("/items/categories", get(handlers::categories))
        .route("/items/recent_items", get(handlers::recent_items))
        .route(
            "/items/:id",
            get(handlers::get_item)
                .put(handlers::replace_item)
                .patch(handlers::patch_item)
                .delete(handlers::delete_item),
        )
        .route("/weather", get(handlers::weather))
        .route("/dashboard", get(handlers::dashboard))
        .route("/dashboard/data", get(handlers::dashboard_data))
        .route("/browse", get(handlers::browse))
        .with_state(state)
}

/// Serve the router at `addr` (e.g. `"127.0.0.1:8000"`) until the process exits.
pub async fn serve(state: AppState, addr: &str) -> Result<(), std::io::Error> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await
}
