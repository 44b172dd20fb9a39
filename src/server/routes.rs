use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, routing::post, Router};

#[cfg(feature = "admin-api")]
use axum::routing::{get, patch};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tracing::info;

use crate::errors::ProbeResult;
use crate::server::handlers::{
    check_license_handler, method_not_allowed_handler, preflight_handler, AppState,
};
use crate::server::logging::request_logging_middleware;

#[cfg(feature = "admin-api")]
use crate::server::admin::{
    create_license_handler, list_licenses_handler, update_validity_handler,
};
use crate::server::store::LicenseStore;

/// Path the license endpoint is mounted on.
pub const LICENSE_PATH: &str = "/api";

/// Build the router for the license endpoint.
///
/// # Routes
/// - `POST /api` - Check a client/key pair
/// - `OPTIONS /api` - CORS preflight
/// - `GET /api` - Always 405
///
/// ## Admin endpoints (requires `admin-api` feature)
/// - `POST /api/admin/licenses` - Create a license
/// - `GET /api/admin/licenses` - List licenses, latest expiry first
/// - `PATCH /api/admin/licenses/:client_id` - Update a client's validity
pub fn build_router(state: AppState) -> Router {
    let router = Router::new().route(
        LICENSE_PATH,
        post(check_license_handler)
            .options(preflight_handler)
            .get(method_not_allowed_handler),
    );

    #[cfg(feature = "admin-api")]
    let router = router
        .route(
            "/api/admin/licenses",
            post(create_license_handler).get(list_licenses_handler),
        )
        .route(
            "/api/admin/licenses/:client_id",
            patch(update_validity_handler),
        );

    router
        .layer(ServiceBuilder::new().layer(middleware::from_fn(request_logging_middleware)))
        .with_state(state)
}

/// Bind `addr` and serve `store` on a background task.
///
/// Returns the actual bound address, so port 0 can be used for an ephemeral port.
pub async fn spawn_server(addr: SocketAddr, store: LicenseStore) -> ProbeResult<SocketAddr> {
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    let router = build_router(AppState {
        store: Arc::new(store),
    });

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router.into_make_service()).await {
            tracing::error!(error = %e, "License server stopped");
        }
    });

    info!(addr = %local_addr, "License server listening");
    Ok(local_addr)
}
