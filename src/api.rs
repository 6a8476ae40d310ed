//! REST API for offer registration and checkout.
//!
//! Endpoints:
//! - `POST /api/v1/offer`: register an offer
//! - `GET /api/v1/offer`: list offers in registration order
//! - `POST /api/v1/cart/apply_offer`: apply the first matching offer to a cart
//! - `GET /health`: health check

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::offer::{ApiResponse, ApplyOfferRequest, ApplyOfferResponse, Offer};
use crate::resolver::OfferResolver;

/// Shared state for axum handlers.
type AppState = Arc<OfferResolver>;

/// Errors from running the HTTP server.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bind `addr` and serve the offer API until the process exits.
pub async fn serve(resolver: Arc<OfferResolver>, addr: &str) -> Result<(), ServeError> {
    let app = router(resolver);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    info!(addr = %local, "offer API listening");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the axum router (separated for testing).
pub fn router(resolver: Arc<OfferResolver>) -> Router {
    Router::new()
        .route("/api/v1/offer", post(register_offer).get(list_offers))
        .route("/api/v1/cart/apply_offer", post(apply_offer))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(resolver)
}

// ============================================================================
// Handlers
// ============================================================================

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn register_offer(
    State(resolver): State<AppState>,
    Json(offer): Json<Offer>,
) -> Json<ApiResponse> {
    info!(
        restaurant_id = offer.restaurant_id,
        offer_type = %offer.offer_type,
        offer_value = offer.offer_value,
        segments = offer.eligible_segments.len(),
        "registering offer"
    );
    resolver.registry().register(offer).await;
    Json(ApiResponse::success())
}

async fn list_offers(State(resolver): State<AppState>) -> Json<Vec<Offer>> {
    Json(resolver.registry().list().await)
}

async fn apply_offer(
    State(resolver): State<AppState>,
    Json(request): Json<ApplyOfferRequest>,
) -> Result<Json<ApplyOfferResponse>, StatusCode> {
    let applied = resolver.apply(&request).await.map_err(|e| {
        error!(user_id = request.user_id, error = %e, "segment lookup failed");
        StatusCode::BAD_GATEWAY
    })?;

    Ok(Json(ApplyOfferResponse {
        cart_value: applied.cart_value,
    }))
}
