//! Shared utilities for integration tests.
//!
//! Runs the offer API and a mock user segment service in-process on random
//! available ports.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use cart_offers::bootstrap::offer_resolver;
use cart_offers::config::Config;
use cart_offers::{api, ApplyOfferRequest, ApplyOfferResponse, Offer};

type Segments = Arc<RwLock<HashMap<i64, String>>>;

#[derive(Deserialize)]
struct SegmentQuery {
    user_id: i64,
}

/// In-process mock user segment service.
///
/// Users without a configured segment get a 404.
pub struct MockSegmentServer {
    segments: Segments,
    _handle: JoinHandle<()>,
    addr: SocketAddr,
}

impl MockSegmentServer {
    pub async fn start() -> Self {
        let segments: Segments = Arc::new(RwLock::new(HashMap::new()));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock segment server");
        let addr = listener.local_addr().expect("Failed to get local address");

        let app = Router::new()
            .route("/api/v1/user_segment", get(handle_segment))
            .with_state(segments.clone());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock segment server failed");
        });

        Self {
            segments,
            _handle: handle,
            addr,
        }
    }

    /// Base URL as the offer service expects it (e.g. "http://127.0.0.1:12345/api/v1").
    pub fn base_url(&self) -> String {
        format!("http://{}/api/v1", self.addr)
    }

    pub async fn set_segment(&self, user_id: i64, segment: &str) {
        self.segments
            .write()
            .await
            .insert(user_id, segment.to_string());
    }
}

async fn handle_segment(
    State(segments): State<Segments>,
    Query(query): Query<SegmentQuery>,
) -> Result<Json<Value>, StatusCode> {
    segments
        .read()
        .await
        .get(&query.user_id)
        .map(|segment| Json(json!({ "segment": segment })))
        .ok_or(StatusCode::NOT_FOUND)
}

/// Offer service running on a random port.
pub struct OfferService {
    client: reqwest::Client,
    _handle: JoinHandle<()>,
    addr: SocketAddr,
}

impl OfferService {
    pub async fn start(config: Config) -> Self {
        let resolver = Arc::new(offer_resolver(&config).expect("Failed to build resolver"));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind offer service");
        let addr = listener.local_addr().expect("Failed to get local address");
        let app = api::router(resolver);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Offer service failed");
        });

        Self {
            client: reqwest::Client::new(),
            _handle: handle,
            addr,
        }
    }

    /// Service backed by `segments`.
    pub async fn with_segments(segments: &MockSegmentServer) -> Self {
        let mut config = Config::for_test();
        config.segment_service.base_url = segments.base_url();
        Self::start(config).await
    }

    /// Service whose segment service is unreachable.
    pub async fn without_segments() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let dead = listener.local_addr().unwrap();
        drop(listener);

        let mut config = Config::for_test();
        config.segment_service.base_url = format!("http://{}/api/v1", dead);
        Self::start(config).await
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn add_offer(&self, offer: &Offer) {
        let response = self
            .client
            .post(self.url("/api/v1/offer"))
            .json(offer)
            .send()
            .await
            .expect("offer request failed");
        assert_eq!(
            response.status(),
            reqwest::StatusCode::OK,
            "Offer should be added successfully"
        );
    }

    pub async fn apply_offer(&self, restaurant_id: i64, user_id: i64, cart_value: i64) -> i64 {
        let response = self
            .client
            .post(self.url("/api/v1/cart/apply_offer"))
            .json(&ApplyOfferRequest {
                restaurant_id,
                user_id,
                cart_value,
            })
            .send()
            .await
            .expect("apply_offer request failed");
        assert_eq!(
            response.status(),
            reqwest::StatusCode::OK,
            "Apply offer should be successful"
        );

        response
            .json::<ApplyOfferResponse>()
            .await
            .expect("invalid apply_offer response")
            .cart_value
    }

    pub async fn offers(&self) -> Vec<Offer> {
        self.client
            .get(self.url("/api/v1/offer"))
            .send()
            .await
            .expect("list request failed")
            .json()
            .await
            .expect("invalid offer list")
    }
}
