//! In-memory offer registry.
//!
//! Append-only and insertion-ordered. "First match" is defined strictly by
//! registration order, so offers are never reordered or deduplicated.

use tokio::sync::RwLock;
use tracing::debug;

use crate::offer::Offer;

/// Offer storage owned by the service and shared with the resolver.
#[derive(Debug, Default)]
pub struct OfferRegistry {
    offers: RwLock<Vec<Offer>>,
}

impl OfferRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an offer. Always succeeds; nothing is validated.
    pub async fn register(&self, offer: Offer) {
        let mut offers = self.offers.write().await;
        offers.push(offer);
        debug!(total = offers.len(), "offer appended");
    }

    /// Earliest-registered offer for `restaurant_id` listing `segment`.
    pub async fn find_first_match(&self, restaurant_id: i64, segment: &str) -> Option<Offer> {
        self.offers
            .read()
            .await
            .iter()
            .find(|offer| offer.matches(restaurant_id, segment))
            .cloned()
    }

    /// Snapshot of all offers in registration order.
    pub async fn list(&self) -> Vec<Offer> {
        self.offers.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.offers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.offers.read().await.is_empty()
    }
}
