//! Offer resolution: segment lookup, first-match selection and discounting.

use std::sync::Arc;

use tracing::{debug, info};

use crate::offer::{ApplyOfferRequest, Offer, Segment};
use crate::registry::OfferRegistry;
use crate::segment::{SegmentError, SegmentResolver};

/// Outcome of applying offers to one cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedOffer {
    /// Segment the user resolved to.
    pub segment: Segment,
    /// Offer that was applied, if any matched.
    pub offer: Option<Offer>,
    /// Cart value after the discount (unchanged when nothing matched).
    pub cart_value: i64,
}

/// Applies at most one offer to a cart.
pub struct OfferResolver {
    registry: Arc<OfferRegistry>,
    segments: Arc<dyn SegmentResolver>,
    clamp_at_zero: bool,
}

impl OfferResolver {
    pub fn new(registry: Arc<OfferRegistry>, segments: Arc<dyn SegmentResolver>) -> Self {
        Self {
            registry,
            segments,
            clamp_at_zero: false,
        }
    }

    /// Floor discounted cart values at zero.
    ///
    /// Off by default: a flat discount larger than the cart yields a negative
    /// value. Enabling this changes checkout totals for such offers.
    pub fn with_clamp_at_zero(mut self, clamp: bool) -> Self {
        self.clamp_at_zero = clamp;
        self
    }

    pub fn registry(&self) -> &Arc<OfferRegistry> {
        &self.registry
    }

    /// Resolve the caller's segment and apply the first matching offer.
    ///
    /// Only fails if the injected segment resolver fails; with a fallback
    /// resolver this is total.
    pub async fn apply(&self, request: &ApplyOfferRequest) -> Result<AppliedOffer, SegmentError> {
        let segment = self.segments.resolve(request.user_id).await?;
        debug!(
            user_id = request.user_id,
            segment = %segment,
            resolver = %self.segments.name(),
            "user segment"
        );

        let offer = self
            .registry
            .find_first_match(request.restaurant_id, &segment)
            .await;

        let cart_value = match &offer {
            Some(offer) => {
                let discounted = offer.apply_to(request.cart_value);
                let discounted = if self.clamp_at_zero {
                    discounted.max(0)
                } else {
                    discounted
                };
                info!(
                    restaurant_id = request.restaurant_id,
                    segment = %segment,
                    offer_type = %offer.offer_type,
                    offer_value = offer.offer_value,
                    cart_value = request.cart_value,
                    discounted,
                    "offer applied"
                );
                discounted
            }
            None => {
                info!(
                    restaurant_id = request.restaurant_id,
                    segment = %segment,
                    cart_value = request.cart_value,
                    "no matching offer"
                );
                request.cart_value
            }
        };

        Ok(AppliedOffer {
            segment,
            offer,
            cart_value,
        })
    }
}
