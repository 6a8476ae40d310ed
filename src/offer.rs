//! Offer and cart types.
//!
//! Wire names follow the checkout API (`FLATX`/`PERCENT`, `customer_segment`,
//! snake_case fields) so request and response bodies deserialize directly.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Customer segment label (e.g. "p1"). Opaque; only compared for equality.
pub type Segment = String;

/// How an offer's value is applied to a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfferType {
    /// Subtract a fixed currency amount.
    #[serde(rename = "FLATX")]
    FlatAmount,
    /// Subtract a percentage of the cart value, truncated toward zero.
    #[serde(rename = "PERCENT")]
    PercentageAmount,
}

impl fmt::Display for OfferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OfferType::FlatAmount => write!(f, "FLATX"),
            OfferType::PercentageAmount => write!(f, "PERCENT"),
        }
    }
}

/// A merchant-registered discount rule.
///
/// Offers are never validated: negative values and empty segment lists are
/// stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub restaurant_id: i64,
    pub offer_type: OfferType,
    pub offer_value: i64,
    #[serde(rename = "customer_segment", alias = "eligible_segments")]
    pub eligible_segments: Vec<Segment>,
}

impl Offer {
    pub fn new(
        restaurant_id: i64,
        offer_type: OfferType,
        offer_value: i64,
        eligible_segments: impl IntoIterator<Item = impl Into<Segment>>,
    ) -> Self {
        Self {
            restaurant_id,
            offer_type,
            offer_value,
            eligible_segments: eligible_segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Shorthand for a `FLATX` offer.
    pub fn flat(restaurant_id: i64, amount: i64, segments: &[&str]) -> Self {
        Self::new(restaurant_id, OfferType::FlatAmount, amount, segments.iter().copied())
    }

    /// Shorthand for a `PERCENT` offer.
    pub fn percent(restaurant_id: i64, percent: i64, segments: &[&str]) -> Self {
        Self::new(
            restaurant_id,
            OfferType::PercentageAmount,
            percent,
            segments.iter().copied(),
        )
    }

    /// True if this offer targets `restaurant_id` and lists `segment`.
    pub fn matches(&self, restaurant_id: i64, segment: &str) -> bool {
        self.restaurant_id == restaurant_id && self.eligible_segments.iter().any(|s| s == segment)
    }

    /// Cart value after this offer's discount.
    ///
    /// Flat offers subtract `offer_value`; percentage offers subtract
    /// `cart_value * offer_value / 100` truncated toward zero. The result is not
    /// floored, so a flat discount larger than the cart yields a negative value.
    /// Arithmetic saturates at the `i64` bounds.
    pub fn apply_to(&self, cart_value: i64) -> i64 {
        match self.offer_type {
            OfferType::FlatAmount => cart_value.saturating_sub(self.offer_value),
            OfferType::PercentageAmount => {
                let discount = i128::from(cart_value) * i128::from(self.offer_value) / 100;
                let discounted = i128::from(cart_value) - discount;
                i64::try_from(discounted).unwrap_or(if discounted < 0 {
                    i64::MIN
                } else {
                    i64::MAX
                })
            }
        }
    }
}

/// Checkout-time request to apply the best offer to a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyOfferRequest {
    pub restaurant_id: i64,
    pub user_id: i64,
    pub cart_value: i64,
}

/// Post-discount cart value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyOfferResponse {
    pub cart_value: i64,
}

/// Acknowledgement returned by offer registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub response_msg: String,
}

impl ApiResponse {
    pub fn success() -> Self {
        Self {
            response_msg: "success".to_string(),
        }
    }
}
