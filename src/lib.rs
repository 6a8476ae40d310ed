//! cart-offers - segment-targeted cart discounts
//!
//! Merchants register offers scoped to a restaurant and a set of customer
//! segments. At checkout the caller's segment is looked up and the first
//! matching offer (by registration order) is applied to the cart value.

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod offer;
pub mod registry;
pub mod resolver;
pub mod segment;

pub use offer::{ApplyOfferRequest, ApplyOfferResponse, Offer, OfferType, Segment};
pub use registry::OfferRegistry;
pub use resolver::{AppliedOffer, OfferResolver};
pub use segment::{SegmentError, SegmentResolver};
