//! Startup wiring shared by the binary and integration tests.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, LOG_ENV_VAR};
use crate::registry::OfferRegistry;
use crate::resolver::OfferResolver;
use crate::segment::{
    FallbackSegmentResolver, HttpSegmentResolver, SegmentError, SegmentResolver,
    StaticSegmentResolver,
};

/// Initialize tracing with CART_OFFERS_LOG environment variable.
///
/// Defaults to "info" level if CART_OFFERS_LOG is not set.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV_VAR)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Segment resolver described by `config`.
///
/// The HTTP resolver is wrapped in the static-table fallback unless
/// `segment_service.fallback` is off.
pub fn segment_resolver(config: &Config) -> Result<Arc<dyn SegmentResolver>, SegmentError> {
    let http = HttpSegmentResolver::new(config.segment_service.http_resolver_config())?;
    info!(
        endpoint = %http.endpoint(),
        timeout_ms = config.segment_service.timeout_ms,
        fallback = config.segment_service.fallback,
        "segment service configured"
    );

    if config.segment_service.fallback {
        Ok(Arc::new(FallbackSegmentResolver::new(http, StaticSegmentResolver)))
    } else {
        Ok(Arc::new(http))
    }
}

/// Offer resolver over a fresh, empty registry.
pub fn offer_resolver(config: &Config) -> Result<OfferResolver, SegmentError> {
    let registry = Arc::new(OfferRegistry::new());
    let resolver = OfferResolver::new(registry, segment_resolver(config)?)
        .with_clamp_at_zero(config.offers.clamp_at_zero);
    Ok(resolver)
}
