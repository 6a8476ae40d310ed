//! User segment lookup.
//!
//! [`SegmentResolver`] maps a user id to a segment label. Three
//! implementations compose the production behavior:
//! - [`HttpSegmentResolver`]: asks the remote user segment service.
//! - [`StaticSegmentResolver`]: fixed table, never fails.
//! - [`FallbackSegmentResolver`]: tries a primary once, falls back on any error.

mod http;
mod table;

pub use http::{HttpSegmentResolver, HttpSegmentResolverConfig};
pub use table::StaticSegmentResolver;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::offer::Segment;

/// Errors from segment lookups.
#[derive(Debug, thiserror::Error)]
pub enum SegmentError {
    /// Connection or transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// Lookup exceeded the configured timeout.
    #[error("segment lookup timed out")]
    Timeout,

    /// Service answered with a non-success status.
    #[error("service error: HTTP {0}")]
    Service(u16),

    /// Response body was not a segment document.
    #[error("parse error: {0}")]
    Parse(String),

    /// Resolver could not be constructed.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Maps a user id to the segment used for offer targeting.
#[async_trait]
pub trait SegmentResolver: Send + Sync {
    async fn resolve(&self, user_id: i64) -> Result<Segment, SegmentError>;

    /// Resolver name for logging.
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: SegmentResolver + ?Sized> SegmentResolver for Arc<T> {
    async fn resolve(&self, user_id: i64) -> Result<Segment, SegmentError> {
        (**self).resolve(user_id).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Degrade-gracefully decorator.
///
/// Calls `primary` exactly once; on any error logs a warning and answers from
/// `fallback`. Nothing is retried or cached.
pub struct FallbackSegmentResolver<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackSegmentResolver<P, F>
where
    P: SegmentResolver,
    F: SegmentResolver,
{
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl<P, F> SegmentResolver for FallbackSegmentResolver<P, F>
where
    P: SegmentResolver,
    F: SegmentResolver,
{
    async fn resolve(&self, user_id: i64) -> Result<Segment, SegmentError> {
        match self.primary.resolve(user_id).await {
            Ok(segment) => Ok(segment),
            Err(e) => {
                warn!(
                    user_id,
                    primary = %self.primary.name(),
                    fallback = %self.fallback.name(),
                    error = %e,
                    "segment lookup failed, using fallback"
                );
                self.fallback.resolve(user_id).await
            }
        }
    }

    fn name(&self) -> &str {
        "fallback"
    }
}
