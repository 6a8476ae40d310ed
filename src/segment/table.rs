//! Fixed user-to-segment table used when the segment service is unreachable.

use async_trait::async_trait;

use super::{SegmentError, SegmentResolver};
use crate::offer::Segment;

/// Segment assigned to any user id missing from the table.
pub const DEFAULT_SEGMENT: &str = "p1";

/// Deterministic table: 1 → p1, 2 → p2, 3 → p3, anything else → p1.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticSegmentResolver;

impl StaticSegmentResolver {
    pub fn lookup(user_id: i64) -> &'static str {
        match user_id {
            1 => "p1",
            2 => "p2",
            3 => "p3",
            _ => DEFAULT_SEGMENT,
        }
    }
}

#[async_trait]
impl SegmentResolver for StaticSegmentResolver {
    async fn resolve(&self, user_id: i64) -> Result<Segment, SegmentError> {
        Ok(Self::lookup(user_id).to_string())
    }

    fn name(&self) -> &str {
        "static"
    }
}
