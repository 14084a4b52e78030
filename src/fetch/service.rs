//! Listing fetch contract consumed by the catalogue controller.

use crate::catalogue::{FilterCriteria, ResultSet};
use crate::error::Result;
use async_trait::async_trait;

/// Remote source of car listings.
///
/// One call is one attempt: implementations do not retry, back off, or time
/// out. A failure should carry a message fit for display to the user.
/// All implementations must be thread-safe so the worker can share them
/// across spawned tasks.
#[async_trait]
pub trait ListingFetchService: Send + Sync {
    /// Fetch listings matching `criteria`.
    ///
    /// The criteria already have defaults substituted; `limit` is the maximum
    /// number of rows to return.
    async fn fetch(&self, criteria: &FilterCriteria) -> Result<ResultSet>;
}
