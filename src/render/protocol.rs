//! Protocol definitions shared between the render coordinator and the fetch worker.

use crate::catalogue::{FilterCriteria, ResultSet};
use crate::error::AutocatError;

/// Identifier attached to fetch requests so log lines can be correlated.
///
/// Responses are never matched against the latest id: every completion is
/// applied in the order it arrives.
pub type RequestId = u64;

/// Commands sent from the render coordinator to the fetch worker.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchCommand {
    Load {
        request_id: RequestId,
        criteria: FilterCriteria,
    },
    Shutdown,
}

/// Responses emitted by the fetch worker back to the coordinator.
#[derive(Debug)]
pub enum FetchResponse {
    Loaded {
        request_id: RequestId,
        results: ResultSet,
    },
    Failed {
        request_id: RequestId,
        error: AutocatError,
    },
}

impl FetchResponse {
    pub fn request_id(&self) -> RequestId {
        match self {
            FetchResponse::Loaded { request_id, .. } | FetchResponse::Failed { request_id, .. } => {
                *request_id
            }
        }
    }

    /// Back into the shape the controller consumes.
    pub fn into_outcome(self) -> crate::error::Result<ResultSet> {
        match self {
            FetchResponse::Loaded { results, .. } => Ok(results),
            FetchResponse::Failed { error, .. } => Err(error),
        }
    }
}
