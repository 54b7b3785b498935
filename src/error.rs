//! Typed failure taxonomy for the analysis pipeline.
//!
//! Numeric helpers (relevance normalization, variance) never surface errors;
//! they degrade to a defined zero instead. Only the two conditions below are
//! reportable.

use thiserror::Error;

use crate::model::TrendDirection;
use crate::topics::Topic;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Input snapshot is below the configured minimum. Recoverable: the caller
    /// retries later with more data; the engine never retries internally.
    #[error("insufficient data points: got {got}, need at least {need}")]
    InsufficientData { got: usize, need: usize },

    /// The implication table is missing an entry for a closed topic/direction
    /// pair. Unreachable given the fixed tables; surfaced rather than
    /// swallowed if the tables ever drift.
    #[error("no implication table entry for topic {topic} with {direction} trend")]
    MissingImplicationTable {
        topic: Topic,
        direction: TrendDirection,
    },
}
