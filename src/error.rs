//! Error types for graphopt.

use thiserror::Error;

/// Fatal run errors.
///
/// Per-node evaluation failures are *not* represented here: a failing
/// objective call never aborts a run. The node is excluded (or retried once,
/// see [`crate::SearchConfig::with_retry_failed`]) and the failure is counted
/// in [`crate::RunResult::failures`].
#[derive(Debug, Error)]
pub enum SearchError {
    /// Invalid run configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The graph reported a neighbor (or seed) it does not contain.
    ///
    /// Indicates a caller bug in the graph implementation; the run aborts
    /// immediately with the offending node and the history length at the
    /// point of detection.
    #[error("graph inconsistency: node {node} reported outside the graph after {history_len} evaluations")]
    GraphInconsistency {
        /// Debug rendering of the offending node.
        node: String,
        /// Number of successful evaluations when the violation was detected.
        history_len: usize,
    },

    /// `run` was called with an empty seed slice.
    #[error("at least one seed node is required")]
    EmptySeeds,
}

/// Result type alias for graphopt operations.
pub type Result<T> = std::result::Result<T, SearchError>;
