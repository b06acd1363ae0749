//! Error types for the planning pipeline and its upstream adapters.

/// Failure talking to an upstream service.
///
/// Never crosses the pipeline boundary: the locator turns it into an empty
/// candidate list and the route planner into a missing route.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned HTTP {0}")]
    Status(u16),

    #[error("malformed upstream payload: {0}")]
    Malformed(String),
}

/// Failures surfaced to the caller of [`crate::assembler::EvacuationPlanner::plan`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// `limit` is the guard's daily budget, when it reports one.
    #[error("daily request quota exhausted{}, retry tomorrow", budget(.limit))]
    QuotaExceeded { limit: Option<u32> },

    #[error("planning request was cancelled")]
    Cancelled,
}

fn budget(limit: &Option<u32>) -> String {
    limit.map(|n| format!(" ({} calls)", n)).unwrap_or_default()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },
}
