use thiserror::Error;

/// Errors raised while ingesting external trip data.
///
/// The analytics themselves never fail; only parsing at the boundary can.
#[derive(Debug, Error)]
pub enum InsightsError {
    #[error("invalid {field} value {value:?}: expected YYYY-MM-DD or RFC 3339")]
    InvalidDate { field: &'static str, value: String },
    #[cfg(feature = "serde")]
    #[error("failed to parse trip JSON: {0}")]
    Json(#[from] serde_json::Error),
}
