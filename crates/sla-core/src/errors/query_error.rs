/// Errors raised by a single request against the remote query service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Network or service failure that may succeed on retry.
    #[error("transient query failure: {reason}")]
    Transient { reason: String },

    /// The service refused the query outright (malformed filter, forbidden scope).
    #[error("query rejected: {reason}")]
    Rejected { reason: String },

    /// The response arrived but could not be read.
    #[error("undecodable query response: {reason}")]
    Decode { reason: String },

    #[error("query cancelled")]
    Cancelled,
}

impl QueryError {
    /// Whether another attempt at the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }
}
