use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShopifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited on {operation} (retry after {retry_after_secs}s)")]
    RateLimited {
        operation: String,
        retry_after_secs: u64,
    },

    #[error("unexpected HTTP status {status} on {operation}")]
    UnexpectedStatus { status: u16, operation: String },

    /// The response carried a top-level `errors` array.
    #[error("GraphQL errors on {operation}: {}", messages.join("; "))]
    GraphQl {
        operation: String,
        messages: Vec<String>,
    },

    #[error("response for {operation} is missing {what}")]
    MissingData { operation: String, what: String },

    #[error("pagination limit reached: exceeded {max_pages} pages")]
    PaginationLimit { max_pages: usize },

    #[error("page {page} reported hasNextPage without an endCursor")]
    MissingCursor { page: usize },

    #[error("invalid Admin API endpoint \"{endpoint}\": {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}
