#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Please enter a search query.")]
    EmptyQuery,

    #[error("Search timeout. The AI engine might be taking longer than expected.")]
    Timeout { attempts: u32 },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}
