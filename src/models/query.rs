use std::fmt;
use crate::models::search_error::SearchError;

/// Trimmed, non-empty search text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    pub fn parse(raw: &str) -> Result<Self, SearchError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        Ok(Query(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
