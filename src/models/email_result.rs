use std::fmt;
use serde::{Deserialize, Serialize};

/// Characters of body text shown on a result card.
pub const PREVIEW_LIMIT: usize = 150;
const ELLIPSIS: &str = "...";

/// One ranked hit produced by the search backend.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EmailResult {
    pub sender: String,
    pub subject: String,
    pub body: String,
    pub similarity_score: f64,
}

/// Results in the order the backend ranked them.
pub type ResultSet = Vec<EmailResult>;

impl EmailResult {
    pub fn new(sender: &str, subject: &str, body: &str, similarity_score: f64) -> Self {
        EmailResult {
            sender: sender.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            similarity_score,
        }
    }

    /// First `PREVIEW_LIMIT` characters of the body, with an ellipsis when cut.
    pub fn body_preview(&self) -> String {
        match self.body.char_indices().nth(PREVIEW_LIMIT) {
            Some((cut, _)) => format!("{}{}", &self.body[..cut], ELLIPSIS),
            None => self.body.clone(),
        }
    }

    /// Similarity as a whole percentage, rounded to nearest.
    pub fn relevance_percent(&self) -> i64 {
        (self.similarity_score * 100.0).round() as i64
    }
}

impl fmt::Display for EmailResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} ({}%)",
            self.sender,
            self.subject,
            self.relevance_percent()
        )
    }
}
