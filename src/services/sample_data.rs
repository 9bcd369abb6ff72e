use lazy_static::lazy_static;

use crate::models::email_result::{EmailResult, ResultSet};

lazy_static! {
    /// Fixed demo inbox hits, already in ranked order.
    pub static ref SAMPLE_RESULTS: ResultSet = vec![
        EmailResult::new(
            "project@company.com",
            "Weekly Budget Update",
            "The project budget is on track with last week's forecasts. We've allocated additional resources for the Q3 marketing campaign.",
            0.87,
        ),
        EmailResult::new(
            "alex.j@design.com",
            "Design Mockups Feedback",
            "Here are my comments on the latest mockups. Please review before Friday's meeting.",
            0.72,
        ),
        EmailResult::new(
            "team@collab.com",
            "Meeting Notes: Project Sync",
            "Action items: Alex to finalize designs, Sam to prepare budget review, Taylor to contact the client.",
            0.68,
        ),
    ];
}
