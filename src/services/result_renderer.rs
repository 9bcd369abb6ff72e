use log::debug;

use crate::models::email_result::EmailResult;
use crate::models::page_elements::ResultsArea;
use crate::models::query::Query;
use crate::services::status_reporter::StatusReporter;
use crate::views::html::{icon, Element};

/// Where a result set came from. Sample data is tagged on each card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultOrigin {
    Backend,
    Sample,
}

#[derive(Clone)]
pub struct ResultRenderer {
    area: ResultsArea,
    status: StatusReporter,
}

impl ResultRenderer {
    pub fn new(area: ResultsArea, status: StatusReporter) -> Self {
        ResultRenderer { area, status }
    }

    /// Mounts the result list for `query`. An empty set shows a warning and
    /// leaves the area hidden. Returns whether anything was mounted.
    pub fn display(&self, results: &[EmailResult], query: &Query, origin: ResultOrigin) -> bool {
        if results.is_empty() {
            self.status.warning(format!(
                "No emails found for \"{}\". Try different keywords.",
                query
            ));
            return false;
        }

        self.status.success(format!(
            "Found {} relevant emails for \"{}\".",
            results.len(),
            query
        ));

        debug!("Rendering {} results for \"{}\"", results.len(), query);
        self.area.mount(render_fragment(results, query, origin));
        self.area.request_scroll();
        true
    }
}

pub fn render_fragment(results: &[EmailResult], query: &Query, origin: ResultOrigin) -> Element {
    Element::new("div")
        .class("results")
        .child(
            Element::new("h2")
                .child(icon("fas fa-envelope-open-text"))
                .text(" Search Results"),
        )
        .children(results.iter().map(|email| render_card(email, query, origin)))
}

fn render_card(email: &EmailResult, query: &Query, origin: ResultOrigin) -> Element {
    let header = Element::new("div")
        .class("email-header")
        .child(
            Element::new("div")
                .class("sender")
                .child(icon("fas fa-user-circle"))
                .text(format!(" {}", email.sender)),
        )
        .child(
            Element::new("div")
                .class("score")
                .text(format!("Relevance: {}%", email.relevance_percent())),
        );

    let mut footer = Element::new("div").class("email-footer").child(
        Element::new("div")
            .class("match")
            .text(format!("Matched your query: \"{}\"", query)),
    );
    if origin == ResultOrigin::Sample {
        footer = footer.child(Element::new("div").class("demo-tag").text("Sample Result"));
    }

    Element::new("div")
        .class("email-card")
        .child(header)
        .child(Element::new("div").class("subject").text(email.subject.as_str()))
        .child(Element::new("div").class("body-preview").text(email.body_preview()))
        .child(footer)
}
