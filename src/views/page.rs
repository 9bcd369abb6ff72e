use serde::Serialize;

use crate::models::page_session::PageSnapshot;
use crate::models::status::{Severity, StatusMessage};
use crate::views::html::{icon, Element};

const FONT_AWESOME: &str = "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css";

/// JSON form of a page, served by `/api/view`.
#[derive(Debug, Serialize)]
pub struct PageView {
    pub query: String,
    pub search_enabled: bool,
    pub button_label: &'static str,
    pub status: Option<StatusView>,
    pub results_html: Option<String>,
    pub scroll_into_view: bool,
}

#[derive(Debug, Serialize)]
pub struct StatusView {
    pub text: String,
    pub severity: Severity,
    pub busy: bool,
    pub icon: &'static str,
    pub border_color: &'static str,
}

impl From<&StatusMessage> for StatusView {
    fn from(message: &StatusMessage) -> Self {
        StatusView {
            text: message.text.clone(),
            severity: message.severity,
            busy: message.is_busy(),
            icon: message.icon.class(),
            border_color: message.severity.border_color(),
        }
    }
}

impl From<&PageSnapshot> for PageView {
    fn from(snapshot: &PageSnapshot) -> Self {
        PageView {
            query: snapshot.query.clone(),
            search_enabled: snapshot.search_enabled,
            button_label: snapshot.button_label.text(),
            status: snapshot.status.as_ref().map(StatusView::from),
            results_html: snapshot.results.as_ref().map(Element::render),
            scroll_into_view: snapshot.scroll_into_view,
        }
    }
}

pub fn status_banner(status: Option<&StatusMessage>) -> Element {
    let banner = Element::new("div").attr("id", "statusArea").class("status");
    match status {
        None => banner.attr("style", "display: none"),
        Some(message) => {
            banner
                .attr(
                    "style",
                    format!("display: block; border-left-color: {}", message.severity.border_color()),
                )
                .attr("data-severity", message.severity.as_str())
                .child(
                    Element::new("p")
                        .child(icon(message.icon.class()))
                        .text(format!(" {}", message.text)),
                )
        }
    }
}

fn search_form(snapshot: &PageSnapshot) -> Element {
    let input = Element::new("input")
        .attr("type", "text")
        .attr("id", "queryInput")
        .attr("name", "query")
        .attr("placeholder", "Describe the emails you are looking for")
        .attr("value", snapshot.query.as_str());

    let mut button = Element::new("button")
        .attr("type", "submit")
        .attr("id", "searchBtn");
    if !snapshot.search_enabled {
        button = button.flag("disabled");
    }
    let button = button
        .child(icon(snapshot.button_label.icon()))
        .text(format!(" {}", snapshot.button_label.text()));

    Element::new("form")
        .attr("method", "post")
        .attr("action", "/search")
        .class("search-box")
        .child(input)
        .child(button)
}

fn results_section(snapshot: &PageSnapshot) -> Element {
    let mut section = Element::new("section").attr("id", "resultsArea");
    match &snapshot.results {
        Some(fragment) => {
            section = section.attr("style", "display: block");
            if snapshot.scroll_into_view {
                section = section.attr("tabindex", "-1").flag("autofocus");
            }
            section.child(fragment.clone())
        }
        None => section.attr("style", "display: none"),
    }
}

/// Full document for one page session.
pub fn render_page(snapshot: &PageSnapshot) -> String {
    let mut head = Element::new("head")
        .child(Element::new("meta").attr("charset", "UTF-8"))
        .child(
            Element::new("meta")
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1.0"),
        );
    if let Some(after) = snapshot.refresh_after {
        head = head.child(
            Element::new("meta")
                .attr("http-equiv", "refresh")
                .attr("content", after.as_secs().to_string()),
        );
    }
    let head = head
        .child(Element::new("title").text("Virtual Inbox Search"))
        .child(Element::new("link").attr("rel", "stylesheet").attr("href", FONT_AWESOME))
        .child(Element::new("link").attr("rel", "stylesheet").attr("href", "/static/style.css"));

    let body = Element::new("body").child(
        Element::new("main")
            .class("container")
            .child(
                Element::new("header")
                    .child(
                        Element::new("h1")
                            .child(icon("fas fa-inbox"))
                            .text(" Virtual Inbox Search"),
                    )
                    .child(
                        Element::new("p")
                            .class("subtitle")
                            .text("Ask for emails in plain language; results are ranked by semantic similarity."),
                    ),
            )
            .child(search_form(snapshot))
            .child(status_banner(snapshot.status.as_ref()))
            .child(results_section(snapshot)),
    );

    let html = Element::new("html").attr("lang", "en").child(head).child(body);
    format!("<!DOCTYPE html>\n{}", html.render())
}
