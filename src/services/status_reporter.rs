use log::{error, info, warn};

use crate::models::page_elements::StatusArea;
use crate::models::status::{Severity, StatusMessage};

/// Writes to the single status slot of a page. Each message replaces the
/// previous one; success messages hide themselves after a while.
#[derive(Clone)]
pub struct StatusReporter {
    area: StatusArea,
}

impl StatusReporter {
    pub fn new(area: StatusArea) -> Self {
        StatusReporter { area }
    }

    pub fn show(&self, message: StatusMessage) {
        match message.severity {
            Severity::Error => error!("status: {}", message.text),
            Severity::Warning => warn!("status: {}", message.text),
            Severity::Info | Severity::Success => info!("status: {}", message.text),
        }
        let dismiss_after = message.severity.auto_dismiss_after();
        self.area.show(message, dismiss_after);
    }

    pub fn info(&self, text: impl Into<String>) {
        self.show(StatusMessage::info(text));
    }

    pub fn busy(&self, text: impl Into<String>) {
        self.show(StatusMessage::busy(text));
    }

    pub fn success(&self, text: impl Into<String>) {
        self.show(StatusMessage::success(text));
    }

    pub fn completed(&self, text: impl Into<String>) {
        self.show(StatusMessage::completed(text));
    }

    pub fn warning(&self, text: impl Into<String>) {
        self.show(StatusMessage::warning(text));
    }

    pub fn error(&self, text: impl Into<String>) {
        self.show(StatusMessage::error(text));
    }

    pub fn current(&self) -> Option<StatusMessage> {
        self.area.visible()
    }
}
