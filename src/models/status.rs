use std::fmt;
use std::time::Duration;
use serde::{Deserialize, Serialize};

pub const SUCCESS_DISMISS_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Left-border accent of the status banner.
    pub fn border_color(self) -> &'static str {
        match self {
            Severity::Info => "#2196F3",
            Severity::Success => "#4CAF50",
            Severity::Warning => "#FF9800",
            Severity::Error => "#F44336",
        }
    }

    /// How long a message of this severity stays up, if it dismisses itself.
    pub fn auto_dismiss_after(self) -> Option<Duration> {
        match self {
            Severity::Success => Some(SUCCESS_DISMISS_AFTER),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

// Unknown names fall back to info.
impl From<&str> for Severity {
    fn from(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "success" => Severity::Success,
            "warning" => Severity::Warning,
            "error" => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Icon shown in front of the status text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusIcon {
    #[default]
    Info,
    Spinner,
    Check,
}

impl StatusIcon {
    pub fn class(self) -> &'static str {
        match self {
            StatusIcon::Info => "fas fa-info-circle",
            StatusIcon::Spinner => "fas fa-cog fa-spin",
            StatusIcon::Check => "fas fa-check-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
    #[serde(default)]
    pub icon: StatusIcon,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        StatusMessage {
            text: text.into(),
            severity,
            icon: StatusIcon::Info,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Info)
    }

    pub fn busy(text: impl Into<String>) -> Self {
        StatusMessage {
            icon: StatusIcon::Spinner,
            ..Self::info(text)
        }
    }

    /// Success that closes a whole search run, marked with a check icon.
    pub fn completed(text: impl Into<String>) -> Self {
        StatusMessage {
            icon: StatusIcon::Check,
            ..Self::success(text)
        }
    }

    pub fn is_busy(&self) -> bool {
        self.icon == StatusIcon::Spinner
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Success)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Warning)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Error)
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.text)
    }
}
