//! Presentation seam
//!
//! The store never touches a terminal or DOM directly. It hands rows,
//! stats and notices to a [`Presenter`] and asks it for confirmations.

use shared::{ProductRecord, ProductStats};

/// Notice severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// One user-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Renders the product table and talks to the user
pub trait Presenter {
    /// Draw `rows`; `stats` always covers the whole loaded list
    fn render(&mut self, rows: &[ProductRecord], stats: &ProductStats);

    /// Show a blocking notice
    fn notify(&mut self, notice: Notice);

    /// Ask a yes/no question
    fn confirm(&mut self, prompt: &str) -> bool;
}
