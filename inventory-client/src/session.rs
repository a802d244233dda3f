//! Editing session
//!
//! Tracks which record, if any, the next form submission updates.

/// Form target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditSession {
    /// Submitting creates a new record
    #[default]
    Idle,
    /// Submitting updates the record with this id
    Editing(i64),
}

impl EditSession {
    pub fn is_editing(&self) -> bool {
        matches!(self, EditSession::Editing(_))
    }

    /// Id of the targeted record
    pub fn target(&self) -> Option<i64> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing(id) => Some(*id),
        }
    }

    pub fn begin(&mut self, id: i64) {
        *self = EditSession::Editing(id);
    }

    /// Return to `Idle`, yielding the previous target
    pub fn reset(&mut self) -> Option<i64> {
        std::mem::take(self).target()
    }
}
