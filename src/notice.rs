//! Operator notices
//!
//! Visible, dismissible messages a screen raises after an operation
//! (success confirmations, validation warnings, request failures).

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct NoticeBoard {
    next_id: u64,
    notices: Vec<Notice>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise a notice; returns its id for later dismissal
    pub fn push(
        &mut self,
        level: NoticeLevel,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> u64 {
        self.next_id += 1;
        let notice = Notice {
            id: self.next_id,
            level,
            title: title.into(),
            message: message.into(),
            created_at: Utc::now(),
        };
        match level {
            NoticeLevel::Error => tracing::error!("{}: {}", notice.title, notice.message),
            NoticeLevel::Warning => tracing::warn!("{}: {}", notice.title, notice.message),
            NoticeLevel::Success => tracing::info!("{}: {}", notice.title, notice.message),
        }
        self.notices.push(notice);
        self.next_id
    }

    pub fn success(&mut self, title: impl Into<String>, message: impl Into<String>) -> u64 {
        self.push(NoticeLevel::Success, title, message)
    }

    pub fn warning(&mut self, title: impl Into<String>, message: impl Into<String>) -> u64 {
        self.push(NoticeLevel::Warning, title, message)
    }

    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) -> u64 {
        self.push(NoticeLevel::Error, title, message)
    }

    /// Remove a notice; returns false if it was already gone
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.notices.len();
        self.notices.retain(|n| n.id != id);
        self.notices.len() != before
    }

    pub fn active(&self) -> &[Notice] {
        &self.notices
    }

    /// Take every active notice, leaving the board empty
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn has_errors(&self) -> bool {
        self.notices.iter().any(|n| n.level == NoticeLevel::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut board = NoticeBoard::new();
        let saved = board.success("Saved", "unit 3");
        let failed = board.error("Load failed", "connection refused");
        assert_eq!(board.active().len(), 2);
        assert!(board.has_errors());

        assert!(board.dismiss(failed));
        assert!(!board.dismiss(failed));
        assert!(!board.has_errors());
        assert_eq!(board.active()[0].id, saved);
    }

    #[test]
    fn test_drain() {
        let mut board = NoticeBoard::new();
        board.warning("Ignored parent", "abc");
        let drained = board.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].level, NoticeLevel::Warning);
        assert!(board.active().is_empty());
    }
}
