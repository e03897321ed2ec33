//! Timed, non-blocking notices.
//!
//! Notices appear briefly and expire on their own. The drag-and-drop controller
//! and the bootstrap loader post them; the egui layer only renders them.

use std::time::{Duration, Instant};

/// How long a success notice stays up.
pub const SUCCESS_NOTICE_DURATION: Duration = Duration::from_millis(3000);
/// How long an error notice stays up.
pub const ERROR_NOTICE_DURATION: Duration = Duration::from_millis(5000);

/// Fade-out window at the end of a notice's life.
const FADE_DURATION: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "✓",
            NoticeLevel::Info => "ℹ",
            NoticeLevel::Warning => "⚠",
            NoticeLevel::Error => "✗",
        }
    }

    pub fn default_duration(&self) -> Duration {
        match self {
            NoticeLevel::Success | NoticeLevel::Info => SUCCESS_NOTICE_DURATION,
            NoticeLevel::Warning | NoticeLevel::Error => ERROR_NOTICE_DURATION,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Notice {
    pub fn new(message: impl Into<String>, level: NoticeLevel) -> Self {
        Self {
            message: message.into(),
            level,
            created_at: Instant::now(),
            duration: level.default_duration(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NoticeLevel::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NoticeLevel::Error)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.duration
    }

    /// 1.0 until the last half second, then linearly down to 0.0.
    pub fn opacity_at(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.created_at);
        let fade_start = self.duration.saturating_sub(FADE_DURATION);

        if elapsed >= self.duration {
            0.0
        } else if elapsed >= fade_start {
            let remaining = (self.duration - elapsed).as_secs_f32();
            (remaining / FADE_DURATION.as_secs_f32()).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    pub fn opacity(&self) -> f32 {
        self.opacity_at(Instant::now())
    }
}

#[derive(Debug, Default)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.add(Notice::success(message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.add(Notice::error(message));
    }

    pub fn cleanup_at(&mut self, now: Instant) {
        self.notices.retain(|n| !n.is_expired_at(now));
    }

    pub fn cleanup(&mut self) {
        self.cleanup_at(Instant::now());
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.notices.last()
    }

    pub fn has_notices(&self) -> bool {
        !self.notices.is_empty()
    }

    /// Move every notice out, e.g. to hand them to another board.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn extend(&mut self, notices: impl IntoIterator<Item = Notice>) {
        self.notices.extend(notices);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_durations() {
        assert_eq!(Notice::success("ok").duration, Duration::from_millis(3000));
        assert_eq!(Notice::error("no").duration, Duration::from_millis(5000));
    }

    #[test]
    fn test_expiry_and_cleanup() {
        let mut board = NoticeBoard::new();
        board.success("Schedule updated");
        board.error("Room is taken");
        let start = board.notices()[0].created_at;

        board.cleanup_at(start + Duration::from_millis(2999));
        assert_eq!(board.notices().len(), 2);

        board.cleanup_at(start + Duration::from_millis(3500));
        assert_eq!(board.notices().len(), 1);
        assert_eq!(board.latest().unwrap().level, NoticeLevel::Error);

        board.cleanup_at(start + Duration::from_millis(6000));
        assert!(!board.has_notices());
    }

    #[test]
    fn test_drain_moves_notices_between_boards() {
        let mut loader = NoticeBoard::new();
        loader.error("Failed to load faculty list");
        let created = loader.notices()[0].created_at;

        let mut shown = NoticeBoard::new();
        shown.success("Schedule updated");
        shown.extend(loader.drain());

        assert!(!loader.has_notices());
        assert_eq!(shown.notices().len(), 2);
        let moved = shown.latest().unwrap();
        assert_eq!(moved.message, "Failed to load faculty list");
        assert_eq!(moved.created_at, created);
    }

    #[test]
    fn test_opacity_fades_at_end() {
        let notice = Notice::success("Saved").with_duration(Duration::from_secs(2));
        let t0 = notice.created_at;
        assert_eq!(notice.opacity_at(t0), 1.0);
        assert!(notice.opacity_at(t0 + Duration::from_millis(1750)) < 1.0);
        assert_eq!(notice.opacity_at(t0 + Duration::from_secs(2)), 0.0);
    }
}
