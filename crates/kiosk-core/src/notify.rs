//! Single-slot transient notification channel.
//!
//! At most one notification is live at a time: a new `push` replaces an
//! unexpired one and restarts the auto-clear window. No history is kept;
//! notifications are advisory, not transactional records.

use std::time::Duration;

/// How long a notification stays visible unless replaced or dismissed.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// A transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Handle identifying one `push`, used to expire it from a timer.
///
/// Expiry through a stale token is a no-op, so a timer that fires after a
/// newer push has preempted it does not clear the newer notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeToken(u64);

/// The channel itself: a depth-1 queue with token-guarded expiry.
#[derive(Debug, Default)]
pub struct NotificationChannel {
    current: Option<Notice>,
    seq: u64,
}

impl NotificationChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any live notification and return the token for its expiry.
    pub fn push(&mut self, kind: NoticeKind, message: impl Into<String>) -> NoticeToken {
        self.seq += 1;
        self.current = Some(Notice {
            kind,
            message: message.into(),
        });
        NoticeToken(self.seq)
    }

    /// Clear immediately (user-initiated).
    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Timer-driven clear; ignored if a newer push preempted the token.
    pub fn expire(&mut self, token: NoticeToken) {
        if token.0 == self.seq {
            self.current = None;
        }
    }

    /// The live notification, if any.
    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_replaces_previous() {
        let mut channel = NotificationChannel::new();
        channel.push(NoticeKind::Success, "first");
        channel.push(NoticeKind::Failure, "second");

        let notice = channel.current().unwrap();
        assert_eq!(notice.kind, NoticeKind::Failure);
        assert_eq!(notice.message, "second");
    }

    #[test]
    fn test_expire_clears_current() {
        let mut channel = NotificationChannel::new();
        let token = channel.push(NoticeKind::Success, "hello");
        channel.expire(token);
        assert!(channel.current().is_none());
    }

    #[test]
    fn test_stale_token_does_not_clear_newer_push() {
        let mut channel = NotificationChannel::new();
        let first = channel.push(NoticeKind::Success, "first");
        let second = channel.push(NoticeKind::Success, "second");

        channel.expire(first);
        assert_eq!(channel.current().unwrap().message, "second");

        channel.expire(second);
        assert!(channel.current().is_none());
    }

    #[test]
    fn test_dismiss() {
        let mut channel = NotificationChannel::new();
        channel.push(NoticeKind::Failure, "oops");
        channel.dismiss();
        assert!(channel.current().is_none());
    }
}
