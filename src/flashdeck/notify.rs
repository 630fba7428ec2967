//! # Notification channel
//!
//! A single ephemeral message slot. `show` replaces whatever is displayed and
//! schedules an auto-clear `delay` later. The scheduled clear is bound to the
//! [`NoticeId`] of the message it was scheduled for: once a newer message has
//! replaced it, firing the old clear does nothing.
//!
//! Time is passed in by the caller, so the channel itself never sleeps or spawns.

use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_DELAY_SECS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    /// A successful removal; shown apart from additions and updates.
    Removed,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoticeId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: NoticeId,
    pub level: NoticeLevel,
    pub text: String,
    pub shown_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Notice {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone)]
pub struct Notifier {
    delay: Duration,
    current: Option<Notice>,
    next_id: u64,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_DELAY_SECS))
    }
}

impl Notifier {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            current: None,
            next_id: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Display `text`, preempting any current message and restarting the delay.
    pub fn show(&mut self, level: NoticeLevel, text: impl Into<String>, now: DateTime<Utc>) -> NoticeId {
        self.next_id += 1;
        let id = NoticeId(self.next_id);
        self.current = Some(Notice {
            id,
            level,
            text: text.into(),
            shown_at: now,
            expires_at: now + self.delay,
        });
        id
    }

    /// The scheduled auto-clear for `id`. Only clears if `id` is still the
    /// displayed message; returns whether anything was cleared.
    pub fn expire(&mut self, id: NoticeId) -> bool {
        if self.current.as_ref().is_some_and(|n| n.id == id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Explicit clear by the user. Cancels the pending auto-clear.
    pub fn dismiss(&mut self) -> Option<Notice> {
        self.current.take()
    }

    /// Run the auto-clear if it is due. Returns the notice that was cleared.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<Notice> {
        if self.current.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.current.take()
        } else {
            None
        }
    }

    /// The message to display at `now`, if any.
    pub fn visible(&self, now: DateTime<Utc>) -> Option<&Notice> {
        self.current.as_ref().filter(|n| !n.is_expired(now))
    }

    /// The current message regardless of expiry.
    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }
}
