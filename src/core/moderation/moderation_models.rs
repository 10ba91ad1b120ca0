// Moderation domain models - data structures for the moderation pipeline.
//
// These are pure domain types with no Discord dependencies.
// The Discord layer converts these into Discord-specific actions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One inbound message as seen by the moderation pipeline.
///
/// The gateway layer builds this from the platform message; the core never
/// touches platform types directly.
#[derive(Debug, Clone)]
pub struct MessageEvent {
    /// Opaque author identifier
    pub author_id: u64,
    /// Whether the author is an automated account
    pub is_bot: bool,
    /// Raw message text
    pub content: String,
    /// When the message was created
    pub created_at: DateTime<Utc>,
}

/// Why a message was suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuppressReason {
    /// Message contained a word from the censor list
    BannedWord,
    /// Message matched the link block list
    Link,
    /// Message arrived before the minimum interval elapsed
    TooFast,
    /// Message repeated the user's previous content too many times
    RepeatedMessage,
}

impl SuppressReason {
    /// Short tag for log lines.
    pub fn tag(&self) -> &'static str {
        match self {
            SuppressReason::BannedWord => "banned word",
            SuppressReason::Link => "link",
            SuppressReason::TooFast => "too fast",
            SuppressReason::RepeatedMessage => "repeated message",
        }
    }
}

// Display renders the user-facing notice posted after a deletion.
impl std::fmt::Display for SuppressReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuppressReason::BannedWord => write!(f, "Your message contained a banned word."),
            SuppressReason::Link => write!(f, "Posting links is not allowed."),
            SuppressReason::TooFast => write!(f, "You're sending messages too quickly."),
            SuppressReason::RepeatedMessage => write!(f, "Please stop spamming repeated messages."),
        }
    }
}

/// Result of one pipeline evaluation. Ephemeral - never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Message passes all checks
    NoAction,
    /// Delete the message and notify the author
    Suppress { reason: SuppressReason },
}

impl Decision {
    /// Whether this decision suppresses the message.
    #[allow(dead_code)]
    pub fn is_suppress(&self) -> bool {
        matches!(self, Decision::Suppress { .. })
    }
}

/// Per-user spam tracking state. Owned exclusively by the tracker.
#[derive(Debug, Clone)]
pub struct UserSpamState {
    /// When the user's baseline message was sent. `None` until the first
    /// message from this user has been observed - a sentinel timestamp would
    /// make first messages look too fast relative to the sentinel.
    pub last_message_time: Option<DateTime<Utc>>,
    /// Content of the baseline message
    pub last_message_content: String,
    /// Consecutive repeats of the baseline content
    pub repeat_count: u32,
    /// Last time any message from this user was observed. Eviction bookkeeping
    /// only - updated even when the state machine fields are not.
    pub last_seen: DateTime<Utc>,
}

impl Default for UserSpamState {
    fn default() -> Self {
        Self {
            last_message_time: None,
            last_message_content: String::new(),
            repeat_count: 0,
            last_seen: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

/// Mutable rule configuration for the moderation pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationConfig {
    /// Censored words - always lowercase, trimmed, non-empty
    pub banned_words: BTreeSet<String>,
    /// Whether the link filter runs
    pub link_filter_enabled: bool,
    /// Whether the spam tracker runs
    pub spam_filter_enabled: bool,
    /// Minimum allowed seconds between consecutive messages from one user
    pub spam_min_interval_secs: u64,
    /// Consecutive identical messages allowed before suppression (>= 1)
    pub spam_repeat_limit: u32,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            banned_words: BTreeSet::new(),
            link_filter_enabled: false,
            spam_filter_enabled: false,
            spam_min_interval_secs: 3, // 3 seconds between messages
            spam_repeat_limit: 3,      // 3 identical messages
        }
    }
}

impl ModerationConfig {
    /// Minimum interval as a chrono duration for timestamp arithmetic.
    pub fn min_interval(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.spam_min_interval_secs as i64)
    }
}
