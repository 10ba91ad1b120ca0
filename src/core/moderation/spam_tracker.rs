// Per-user spam state tracking - rate limiting and repeat detection.
//
// The whole read-modify-write for one message runs under the DashMap entry
// guard with no await points in between, so concurrent evaluations for the
// same user cannot interleave their reads. That per-user mutual exclusion is
// a correctness requirement: the gateway dispatches message events
// concurrently, and two close-together messages from one user must still be
// counted in arrival order.

use super::moderation_models::{SuppressReason, UserSpamState};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

/// Tracks `(last_message_time, last_message_content, repeat_count)` per user.
///
/// Entries are created lazily on the first observed message and evicted by
/// [`SpamTracker::prune_stale`] so memory stays proportional to recently
/// active users rather than all users ever seen.
pub struct SpamTracker {
    states: DashMap<u64, UserSpamState>,
}

impl SpamTracker {
    pub fn new() -> Self {
        Self {
            states: DashMap::new(),
        }
    }

    /// Run one message through the rate/repeat state machine.
    ///
    /// Returns the suppression reason if the message is spam, `None` otherwise.
    ///
    /// The update asymmetry is deliberate and load-bearing:
    /// - a too-fast message leaves `last_message_time`/`last_message_content`
    ///   untouched, so a burst keeps being compared against the same baseline
    ///   until one message arrives a full interval after it;
    /// - a repeat-limit trip persists only the incremented counter - the
    ///   frozen timestamp/content keep matching until the user sends
    ///   something different.
    pub fn observe(
        &self,
        user_id: u64,
        content: &str,
        at: DateTime<Utc>,
        min_interval: Duration,
        repeat_limit: u32,
    ) -> Option<SuppressReason> {
        let mut entry = self.states.entry(user_id).or_default();
        let state = entry.value_mut();

        state.last_seen = at;

        // First observed message from this user: it becomes the baseline.
        // There is nothing to rate-limit or compare against yet.
        let last_time = match state.last_message_time {
            Some(t) => t,
            None => {
                state.last_message_time = Some(at);
                state.last_message_content = content.to_string();
                return None;
            }
        };

        if at - last_time < min_interval {
            return Some(SuppressReason::TooFast);
        }

        if content == state.last_message_content {
            state.repeat_count += 1;
            if state.repeat_count >= repeat_limit {
                return Some(SuppressReason::RepeatedMessage);
            }
        } else {
            state.repeat_count = 0;
        }

        state.last_message_time = Some(at);
        state.last_message_content = content.to_string();
        None
    }

    /// Drop entries for users not seen since the cutoff.
    ///
    /// Returns how many entries were removed. Called from the background
    /// maintenance sweep.
    pub fn prune_stale(&self, older_than: DateTime<Utc>) -> usize {
        let before = self.states.len();
        self.states.retain(|_, state| state.last_seen >= older_than);
        before.saturating_sub(self.states.len())
    }

    /// Number of users currently tracked.
    pub fn tracked_users(&self) -> usize {
        self.states.len()
    }

    /// Snapshot of one user's state, if any.
    #[allow(dead_code)]
    pub fn state_of(&self, user_id: u64) -> Option<UserSpamState> {
        self.states.get(&user_id).map(|entry| entry.clone())
    }
}

impl Default for SpamTracker {
    fn default() -> Self {
        Self::new()
    }
}
