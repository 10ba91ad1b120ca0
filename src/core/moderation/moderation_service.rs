// Moderation pipeline - core business logic for message suppression.
//
// This service composes the censor filter, link filter and spam tracker in a
// fixed evaluation order and returns exactly one decision per message. It
// owns all moderation state (config + per-user spam state) so nothing hangs
// off ambient bot-wide fields.
//
// NO Discord dependencies here - just pure domain logic.

use super::filters;
use super::moderation_models::{Decision, MessageEvent, ModerationConfig, SuppressReason};
use super::spam_tracker::SpamTracker;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::RwLock;

// ============================================================================
// ERRORS
// ============================================================================

/// Rejected configuration input. The pipeline itself is total and never fails.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModerationError {
    #[error("Censored words cannot be empty")]
    EmptyWord,

    #[error("Spam repeat limit must be at least 1")]
    RepeatLimitTooLow,
}

/// Outcome of adding or removing a censored word. Duplicate adds and missing
/// removes are informational no-ops, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordChange {
    Changed,
    /// Add: word was already censored. Remove: word was not censored.
    NoOp,
}

// ============================================================================
// CORE SERVICE
// ============================================================================

/// The moderation coordinator: rule configuration plus per-user spam state,
/// behind one synchronized interface.
pub struct ModerationService {
    config: RwLock<ModerationConfig>,
    tracker: SpamTracker,
}

impl ModerationService {
    pub fn new(config: ModerationConfig) -> Self {
        Self {
            config: RwLock::new(config),
            tracker: SpamTracker::new(),
        }
    }

    /// Evaluate one message. Fixed order, first match wins:
    ///
    /// 1. bot authors are never evaluated;
    /// 2. censor filter, always on;
    /// 3. link filter, if enabled;
    /// 4. spam tracker, if enabled - the only step with a persistent side
    ///    effect, and skipped entirely (no state touched) once an earlier
    ///    step suppressed.
    ///
    /// The config is cloned once up front so the whole evaluation sees one
    /// consistent snapshot even if an admin mutates the rules concurrently.
    pub async fn evaluate(&self, event: &MessageEvent) -> Decision {
        if event.is_bot {
            return Decision::NoAction;
        }

        let config = self.config.read().await.clone();

        if filters::contains_banned_word(&event.content, &config.banned_words) {
            return Decision::Suppress {
                reason: SuppressReason::BannedWord,
            };
        }

        if config.link_filter_enabled && filters::contains_link(&event.content) {
            return Decision::Suppress {
                reason: SuppressReason::Link,
            };
        }

        if config.spam_filter_enabled {
            if let Some(reason) = self.tracker.observe(
                event.author_id,
                &event.content,
                event.created_at,
                config.min_interval(),
                config.spam_repeat_limit,
            ) {
                return Decision::Suppress { reason };
            }
        }

        Decision::NoAction
    }

    // ------------------------------------------------------------------
    // Configuration surface (driven by admin slash commands)
    // ------------------------------------------------------------------

    /// Current configuration snapshot, for status display.
    pub async fn config(&self) -> ModerationConfig {
        self.config.read().await.clone()
    }

    /// Flip the link filter. Returns the new state.
    pub async fn toggle_link_filter(&self) -> bool {
        let mut config = self.config.write().await;
        config.link_filter_enabled = !config.link_filter_enabled;
        config.link_filter_enabled
    }

    /// Flip the spam filter. Returns the new state.
    pub async fn toggle_spam_filter(&self) -> bool {
        let mut config = self.config.write().await;
        config.spam_filter_enabled = !config.spam_filter_enabled;
        config.spam_filter_enabled
    }

    /// Set the minimum interval between messages, in seconds.
    pub async fn set_spam_min_interval_secs(&self, seconds: u64) {
        self.config.write().await.spam_min_interval_secs = seconds;
    }

    /// Set how many consecutive identical messages are allowed.
    pub async fn set_spam_repeat_limit(&self, limit: u32) -> Result<(), ModerationError> {
        if limit < 1 {
            return Err(ModerationError::RepeatLimitTooLow);
        }
        self.config.write().await.spam_repeat_limit = limit;
        Ok(())
    }

    /// Add a word to the censor list. The word is trimmed and lowercased
    /// before insertion.
    pub async fn add_banned_word(&self, word: &str) -> Result<WordChange, ModerationError> {
        let word = normalize_word(word)?;
        let inserted = self.config.write().await.banned_words.insert(word);
        Ok(if inserted {
            WordChange::Changed
        } else {
            WordChange::NoOp
        })
    }

    /// Remove a word from the censor list.
    pub async fn remove_banned_word(&self, word: &str) -> Result<WordChange, ModerationError> {
        let word = normalize_word(word)?;
        let removed = self.config.write().await.banned_words.remove(&word);
        Ok(if removed {
            WordChange::Changed
        } else {
            WordChange::NoOp
        })
    }

    /// All censored words, sorted.
    pub async fn banned_words(&self) -> Vec<String> {
        self.config.read().await.banned_words.iter().cloned().collect()
    }

    // ------------------------------------------------------------------
    // Maintenance
    // ------------------------------------------------------------------

    /// Evict spam state for users idle since the cutoff. Returns how many
    /// entries were dropped.
    pub fn prune_stale_spam_state(&self, older_than: DateTime<Utc>) -> usize {
        self.tracker.prune_stale(older_than)
    }

    /// Number of users with live spam state.
    pub fn tracked_users(&self) -> usize {
        self.tracker.tracked_users()
    }

    #[cfg(test)]
    fn tracker(&self) -> &SpamTracker {
        &self.tracker
    }
}

impl Default for ModerationService {
    fn default() -> Self {
        Self::new(ModerationConfig::default())
    }
}

/// Lowercase + trim, rejecting words that end up empty.
fn normalize_word(word: &str) -> Result<String, ModerationError> {
    let normalized = word.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(ModerationError::EmptyWord);
    }
    Ok(normalized)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn message(author_id: u64, content: &str, secs: i64) -> MessageEvent {
        MessageEvent {
            author_id,
            is_bot: false,
            content: content.to_string(),
            created_at: DateTime::from_timestamp(secs, 0).unwrap(),
        }
    }

    fn service_with(config: ModerationConfig) -> ModerationService {
        ModerationService::new(config)
    }

    #[tokio::test]
    async fn everything_disabled_never_suppresses() {
        let service = ModerationService::default();
        let decision = service.evaluate(&message(1, "gg https://spam.example /", 0)).await;
        assert_eq!(decision, Decision::NoAction);
    }

    #[tokio::test]
    async fn bot_messages_are_never_evaluated() {
        let mut config = ModerationConfig::default();
        config.link_filter_enabled = true;
        config.spam_filter_enabled = true;
        let service = service_with(config);

        let mut event = message(1, "https://spam.example", 0);
        event.is_bot = true;

        assert_eq!(service.evaluate(&event).await, Decision::NoAction);
        // The spam tracker was not touched either.
        assert_eq!(service.tracked_users(), 0);
    }

    #[tokio::test]
    async fn banned_word_suppresses() {
        let service = ModerationService::default();
        service.add_banned_word("badword").await.unwrap();

        let decision = service.evaluate(&message(1, "you BADWORD you", 0)).await;
        assert_eq!(
            decision,
            Decision::Suppress {
                reason: SuppressReason::BannedWord
            }
        );
    }

    #[tokio::test]
    async fn censor_wins_over_link_filter() {
        let mut config = ModerationConfig::default();
        config.link_filter_enabled = true;
        let service = service_with(config);
        service.add_banned_word("badword").await.unwrap();

        let decision = service
            .evaluate(&message(1, "badword https://example.com", 0))
            .await;
        assert_eq!(
            decision,
            Decision::Suppress {
                reason: SuppressReason::BannedWord
            }
        );
    }

    #[tokio::test]
    async fn link_filter_only_runs_when_enabled() {
        let service = ModerationService::default();
        let event = message(1, "check https://example.com", 0);
        assert_eq!(service.evaluate(&event).await, Decision::NoAction);

        service.toggle_link_filter().await;
        assert_eq!(
            service.evaluate(&event).await,
            Decision::Suppress {
                reason: SuppressReason::Link
            }
        );
    }

    #[tokio::test]
    async fn bare_slash_is_suppressed_when_link_filter_on() {
        // Documents the intentionally over-broad token list.
        let mut config = ModerationConfig::default();
        config.link_filter_enabled = true;
        let service = service_with(config);

        let decision = service.evaluate(&message(1, "either/or", 0)).await;
        assert_eq!(
            decision,
            Decision::Suppress {
                reason: SuppressReason::Link
            }
        );
    }

    #[tokio::test]
    async fn spam_tracker_runs_only_when_enabled() {
        let service = ModerationService::default();
        service.evaluate(&message(1, "hello", 0)).await;
        // Filter disabled - no state created.
        assert_eq!(service.tracked_users(), 0);

        service.toggle_spam_filter().await;
        service.evaluate(&message(1, "hello", 10)).await;
        assert_eq!(service.tracked_users(), 1);
    }

    #[tokio::test]
    async fn earlier_suppression_skips_the_spam_tracker() {
        let mut config = ModerationConfig::default();
        config.spam_filter_enabled = true;
        let service = service_with(config);
        service.add_banned_word("badword").await.unwrap();

        let decision = service.evaluate(&message(1, "badword", 0)).await;
        assert!(decision.is_suppress());
        // The censor hit short-circuited before any spam state was touched.
        assert!(service.tracker().state_of(1).is_none());
    }

    #[tokio::test]
    async fn too_fast_messages_are_suppressed() {
        let mut config = ModerationConfig::default();
        config.spam_filter_enabled = true;
        let service = service_with(config);

        assert_eq!(service.evaluate(&message(1, "one", 0)).await, Decision::NoAction);
        assert_eq!(
            service.evaluate(&message(1, "two", 2)).await,
            Decision::Suppress {
                reason: SuppressReason::TooFast
            }
        );
    }

    #[tokio::test]
    async fn repeated_messages_trip_the_limit() {
        let mut config = ModerationConfig::default();
        config.spam_filter_enabled = true;
        let service = service_with(config);

        assert_eq!(service.evaluate(&message(1, "same", 0)).await, Decision::NoAction);
        assert_eq!(service.evaluate(&message(1, "same", 4)).await, Decision::NoAction);
        assert_eq!(service.evaluate(&message(1, "same", 8)).await, Decision::NoAction);
        assert_eq!(
            service.evaluate(&message(1, "same", 12)).await,
            Decision::Suppress {
                reason: SuppressReason::RepeatedMessage
            }
        );
    }

    #[tokio::test]
    async fn evaluation_is_deterministic_for_stateless_rules() {
        let mut config = ModerationConfig::default();
        config.link_filter_enabled = true;
        let service = service_with(config);

        let event = message(1, "https://example.com", 0);
        let first = service.evaluate(&event).await;
        let second = service.evaluate(&event).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn word_list_mutation_reports_no_ops() {
        let service = ModerationService::default();

        assert_eq!(service.add_banned_word("Word ").await.unwrap(), WordChange::Changed);
        assert_eq!(service.add_banned_word("word").await.unwrap(), WordChange::NoOp);
        assert_eq!(service.banned_words().await, vec!["word".to_string()]);

        assert_eq!(service.remove_banned_word("WORD").await.unwrap(), WordChange::Changed);
        assert_eq!(service.remove_banned_word("word").await.unwrap(), WordChange::NoOp);
        assert!(service.banned_words().await.is_empty());
    }

    #[tokio::test]
    async fn invalid_config_input_is_rejected() {
        let service = ModerationService::default();

        assert_eq!(
            service.add_banned_word("   ").await,
            Err(ModerationError::EmptyWord)
        );
        assert_eq!(
            service.set_spam_repeat_limit(0).await,
            Err(ModerationError::RepeatLimitTooLow)
        );

        service.set_spam_repeat_limit(5).await.unwrap();
        service.set_spam_min_interval_secs(10).await;
        let config = service.config().await;
        assert_eq!(config.spam_repeat_limit, 5);
        assert_eq!(config.spam_min_interval_secs, 10);
    }
}
