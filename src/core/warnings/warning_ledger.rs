// Warning ledger - per-user record of moderation warnings.
//
// Entries live for the lifetime of the process; persistence is deliberately
// out of scope. A present key always maps to a non-empty list, because the
// only way to create an entry is to append a warning and clearing removes the
// whole entry.

use dashmap::DashMap;

/// Placeholder stored when a moderator gives no reason.
pub const NO_REASON: &str = "No reason provided";

/// Ordered warning reasons per user, insertion order = infraction order.
pub struct WarningLedger {
    entries: DashMap<u64, Vec<String>>,
}

impl WarningLedger {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Record a warning for a user. Returns the user's new total.
    pub fn warn(&self, user_id: u64, reason: Option<String>) -> usize {
        let mut entry = self.entries.entry(user_id).or_default();
        entry.push(reason.unwrap_or_else(|| NO_REASON.to_string()));
        entry.len()
    }

    /// All warnings for a user, oldest first. Empty if the user has none.
    pub fn list(&self, user_id: u64) -> Vec<String> {
        self.entries
            .get(&user_id)
            .map(|entry| entry.clone())
            .unwrap_or_default()
    }

    /// Remove a user's entry entirely. Returns `false` if there was nothing
    /// to clear - a benign no-op, not an error.
    pub fn clear(&self, user_id: u64) -> bool {
        self.entries.remove(&user_id).is_some()
    }
}

impl Default for WarningLedger {
    fn default() -> Self {
        Self::new()
    }
}
