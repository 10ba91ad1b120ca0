// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "moderation/mod.rs"]
pub mod moderation;

#[path = "warnings/warning_ledger.rs"]
pub mod warnings;
