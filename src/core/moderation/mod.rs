// Core moderation module - the decision pipeline and its collaborators.

pub mod filters;
pub mod moderation_models;
pub mod moderation_service;
pub mod spam_tracker;

pub use moderation_models::*;
pub use moderation_service::*;
