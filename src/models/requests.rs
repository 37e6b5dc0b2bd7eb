//! Request DTOs for the read-strategy API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::cache::MAX_KEY_LENGTH;

/// Request body for seeding or updating a source-of-truth record
/// (PUT /source)
///
/// # Fields
/// - `key`: The record key, also used as the cache key by read strategies
/// - `value`: The record value
#[derive(Debug, Clone, Deserialize)]
pub struct SeedRequest {
    /// The record key
    pub key: String,
    /// The value to store in the source of truth
    pub value: String,
}

impl SeedRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} characters",
                MAX_KEY_LENGTH
            ));
        }
        None
    }
}
