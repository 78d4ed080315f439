//! Persistence layer (on-device key-value storage).

pub mod kv;

pub use kv::{KeyGuard, KvStore};

/// Storage keys. The layout is shared with earlier releases and must not change.
pub mod keys {
    /// JSON array of every profile
    pub const PROFILES: &str = "profiles";
    /// Plain string id of the selected profile
    pub const ACTIVE_PROFILE_ID: &str = "active_profile_id";
    /// Single-profile record from before multi-profile support
    pub const LEGACY_PROFILE: &str = "user_profile";
    /// Unscoped workout log from before multi-profile support
    pub const LEGACY_WORKOUT_LOGS: &str = "@workout_logs";

    /// Workout log collection owned by one profile.
    pub fn workout_logs(profile_id: &str) -> String {
        format!("{}_{}", LEGACY_WORKOUT_LOGS, profile_id)
    }
}
