//! Locations and identities used by the command line.
//!
//! # Environment Variables
//!
//! - `RSVP_DATA_DIR`: Override the data directory
//! - `RSVP_USER`: User to act as

use std::path::PathBuf;

use rsvp_models::UserId;

/// Environment variable for a custom data directory.
pub const DATA_DIR_ENV: &str = "RSVP_DATA_DIR";

/// Environment variable naming the acting user.
pub const USER_ENV: &str = "RSVP_USER";

/// Default data directory name under home.
const DEFAULT_DATA_DIR: &str = ".rsvp-tracker";

/// Get the default data directory.
///
/// 1. `~/.rsvp-tracker` if the home directory is available
/// 2. `.rsvp-tracker` in the current directory as fallback
///
/// `RSVP_DATA_DIR` is applied by the argument parser before this is
/// consulted.
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(DEFAULT_DATA_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

/// Resolves the acting user, falling back to the simulated default user.
///
/// Blank names count as unset.
pub fn resolve_user(name: Option<&str>) -> UserId {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => UserId::new(name),
        _ => UserId::current(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_data_dir_name() {
        let dir = default_data_dir();
        assert!(dir.ends_with(".rsvp-tracker"));
    }

    #[test]
    fn test_resolve_user() {
        assert_eq!(resolve_user(Some("alice")), UserId::from("alice"));
        assert_eq!(resolve_user(Some("  bob ")), UserId::from("bob"));
        assert_eq!(resolve_user(Some("   ")), UserId::current());
        assert_eq!(resolve_user(None), UserId::current());
    }
}
