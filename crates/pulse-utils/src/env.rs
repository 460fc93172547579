//! Environment helpers

use std::path::PathBuf;

/// Load a `.env` file from the current directory or its parents.
///
/// Returns the path that was loaded, if any. A missing file is not an error.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!("Loaded environment from {}", path.display());
            Some(path)
        }
        Err(e) if e.not_found() => None,
        Err(e) => {
            tracing::warn!("Failed to load .env file: {}", e);
            None
        }
    }
}

/// Read the first non-empty variable among `names`
pub fn env_any(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_any_prefers_first_set() {
        unsafe {
            std::env::remove_var("PULSE_TEST_PRIMARY");
            std::env::set_var("PULSE_TEST_SECONDARY", "second");
        }

        assert_eq!(
            env_any(&["PULSE_TEST_PRIMARY", "PULSE_TEST_SECONDARY"]),
            Some("second".to_string())
        );

        unsafe {
            std::env::set_var("PULSE_TEST_PRIMARY", "first");
        }
        assert_eq!(
            env_any(&["PULSE_TEST_PRIMARY", "PULSE_TEST_SECONDARY"]),
            Some("first".to_string())
        );

        unsafe {
            std::env::remove_var("PULSE_TEST_PRIMARY");
            std::env::remove_var("PULSE_TEST_SECONDARY");
        }
    }

    #[test]
    fn test_env_any_skips_blank() {
        unsafe {
            std::env::set_var("PULSE_TEST_BLANK", "  ");
        }
        assert_eq!(env_any(&["PULSE_TEST_BLANK", "PULSE_TEST_UNSET_XYZ"]), None);
        unsafe {
            std::env::remove_var("PULSE_TEST_BLANK");
        }
    }
}
