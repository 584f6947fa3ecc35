//! Built-in provider configuration
//!
//! The providers seeded on first launch are embedded from
//! `builtin_providers.toml` at build time.

use crate::core::config::data::PersistedState;

/// Load the built-in providers and default pointer from the embedded file.
pub fn load_builtin_state() -> PersistedState {
    const CONFIG_CONTENT: &str = include_str!("../builtin_providers.toml");

    toml::from_str(CONFIG_CONTENT).expect("Failed to parse builtin_providers.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::url::is_valid_url;

    #[test]
    fn test_load_builtin_state() {
        let state = load_builtin_state();
        let ids: Vec<&str> = state.providers.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["gpt", "claude", "gemini"]);
        assert_eq!(state.default_provider_id.as_deref(), Some("gpt"));
    }

    #[test]
    fn test_builtin_provider_properties() {
        for provider in load_builtin_state().providers {
            assert!(!provider.label.is_empty());
            assert!(is_valid_url(&provider.url), "{} has a bad url", provider.id);
            assert!(provider.pinned);
        }
    }
}
