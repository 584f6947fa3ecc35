//! Persistence of the provider list in the platform config directory.

pub mod data;
pub mod io;

pub use data::PersistedState;
pub use io::{ConfigError, SettingsFile};
