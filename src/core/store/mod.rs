//! The provider collection and default-provider pointer.
//!
//! The store is the only owner of the collection. Every successful mutation
//! rewrites the settings file before returning, and hands back a [`Change`]
//! describing what the content surface should do next. The store itself
//! never touches surfaces or notifies subscribers; that is the application's
//! job once the state update is complete.

pub mod error;


pub use error::StoreError;

use crate::core::builtin_providers::load_builtin_state;
use crate::core::config::{PersistedState, SettingsFile};
use crate::core::provider::{generate_id, Provider};
use crate::utils::url::is_valid_url;
use std::collections::HashSet;
use tracing::{debug, error, info, warn};

/// Follow-up requested by a store mutation.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Nothing to do besides broadcasting the new state.
    Quiet,
    /// The default moved; the content surface should load this URL.
    Navigate(String),
    /// The collection became empty; the content surface should show the placeholder.
    ShowPlaceholder,
}

/// Input for [`ProviderStore::add`].
#[derive(Debug, Clone, Default)]
pub struct NewProvider {
    pub label: String,
    pub url: String,
    pub icon: String,
    pub pinned: bool,
    pub set_as_default: bool,
}

/// Partial update for [`ProviderStore::update`]; `None` leaves a field alone.
#[derive(Debug, Clone, Default)]
pub struct ProviderPatch {
    pub label: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
}

pub struct ProviderStore {
    providers: Vec<Provider>,
    default_id: Option<String>,
    file: SettingsFile,
    /// Every id seen or produced during this store's lifetime.
    issued_ids: HashSet<String>,
}

impl ProviderStore {
    /// Load the store from `file`, seeding built-in defaults on first launch.
    ///
    /// An unreadable or corrupt file is logged and replaced in memory by the
    /// defaults; the file itself is only rewritten by the next mutation. A
    /// stored default that names no provider is repaired on load.
    pub fn open(file: SettingsFile) -> Self {
        match file.load() {
            Ok(Some(state)) => {
                debug!(path = %file.path().display(), providers = state.providers.len(), "loaded settings");
                let mut store = Self::from_state(state, file);
                store.repair_default();
                store
            }
            Ok(None) => {
                info!(path = %file.path().display(), "no settings found, seeding built-in providers");
                let store = Self::from_state(load_builtin_state(), file);
                store.persist();
                store
            }
            Err(err) => {
                error!(error = %err, "falling back to built-in providers");
                Self::from_state(load_builtin_state(), file)
            }
        }
    }

    fn from_state(state: PersistedState, file: SettingsFile) -> Self {
        let mut issued_ids = HashSet::new();
        for provider in &state.providers {
            if !issued_ids.insert(provider.id.clone()) {
                warn!(id = %provider.id, "duplicate provider id in settings");
            }
            if !is_valid_url(&provider.url) {
                warn!(id = %provider.id, url = %provider.url, "stored provider has an invalid url");
            }
        }

        Self {
            providers: state.providers,
            default_id: state.default_provider_id,
            file,
            issued_ids,
        }
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn default_id(&self) -> Option<&str> {
        self.default_id.as_deref()
    }

    pub fn list(&self) -> (&[Provider], Option<&str>) {
        (self.providers(), self.default_id())
    }

    pub fn find(&self, id: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.id == id)
    }

    /// The provider the default pointer references, if it exists.
    pub fn default_provider(&self) -> Option<&Provider> {
        self.default_id.as_deref().and_then(|id| self.find(id))
    }

    pub fn snapshot(&self) -> PersistedState {
        PersistedState {
            default_provider_id: self.default_id.clone(),
            providers: self.providers.clone(),
        }
    }

    pub fn add(&mut self, draft: NewProvider) -> Result<(String, Change), StoreError> {
        let label = draft.label.trim();
        let url = draft.url.trim();
        if label.is_empty() {
            return Err(StoreError::InvalidInput("label is empty".to_string()));
        }
        if !is_valid_url(url) {
            return Err(StoreError::InvalidInput(format!("'{url}' is not an http(s) url")));
        }

        let mut taken = self.issued_ids.clone();
        taken.extend(self.providers.iter().map(|p| p.id.clone()));
        let id = generate_id(label, &taken);
        self.issued_ids.insert(id.clone());

        let becomes_default = draft.set_as_default || self.providers.is_empty();
        self.providers.push(Provider {
            id: id.clone(),
            label: label.to_string(),
            url: url.to_string(),
            icon: draft.icon.trim().to_string(),
            pinned: draft.pinned,
        });

        let change = if becomes_default {
            self.default_id = Some(id.clone());
            Change::Navigate(url.to_string())
        } else {
            Change::Quiet
        };

        self.persist();
        info!(%id, "added provider");
        Ok((id, change))
    }

    pub fn remove(&mut self, id: &str) -> Result<Change, StoreError> {
        let index = self
            .providers
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        self.providers.remove(index);
        let was_default = self.default_id.as_deref() == Some(id);

        let change = if !was_default {
            Change::Quiet
        } else if let Some(first) = self.providers.first() {
            self.default_id = Some(first.id.clone());
            Change::Navigate(first.url.clone())
        } else {
            self.default_id = None;
            Change::ShowPlaceholder
        };

        self.persist();
        info!(%id, default = ?self.default_id, "removed provider");
        Ok(change)
    }

    pub fn update(&mut self, id: &str, patch: ProviderPatch) -> Result<Change, StoreError> {
        let provider = self
            .providers
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let url = patch.url.as_deref().map(str::trim);
        if let Some(url) = url {
            if !is_valid_url(url) {
                return Err(StoreError::InvalidInput(format!("'{url}' is not an http(s) url")));
            }
        }

        if let Some(label) = patch.label.as_deref().map(str::trim) {
            if !label.is_empty() {
                provider.label = label.to_string();
            }
        }
        if let Some(icon) = patch.icon.as_deref().map(str::trim) {
            if !icon.is_empty() {
                provider.icon = icon.to_string();
            }
        }
        if let Some(url) = url {
            provider.url = url.to_string();
        }

        self.persist();
        debug!(%id, "updated provider");
        Ok(Change::Quiet)
    }

    pub fn set_pinned(&mut self, id: &str, pinned: bool) -> Result<Change, StoreError> {
        let provider = self
            .providers
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        provider.pinned = pinned;

        self.persist();
        Ok(Change::Quiet)
    }

    pub fn set_default(&mut self, id: &str) -> Result<Change, StoreError> {
        let url = self
            .find(id)
            .map(|p| p.url.clone())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.default_id = Some(id.to_string());

        self.persist();
        info!(%id, "default provider changed");
        Ok(Change::Navigate(url))
    }

    /// Point a missing or dangling default at the first provider.
    ///
    /// Returns `true` when the pointer moved (and was persisted).
    pub fn repair_default(&mut self) -> bool {
        if self.default_provider().is_some() {
            return false;
        }
        let Some(first) = self.providers.first() else {
            if self.default_id.take().is_some() {
                self.persist();
                return true;
            }
            return false;
        };

        warn!(stale = ?self.default_id, replacement = %first.id, "default provider missing, using first provider");
        self.default_id = Some(first.id.clone());
        self.persist();
        true
    }

    /// Write the whole state. A failed write is a collaborator failure: it
    /// is logged and the in-memory state stays authoritative.
    fn persist(&self) {
        if let Err(err) = self.file.save(&self.snapshot()) {
            error!(error = %err, "failed to persist providers");
        }
    }
}
