//! Application state for one shell window.
//!
//! `App` ties the provider store, the view manager and the relay to a host.
//! All mutations run on the event-loop thread, so the ordering of a store
//! change is fixed: the state update completes, then the content surface is
//! pointed at the new target, then subscribers hear about it.

#[cfg(test)]
mod tests;

use crate::core::relay::{Notification, Relay, Subscriber};
use crate::core::store::{Change, NewProvider, ProviderPatch, ProviderStore, StoreError};
use crate::core::view::ViewManager;
use crate::host::{ShellHost, Surface, SurfaceSource};
use serde_json::Value;
use tracing::{debug, info, warn};

pub struct App {
    store: ProviderStore,
    views: ViewManager,
    relay: Relay,
    host: Box<dyn ShellHost>,
    torn_down: bool,
}

impl App {
    pub fn new(store: ProviderStore, host: Box<dyn ShellHost>, chrome_height: u32) -> Self {
        Self {
            store,
            views: ViewManager::new(chrome_height),
            relay: Relay::new(),
            host,
            torn_down: false,
        }
    }

    pub fn store(&self) -> &ProviderStore {
        &self.store
    }

    pub fn views(&self) -> &ViewManager {
        &self.views
    }

    /// Create the surfaces and attach the content surface.
    pub fn start(&mut self) {
        let repaired = self.views.ensure_surfaces(self.host.as_mut(), &mut self.store);
        self.views.attach(self.host.as_mut(), Surface::Content);
        if repaired {
            self.broadcast_providers();
        }
        info!(
            providers = self.store.providers().len(),
            default = ?self.store.default_id(),
            "shell started"
        );
    }

    pub fn on_resize(&mut self) {
        self.views.layout(self.host.as_mut());
    }

    /// Accept a chrome height reported by the chrome page. Values are
    /// rounded to whole logical pixels; non-finite or non-positive values
    /// are rejected.
    pub fn set_chrome_height(&mut self, height: f64) -> bool {
        if !height.is_finite() || height <= 0.0 {
            return false;
        }
        let rounded = height.round().min(f64::from(u32::MAX));
        if rounded < 1.0 {
            return false;
        }
        self.views
            .set_chrome_height(self.host.as_mut(), rounded as u32)
    }

    /// Navigate the content surface, leaving settings if it is open.
    pub fn navigate(&mut self, url: &str) -> bool {
        let outcome = self.views.navigate(self.host.as_mut(), url);
        if outcome.left_settings {
            self.broadcast_settings_state();
        }
        outcome.loaded
    }

    /// Show or hide settings. Subscribers always hear the resulting state.
    pub fn show_settings(&mut self, visible: bool) -> bool {
        let repaired = self
            .views
            .show_settings(self.host.as_mut(), &mut self.store, visible);
        if repaired {
            self.broadcast_providers();
        }
        self.broadcast_settings_state();
        self.views.settings_open()
    }

    pub fn toggle_settings(&mut self) -> bool {
        let visible = !self.views.settings_open();
        self.show_settings(visible)
    }

    pub fn settings_open(&self) -> bool {
        self.views.settings_open()
    }

    pub fn add_provider(&mut self, draft: NewProvider) -> Result<String, StoreError> {
        let (id, change) = self.store.add(draft)?;
        self.commit(change);
        Ok(id)
    }

    pub fn remove_provider(&mut self, id: &str) -> Result<(), StoreError> {
        let change = self.store.remove(id)?;
        self.commit(change);
        Ok(())
    }

    pub fn update_provider(&mut self, id: &str, patch: ProviderPatch) -> Result<(), StoreError> {
        let change = self.store.update(id, patch)?;
        self.commit(change);
        Ok(())
    }

    pub fn set_pinned(&mut self, id: &str, pinned: bool) -> Result<(), StoreError> {
        let change = self.store.set_pinned(id, pinned)?;
        self.commit(change);
        Ok(())
    }

    pub fn set_default(&mut self, id: &str) -> Result<(), StoreError> {
        let change = self.store.set_default(id)?;
        self.commit(change);
        Ok(())
    }

    /// Navigate to a provider's page without making it the default.
    pub fn open_provider(&mut self, id: &str) -> Result<(), StoreError> {
        let url = self
            .store
            .find(id)
            .map(|p| p.url.clone())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.navigate(&url);
        Ok(())
    }

    /// The content surface committed a navigation (full or in-page).
    pub fn on_content_navigated(&mut self, url: &str) {
        debug!(%url, "content navigated");
        self.relay.publish(
            self.host.as_mut(),
            &Notification::ActiveUrl {
                url,
                providers: self.store.providers(),
            },
        );
    }

    /// A UI page finished loading; bring it up to date.
    pub fn on_surface_ready(&mut self, subscriber: Subscriber) {
        debug!(?subscriber, "ui surface ready");
        let (providers, default_id) = self.store.list();
        self.relay.publish_to(
            self.host.as_mut(),
            subscriber,
            &Notification::Providers {
                providers,
                default_id,
            },
        );
        self.relay.publish_to(
            self.host.as_mut(),
            subscriber,
            &Notification::SettingsState {
                open: self.views.settings_open(),
            },
        );
    }

    pub fn minimize(&mut self) {
        self.host.minimize();
    }

    pub fn toggle_maximize(&mut self) {
        self.host.toggle_maximize();
    }

    pub fn request_close(&mut self) {
        self.host.request_close();
    }

    pub fn toggle_visibility(&mut self) {
        self.host.toggle_visibility();
    }

    pub fn start_drag(&mut self) {
        self.host.start_drag();
    }

    /// Send a command reply back to the page that asked.
    pub fn respond(&mut self, origin: Subscriber, request_id: u64, reply: &Value) {
        self.host.respond(origin, request_id, reply);
    }

    /// Release surfaces and global hotkeys. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.views.teardown(self.host.as_mut());
        self.host.unregister_hotkeys();
        info!("shell torn down");
    }

    fn commit(&mut self, change: Change) {
        match change {
            Change::Quiet => {}
            Change::Navigate(url) => {
                if !self
                    .views
                    .load_content(self.host.as_mut(), &SurfaceSource::Remote(url))
                {
                    warn!("content surface did not follow the default provider");
                }
            }
            Change::ShowPlaceholder => {
                self.views.show_placeholder(self.host.as_mut());
            }
        }
        self.broadcast_providers();
    }

    fn broadcast_providers(&mut self) {
        let (providers, default_id) = self.store.list();
        self.relay.publish(
            self.host.as_mut(),
            &Notification::Providers {
                providers,
                default_id,
            },
        );
    }

    fn broadcast_settings_state(&mut self) {
        self.relay.publish(
            self.host.as_mut(),
            &Notification::SettingsState {
                open: self.views.settings_open(),
            },
        );
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.teardown();
    }
}
