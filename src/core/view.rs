//! Bookkeeping for the content and settings surfaces.
//!
//! Exactly one surface is attached below the chrome strip at any time. The
//! view manager remembers which surfaces exist, which one is attached, and
//! the chrome height used to place it; the host does the actual work.

use crate::core::store::ProviderStore;
use crate::host::{Bounds, Surface, SurfaceHost, SurfaceSource, WindowSize};
use crate::utils::url::is_valid_url;
use tracing::{debug, warn};

/// Chrome strip height used until the chrome reports its own.
pub const DEFAULT_CHROME_HEIGHT: u32 = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewSelection {
    #[default]
    Content,
    Settings,
}

/// Bounds of the attached surface for a given window and chrome height.
pub fn surface_bounds(window: WindowSize, chrome_height: u32) -> Bounds {
    Bounds {
        x: 0,
        y: i32::try_from(chrome_height).unwrap_or(i32::MAX),
        width: window.width,
        height: window.height.saturating_sub(chrome_height),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigateOutcome {
    pub loaded: bool,
    /// Navigation switched the window back from settings to content.
    pub left_settings: bool,
}

pub struct ViewManager {
    chrome_height: u32,
    content_ready: bool,
    settings_ready: bool,
    attached: Option<Surface>,
    selection: ViewSelection,
}

impl ViewManager {
    pub fn new(chrome_height: u32) -> Self {
        Self {
            chrome_height,
            content_ready: false,
            settings_ready: false,
            attached: None,
            selection: ViewSelection::Content,
        }
    }

    pub fn chrome_height(&self) -> u32 {
        self.chrome_height
    }

    pub fn selection(&self) -> ViewSelection {
        self.selection
    }

    pub fn attached(&self) -> Option<Surface> {
        self.attached
    }

    pub fn settings_open(&self) -> bool {
        self.selection == ViewSelection::Settings
    }

    fn is_created(&self, surface: Surface) -> bool {
        match surface {
            Surface::Content => self.content_ready,
            Surface::Settings => self.settings_ready,
        }
    }

    /// Create whichever surfaces do not exist yet.
    ///
    /// The content surface opens on the default provider, repairing a
    /// dangling default pointer first. Returns `true` when that repair
    /// changed the store.
    pub fn ensure_surfaces<H>(&mut self, host: &mut H, store: &mut ProviderStore) -> bool
    where
        H: SurfaceHost + ?Sized,
    {
        let mut repaired = false;

        if !self.content_ready {
            repaired = store.repair_default();
            let source = match store.default_provider() {
                Some(provider) => SurfaceSource::Remote(provider.url.clone()),
                None => SurfaceSource::Placeholder,
            };
            match host.create_surface(Surface::Content, &source) {
                Ok(()) => self.content_ready = true,
                Err(err) => warn!(error = %err, "failed to create content surface"),
            }
        }

        if !self.settings_ready {
            match host.create_surface(Surface::Settings, &SurfaceSource::SettingsPage) {
                Ok(()) => self.settings_ready = true,
                Err(err) => warn!(error = %err, "failed to create settings surface"),
            }
        }

        repaired
    }

    /// Detach everything else and attach `surface`, then lay it out.
    pub fn attach<H>(&mut self, host: &mut H, surface: Surface)
    where
        H: SurfaceHost + ?Sized,
    {
        if !self.is_created(surface) {
            warn!(surface = surface.as_str(), "cannot attach a surface that was never created");
            return;
        }

        for other in [Surface::Content, Surface::Settings] {
            if other != surface && self.is_created(other) {
                if let Err(err) = host.set_attached(other, false) {
                    warn!(surface = other.as_str(), error = %err, "failed to detach surface");
                }
            }
        }

        if let Err(err) = host.set_attached(surface, true) {
            warn!(surface = surface.as_str(), error = %err, "failed to attach surface");
        }
        self.attached = Some(surface);
        self.layout(host);
    }

    /// Apply bounds to the attached surface. Returns the bounds applied.
    pub fn layout<H>(&self, host: &mut H) -> Option<Bounds>
    where
        H: SurfaceHost + ?Sized,
    {
        let surface = self.attached?;
        let bounds = surface_bounds(host.window_size(), self.chrome_height);
        if let Err(err) = host.set_bounds(surface, bounds) {
            warn!(surface = surface.as_str(), error = %err, "failed to apply bounds");
        }
        Some(bounds)
    }

    /// Store the height the chrome reported and re-lay out. Zero is ignored.
    pub fn set_chrome_height<H>(&mut self, host: &mut H, height: u32) -> bool
    where
        H: SurfaceHost + ?Sized,
    {
        if height == 0 {
            return false;
        }
        self.chrome_height = height;
        self.layout(host);
        true
    }

    /// Attach settings (`true`) or content (`false`), creating surfaces as
    /// needed. Returns `true` when the store's default had to be repaired.
    pub fn show_settings<H>(&mut self, host: &mut H, store: &mut ProviderStore, visible: bool) -> bool
    where
        H: SurfaceHost + ?Sized,
    {
        let repaired = self.ensure_surfaces(host, store);
        let (surface, selection) = if visible {
            (Surface::Settings, ViewSelection::Settings)
        } else {
            (Surface::Content, ViewSelection::Content)
        };

        if self.attached != Some(surface) {
            self.attach(host, surface);
        }
        if self.attached == Some(surface) {
            self.selection = selection;
        }
        debug!(open = self.settings_open(), "settings visibility");
        repaired
    }

    /// Load `url` into the content surface, returning to the content view
    /// when settings is showing. Invalid URLs are dropped.
    pub fn navigate<H>(&mut self, host: &mut H, url: &str) -> NavigateOutcome
    where
        H: SurfaceHost + ?Sized,
    {
        let mut outcome = NavigateOutcome {
            loaded: false,
            left_settings: false,
        };
        if !is_valid_url(url) {
            debug!(%url, "dropping navigation to invalid url");
            return outcome;
        }

        outcome.loaded = self.load_content(host, &SurfaceSource::Remote(url.trim().to_string()));
        if outcome.loaded && self.attached == Some(Surface::Settings) {
            self.attach(host, Surface::Content);
            self.selection = ViewSelection::Content;
            outcome.left_settings = true;
        }
        outcome
    }

    /// Load into the content surface without changing which surface is attached.
    pub fn load_content<H>(&mut self, host: &mut H, source: &SurfaceSource) -> bool
    where
        H: SurfaceHost + ?Sized,
    {
        if !self.content_ready {
            warn!("content surface not created yet");
            return false;
        }
        match host.load(Surface::Content, source) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "failed to load content surface");
                false
            }
        }
    }

    pub fn show_placeholder<H>(&mut self, host: &mut H) -> bool
    where
        H: SurfaceHost + ?Sized,
    {
        self.load_content(host, &SurfaceSource::Placeholder)
    }

    pub fn teardown<H>(&mut self, host: &mut H)
    where
        H: SurfaceHost + ?Sized,
    {
        host.destroy_surfaces();
        self.content_ready = false;
        self.settings_ready = false;
        self.attached = None;
        self.selection = ViewSelection::Content;
    }
}
