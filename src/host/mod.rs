//! Seams between the application core and the windowing/webview layer.
//!
//! The core never talks to `tao` or `wry` directly. It drives surfaces,
//! pushes notifications and issues window requests through the traits in
//! this module, which lets the whole command path run against a recording
//! fake in tests. The production implementation lives in [`webview`] and is
//! driven by the event loop in [`runtime`].

pub mod bridge;
pub mod hotkey;
pub mod runtime;
pub mod webview;

use crate::core::relay::{Subscriber, Topic};
use serde_json::Value;
use std::error::Error as StdError;
use std::fmt;

/// One of the two embedded surfaces shown below the chrome strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Content,
    Settings,
}

impl Surface {
    pub fn as_str(self) -> &'static str {
        match self {
            Surface::Content => "content",
            Surface::Settings => "settings",
        }
    }
}

/// What a surface should display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceSource {
    Remote(String),
    /// Built-in page shown when no provider is configured.
    Placeholder,
    SettingsPage,
}

/// Logical window content size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

/// Logical pixel rectangle applied to an attached surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug)]
pub enum HostError {
    /// The surface has not been created or was already destroyed.
    MissingSurface(Surface),
    Webview(wry::Error),
    Window(tao::error::OsError),
    Hotkey(global_hotkey::Error),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::MissingSurface(surface) => {
                write!(f, "{} surface does not exist", surface.as_str())
            }
            HostError::Webview(err) => write!(f, "webview error: {err}"),
            HostError::Window(err) => write!(f, "window error: {err}"),
            HostError::Hotkey(err) => write!(f, "global hotkey error: {err}"),
        }
    }
}

impl StdError for HostError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            HostError::MissingSurface(_) => None,
            HostError::Webview(err) => Some(err),
            HostError::Window(err) => Some(err),
            HostError::Hotkey(err) => Some(err),
        }
    }
}

impl From<wry::Error> for HostError {
    fn from(err: wry::Error) -> Self {
        HostError::Webview(err)
    }
}

impl From<tao::error::OsError> for HostError {
    fn from(err: tao::error::OsError) -> Self {
        HostError::Window(err)
    }
}

impl From<global_hotkey::Error> for HostError {
    fn from(err: global_hotkey::Error) -> Self {
        HostError::Hotkey(err)
    }
}

/// Creation, loading and placement of the embedded surfaces.
pub trait SurfaceHost {
    fn window_size(&self) -> WindowSize;

    fn create_surface(&mut self, surface: Surface, source: &SurfaceSource)
        -> Result<(), HostError>;

    fn load(&mut self, surface: Surface, source: &SurfaceSource) -> Result<(), HostError>;

    /// Show (`true`) or hide the surface inside the window.
    fn set_attached(&mut self, surface: Surface, attached: bool) -> Result<(), HostError>;

    fn set_bounds(&mut self, surface: Surface, bounds: Bounds) -> Result<(), HostError>;

    fn destroy_surfaces(&mut self);
}

/// Delivery of push notifications and command replies to UI processes.
pub trait NotificationSink {
    /// Returns `false` when the subscriber has no live surface to receive it.
    fn deliver(&mut self, subscriber: Subscriber, topic: Topic, payload: &Value) -> bool;

    fn respond(&mut self, origin: Subscriber, request_id: u64, reply: &Value);
}

pub trait WindowControls {
    fn minimize(&mut self);
    fn toggle_maximize(&mut self);
    /// Ask the event loop to close the window; teardown happens there.
    fn request_close(&mut self);
    /// Restore when minimized, minimize when visible, otherwise show.
    fn toggle_visibility(&mut self);
    /// Begin moving the frameless window with the pointer.
    fn start_drag(&mut self);
    fn unregister_hotkeys(&mut self);
}

/// Everything the application state needs from its host.
pub trait ShellHost: SurfaceHost + NotificationSink + WindowControls {}

impl<T> ShellHost for T where T: SurfaceHost + NotificationSink + WindowControls {}
