//! Production host: one frameless `tao` window with up to three `wry`
//! child webviews.
//!
//! The chrome strip is created with the window and lives as long as it.
//! Content and settings are created on demand, stacked below the chrome,
//! and shown or hidden to attach and detach them. Every webview callback
//! only posts a [`UserEvent`] so all state changes happen on the event
//! loop thread.

use crate::core::relay::{Subscriber, Topic};
use crate::core::view::DEFAULT_CHROME_HEIGHT;
use crate::host::bridge::{
    emit_script, parse_content_report, resolve_script, BRIDGE_JS, CONTENT_REPORTER_JS,
    PLACEHOLDER_HTML, SETTINGS_HTML, SHELL_HTML,
};
use crate::host::hotkey::Hotkeys;
use crate::host::runtime::UserEvent;
use crate::host::{
    Bounds, HostError, NotificationSink, Surface, SurfaceHost, SurfaceSource, WindowControls,
    WindowSize,
};
use crate::utils::url::is_valid_url;
use serde_json::Value;
use std::path::PathBuf;
use tao::event_loop::EventLoopProxy;
use tao::window::Window;
use tracing::{debug, info, warn};
use wry::dpi::{LogicalPosition, LogicalSize};
use wry::{PageLoadEvent, Rect, WebContext, WebView, WebViewBuilder};

fn rect(x: i32, y: i32, width: u32, height: u32) -> Rect {
    Rect {
        position: LogicalPosition::new(x, y).into(),
        size: LogicalSize::new(width, height).into(),
    }
}

fn bounds_rect(bounds: Bounds) -> Rect {
    rect(bounds.x, bounds.y, bounds.width, bounds.height)
}

/// Web links a hosted page tried to open in a new window go to the system
/// browser instead. Anything else is dropped.
pub fn external_link_target(url: &str) -> Option<&str> {
    is_valid_url(url).then(|| url.trim())
}

fn open_externally(url: String) -> bool {
    match external_link_target(&url) {
        Some(target) => {
            info!(url = %target, "opening new window request in the system browser");
            if let Err(err) = open::that(target) {
                warn!(url = %target, error = %err, "failed to open external browser");
            }
        }
        None => info!(%url, "blocked new window request"),
    }
    false
}

/// Builder for a page that talks to the core through the bridge.
fn ui_builder<'a>(
    web_context: &'a mut WebContext,
    proxy: &EventLoopProxy<UserEvent>,
    origin: Subscriber,
) -> WebViewBuilder<'a> {
    let ipc_proxy = proxy.clone();
    let load_proxy = proxy.clone();
    WebViewBuilder::with_web_context(web_context)
        .with_devtools(cfg!(debug_assertions))
        .with_initialization_script(BRIDGE_JS)
        .with_ipc_handler(move |request| {
            let message = request.into_body();
            if ipc_proxy
                .send_event(UserEvent::Ipc { origin, message })
                .is_err()
            {
                debug!("event loop gone, dropping ipc message");
            }
        })
        .with_on_page_load_handler(move |event, _url| {
            if matches!(event, PageLoadEvent::Finished) {
                let _ = load_proxy.send_event(UserEvent::SurfaceReady(origin));
            }
        })
        .with_new_window_req_handler(open_externally)
}

/// Builder for the provider page. Its IPC channel only carries navigation
/// reports; commands posted from a provider page are ignored.
fn content_builder<'a>(
    web_context: &'a mut WebContext,
    proxy: &EventLoopProxy<UserEvent>,
) -> WebViewBuilder<'a> {
    let ipc_proxy = proxy.clone();
    let load_proxy = proxy.clone();
    WebViewBuilder::with_web_context(web_context)
        .with_devtools(cfg!(debug_assertions))
        .with_clipboard(true)
        .with_initialization_script(CONTENT_REPORTER_JS)
        .with_ipc_handler(move |request| match parse_content_report(request.body()) {
            Some(url) => {
                let _ = ipc_proxy.send_event(UserEvent::ContentNavigated(url));
            }
            None => debug!("ignoring message from content page"),
        })
        .with_on_page_load_handler(move |event, url| {
            if matches!(event, PageLoadEvent::Finished) {
                let _ = load_proxy.send_event(UserEvent::ContentNavigated(url));
            }
        })
        .with_new_window_req_handler(open_externally)
}

fn with_source<'a>(builder: WebViewBuilder<'a>, source: &SurfaceSource) -> WebViewBuilder<'a> {
    match source {
        SurfaceSource::Remote(url) => builder.with_url(url.as_str()),
        SurfaceSource::Placeholder => builder.with_html(PLACEHOLDER_HTML),
        SurfaceSource::SettingsPage => builder.with_html(SETTINGS_HTML),
    }
}

pub struct WebviewHost {
    chrome: WebView,
    content: Option<WebView>,
    settings: Option<WebView>,
    hotkeys: Option<Hotkeys>,
    web_context: WebContext,
    proxy: EventLoopProxy<UserEvent>,
    window: Window,
}

impl WebviewHost {
    /// Build the chrome strip inside `window`. Webview profile data goes to
    /// `data_dir` when given, otherwise to the platform default.
    pub fn new(
        window: Window,
        proxy: EventLoopProxy<UserEvent>,
        data_dir: Option<PathBuf>,
    ) -> Result<Self, HostError> {
        let mut web_context = WebContext::new(data_dir);
        let width = window_size(&window).width;
        let chrome = ui_builder(&mut web_context, &proxy, Subscriber::Chrome)
            .with_html(SHELL_HTML)
            .with_bounds(rect(0, 0, width, DEFAULT_CHROME_HEIGHT))
            .build_as_child(&window)?;

        Ok(Self {
            chrome,
            content: None,
            settings: None,
            hotkeys: None,
            web_context,
            proxy,
            window,
        })
    }

    pub fn set_hotkeys(&mut self, hotkeys: Hotkeys) {
        self.hotkeys = Some(hotkeys);
    }

    fn surface(&self, surface: Surface) -> Result<&WebView, HostError> {
        let webview = match surface {
            Surface::Content => self.content.as_ref(),
            Surface::Settings => self.settings.as_ref(),
        };
        webview.ok_or(HostError::MissingSurface(surface))
    }

    fn subscriber_view(&self, subscriber: Subscriber) -> Option<&WebView> {
        match subscriber {
            Subscriber::Chrome => Some(&self.chrome),
            Subscriber::Settings => self.settings.as_ref(),
        }
    }
}

fn window_size(window: &Window) -> WindowSize {
    let size = window
        .inner_size()
        .to_logical::<f64>(window.scale_factor());
    WindowSize {
        width: size.width.max(0.0).round() as u32,
        height: size.height.max(0.0).round() as u32,
    }
}

impl SurfaceHost for WebviewHost {
    fn window_size(&self) -> WindowSize {
        window_size(&self.window)
    }

    fn create_surface(
        &mut self,
        surface: Surface,
        source: &SurfaceSource,
    ) -> Result<(), HostError> {
        if self.surface(surface).is_ok() {
            return self.load(surface, source);
        }

        let builder = match surface {
            Surface::Content => content_builder(&mut self.web_context, &self.proxy),
            Surface::Settings => {
                ui_builder(&mut self.web_context, &self.proxy, Subscriber::Settings)
            }
        };
        let webview = with_source(builder, source)
            .with_visible(false)
            .with_bounds(rect(0, 0, 0, 0))
            .build_as_child(&self.window)?;

        debug!(surface = surface.as_str(), "created surface");
        match surface {
            Surface::Content => self.content = Some(webview),
            Surface::Settings => self.settings = Some(webview),
        }
        Ok(())
    }

    fn load(&mut self, surface: Surface, source: &SurfaceSource) -> Result<(), HostError> {
        let webview = self.surface(surface)?;
        match source {
            SurfaceSource::Remote(url) => webview.load_url(url)?,
            SurfaceSource::Placeholder => webview.load_html(PLACEHOLDER_HTML)?,
            SurfaceSource::SettingsPage => webview.load_html(SETTINGS_HTML)?,
        }
        Ok(())
    }

    fn set_attached(&mut self, surface: Surface, attached: bool) -> Result<(), HostError> {
        self.surface(surface)?.set_visible(attached)?;
        Ok(())
    }

    fn set_bounds(&mut self, surface: Surface, bounds: Bounds) -> Result<(), HostError> {
        self.surface(surface)?.set_bounds(bounds_rect(bounds))?;
        let chrome_height = u32::try_from(bounds.y).unwrap_or(0);
        self.chrome
            .set_bounds(rect(0, 0, bounds.width, chrome_height))?;
        Ok(())
    }

    fn destroy_surfaces(&mut self) {
        self.content.take();
        self.settings.take();
    }
}

impl NotificationSink for WebviewHost {
    fn deliver(&mut self, subscriber: Subscriber, topic: Topic, payload: &Value) -> bool {
        let Some(webview) = self.subscriber_view(subscriber) else {
            return false;
        };
        match webview.evaluate_script(&emit_script(topic, payload)) {
            Ok(()) => true,
            Err(err) => {
                warn!(topic = topic.wire_name(), error = %err, "failed to deliver notification");
                false
            }
        }
    }

    fn respond(&mut self, origin: Subscriber, request_id: u64, reply: &Value) {
        let Some(webview) = self.subscriber_view(origin) else {
            debug!(request_id, "reply target is gone");
            return;
        };
        if let Err(err) = webview.evaluate_script(&resolve_script(request_id, reply)) {
            warn!(request_id, error = %err, "failed to send reply");
        }
    }
}

impl WindowControls for WebviewHost {
    fn minimize(&mut self) {
        self.window.set_minimized(true);
    }

    fn toggle_maximize(&mut self) {
        self.window.set_maximized(!self.window.is_maximized());
    }

    fn request_close(&mut self) {
        let _ = self.proxy.send_event(UserEvent::CloseRequested);
    }

    fn toggle_visibility(&mut self) {
        if self.window.is_minimized() {
            self.window.set_minimized(false);
            self.window.set_focus();
        } else if self.window.is_visible() {
            self.window.set_minimized(true);
        } else {
            self.window.set_visible(true);
            self.window.set_focus();
        }
    }

    fn start_drag(&mut self) {
        if let Err(err) = self.window.drag_window() {
            warn!(error = %err, "window drag failed");
        }
    }

    fn unregister_hotkeys(&mut self) {
        if let Some(mut hotkeys) = self.hotkeys.take() {
            hotkeys.unregister_all();
        }
    }
}
