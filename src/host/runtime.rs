//! The window event loop. Owns the [`App`] and feeds it everything the
//! window, the webviews and the global shortcut report.

use crate::commands::handle_message;
use crate::core::app::App;
use crate::core::relay::Subscriber;
use crate::core::store::ProviderStore;
use crate::core::view::DEFAULT_CHROME_HEIGHT;
use crate::host::hotkey::Hotkeys;
use crate::host::webview::WebviewHost;
use crate::utils::cache::{purge_webview_data, webview_data_dir};
use std::error::Error;
use tao::dpi::LogicalSize;
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoopBuilder};
use tao::window::WindowBuilder;
use tracing::{debug, info, warn};

const WINDOW_TITLE: &str = "Chatdock";
const WINDOW_WIDTH: f64 = 1100.0;
const WINDOW_HEIGHT: f64 = 700.0;

/// Everything that reaches the event loop from outside the window itself.
#[derive(Debug)]
pub enum UserEvent {
    /// Raw envelope posted by the chrome or settings page.
    Ipc { origin: Subscriber, message: String },
    ContentNavigated(String),
    SurfaceReady(Subscriber),
    ToggleWindow,
    CloseRequested,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Wipe the webview profile before creating any surface.
    pub recover_cache: bool,
}

/// Apply one event to the app. Returns `false` when the loop should exit.
pub fn handle_user_event(app: &mut App, event: UserEvent) -> bool {
    match event {
        UserEvent::Ipc { origin, message } => {
            let reply = handle_message(app, origin, &message);
            if !reply.is_ok() {
                debug!(?origin, %message, "command did not succeed");
            }
        }
        UserEvent::ContentNavigated(url) => app.on_content_navigated(&url),
        UserEvent::SurfaceReady(subscriber) => app.on_surface_ready(subscriber),
        UserEvent::ToggleWindow => app.toggle_visibility(),
        UserEvent::CloseRequested => {
            app.teardown();
            return false;
        }
    }
    true
}

/// Open the window and run until it closes. Does not return on success.
pub fn run(store: ProviderStore, options: RunOptions) -> Result<(), Box<dyn Error>> {
    let data_dir = webview_data_dir();
    if options.recover_cache {
        match data_dir.as_deref() {
            Some(dir) => match purge_webview_data(dir) {
                Ok(true) => info!(dir = %dir.display(), "cleared webview cache"),
                Ok(false) => debug!(dir = %dir.display(), "no webview cache to clear"),
                Err(err) => warn!(dir = %dir.display(), error = %err, "failed to clear webview cache"),
            },
            None => warn!("cache recovery requested but no cache directory is known"),
        }
    }

    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .with_inner_size(LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
        .with_decorations(false)
        .build(&event_loop)?;

    let mut host = WebviewHost::new(window, proxy.clone(), data_dir)?;
    match Hotkeys::register(proxy) {
        Ok(hotkeys) => host.set_hotkeys(hotkeys),
        Err(err) => warn!(error = %err, "global shortcut unavailable"),
    }

    let mut app = App::new(store, Box::new(host), DEFAULT_CHROME_HEIGHT);
    app.start();

    event_loop.run(move |event, _target, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                app.teardown();
                *control_flow = ControlFlow::Exit;
            }
            Event::WindowEvent {
                event: WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. },
                ..
            } => app.on_resize(),
            Event::UserEvent(user_event) => {
                if !handle_user_event(&mut app, user_event) {
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    })
}
