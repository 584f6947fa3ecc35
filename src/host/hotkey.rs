use crate::host::runtime::UserEvent;
use crate::host::HostError;
use global_hotkey::hotkey::{Code, HotKey, Modifiers};
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use std::sync::Mutex;
use tao::event_loop::EventLoopProxy;
use tracing::{debug, warn};

/// Ctrl+Space shows, hides or restores the window from anywhere.
pub fn toggle_window_hotkey() -> HotKey {
    HotKey::new(Some(Modifiers::CONTROL), Code::Space)
}

/// System-wide shortcuts owned by the shell for as long as it runs.
pub struct Hotkeys {
    manager: GlobalHotKeyManager,
    registered: Vec<HotKey>,
}

impl Hotkeys {
    /// Register the toggle shortcut and forward its presses to the event loop.
    pub fn register(proxy: EventLoopProxy<UserEvent>) -> Result<Self, HostError> {
        let manager = GlobalHotKeyManager::new()?;
        let toggle = toggle_window_hotkey();
        manager.register(toggle)?;

        let toggle_id = toggle.id();
        let proxy = Mutex::new(proxy);
        GlobalHotKeyEvent::set_event_handler(Some(move |event: GlobalHotKeyEvent| {
            if event.id() != toggle_id || event.state() != HotKeyState::Pressed {
                return;
            }
            let Ok(proxy) = proxy.lock() else {
                return;
            };
            if proxy.send_event(UserEvent::ToggleWindow).is_err() {
                debug!("event loop gone, dropping hotkey press");
            }
        }));

        Ok(Self {
            manager,
            registered: vec![toggle],
        })
    }

    pub fn unregister_all(&mut self) {
        if self.registered.is_empty() {
            return;
        }
        if let Err(err) = self.manager.unregister_all(&self.registered) {
            warn!(error = %err, "failed to unregister global shortcuts");
        }
        self.registered.clear();
        GlobalHotKeyEvent::set_event_handler(None::<fn(GlobalHotKeyEvent)>);
    }
}

impl Drop for Hotkeys {
    fn drop(&mut self) {
        self.unregister_all();
    }
}
