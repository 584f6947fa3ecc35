#[cfg(test)]
use crate::core::app::App;
#[cfg(test)]
use crate::core::config::SettingsFile;
#[cfg(test)]
use crate::core::relay::{Subscriber, Topic};
#[cfg(test)]
use crate::core::store::ProviderStore;
#[cfg(test)]
use crate::core::view::DEFAULT_CHROME_HEIGHT;
#[cfg(test)]
use crate::host::{
    Bounds, HostError, NotificationSink, Surface, SurfaceHost, SurfaceSource, WindowControls,
    WindowSize,
};
#[cfg(test)]
use serde_json::Value;
#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::{HashMap, HashSet};
#[cfg(test)]
use std::rc::Rc;
#[cfg(test)]
use tempfile::TempDir;

/// A store backed by a fresh temp dir, seeded with the built-in providers.
#[cfg(test)]
pub fn temp_store() -> (TempDir, ProviderStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let store = ProviderStore::open(SettingsFile::new(temp_dir.path().join("settings.toml")));
    (temp_dir, store)
}

/// A started app (content attached) over a 1100x700 recording host.
#[cfg(test)]
pub fn create_test_app() -> (TempDir, App, RecordingHost) {
    let (temp_dir, store) = temp_store();
    let host = RecordingHost::new(1100, 700);
    let mut app = App::new(store, Box::new(host.clone()), DEFAULT_CHROME_HEIGHT);
    app.start();
    (temp_dir, app, host)
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Create(Surface, SurfaceSource),
    Load(Surface, SurfaceSource),
    Attach(Surface, bool),
    Bounds(Surface, Bounds),
    Destroy,
    Deliver(Subscriber, Topic),
    Minimize,
    ToggleMaximize,
    Close,
    ToggleVisibility,
    Drag,
    UnregisterHotkeys,
}

#[cfg(test)]
#[derive(Debug)]
struct HostLog {
    size: WindowSize,
    calls: Vec<HostCall>,
    live: HashSet<Surface>,
    attached: HashSet<Surface>,
    bounds: HashMap<Surface, Bounds>,
    deliveries: Vec<(Subscriber, Topic, Value)>,
    responses: Vec<(Subscriber, u64, Value)>,
}

/// Host fake that records every call. Clones share the same log, so a test
/// can keep one handle while the app owns another.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct RecordingHost {
    log: Rc<RefCell<HostLog>>,
}

#[cfg(test)]
impl RecordingHost {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            log: Rc::new(RefCell::new(HostLog {
                size: WindowSize { width, height },
                calls: Vec::new(),
                live: HashSet::new(),
                attached: HashSet::new(),
                bounds: HashMap::new(),
                deliveries: Vec::new(),
                responses: Vec::new(),
            })),
        }
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.log.borrow_mut().size = WindowSize { width, height };
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.log.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        let mut log = self.log.borrow_mut();
        log.calls.clear();
        log.deliveries.clear();
        log.responses.clear();
    }

    /// Attached surfaces in a stable order.
    pub fn attached_surfaces(&self) -> Vec<Surface> {
        let log = self.log.borrow();
        [Surface::Content, Surface::Settings]
            .into_iter()
            .filter(|s| log.attached.contains(s))
            .collect()
    }

    pub fn bounds_of(&self, surface: Surface) -> Option<Bounds> {
        self.log.borrow().bounds.get(&surface).copied()
    }

    pub fn deliveries(&self) -> Vec<(Subscriber, Topic, Value)> {
        self.log.borrow().deliveries.clone()
    }

    pub fn deliveries_of(&self, topic: Topic) -> Vec<(Subscriber, Value)> {
        self.deliveries()
            .into_iter()
            .filter(|(_, t, _)| *t == topic)
            .map(|(s, _, v)| (s, v))
            .collect()
    }

    pub fn responses(&self) -> Vec<(Subscriber, u64, Value)> {
        self.log.borrow().responses.clone()
    }

    /// Sources loaded into the content surface after creation.
    pub fn content_loads(&self) -> Vec<SurfaceSource> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::Load(Surface::Content, source) => Some(source),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: HostCall) {
        self.log.borrow_mut().calls.push(call);
    }

    fn require_live(&self, surface: Surface) -> Result<(), HostError> {
        if self.log.borrow().live.contains(&surface) {
            Ok(())
        } else {
            Err(HostError::MissingSurface(surface))
        }
    }
}

#[cfg(test)]
impl SurfaceHost for RecordingHost {
    fn window_size(&self) -> WindowSize {
        self.log.borrow().size
    }

    fn create_surface(
        &mut self,
        surface: Surface,
        source: &SurfaceSource,
    ) -> Result<(), HostError> {
        self.record(HostCall::Create(surface, source.clone()));
        self.log.borrow_mut().live.insert(surface);
        Ok(())
    }

    fn load(&mut self, surface: Surface, source: &SurfaceSource) -> Result<(), HostError> {
        self.require_live(surface)?;
        self.record(HostCall::Load(surface, source.clone()));
        Ok(())
    }

    fn set_attached(&mut self, surface: Surface, attached: bool) -> Result<(), HostError> {
        self.require_live(surface)?;
        self.record(HostCall::Attach(surface, attached));
        let mut log = self.log.borrow_mut();
        if attached {
            log.attached.insert(surface);
        } else {
            log.attached.remove(&surface);
        }
        Ok(())
    }

    fn set_bounds(&mut self, surface: Surface, bounds: Bounds) -> Result<(), HostError> {
        self.require_live(surface)?;
        self.record(HostCall::Bounds(surface, bounds));
        self.log.borrow_mut().bounds.insert(surface, bounds);
        Ok(())
    }

    fn destroy_surfaces(&mut self) {
        self.record(HostCall::Destroy);
        let mut log = self.log.borrow_mut();
        log.live.clear();
        log.attached.clear();
    }
}

#[cfg(test)]
impl NotificationSink for RecordingHost {
    fn deliver(&mut self, subscriber: Subscriber, topic: Topic, payload: &Value) -> bool {
        let mut log = self.log.borrow_mut();
        if subscriber == Subscriber::Settings && !log.live.contains(&Surface::Settings) {
            return false;
        }
        log.calls.push(HostCall::Deliver(subscriber, topic));
        log.deliveries.push((subscriber, topic, payload.clone()));
        true
    }

    fn respond(&mut self, origin: Subscriber, request_id: u64, reply: &Value) {
        self.log
            .borrow_mut()
            .responses
            .push((origin, request_id, reply.clone()));
    }
}

#[cfg(test)]
impl WindowControls for RecordingHost {
    fn minimize(&mut self) {
        self.record(HostCall::Minimize);
    }

    fn toggle_maximize(&mut self) {
        self.record(HostCall::ToggleMaximize);
    }

    fn request_close(&mut self) {
        self.record(HostCall::Close);
    }

    fn toggle_visibility(&mut self) {
        self.record(HostCall::ToggleVisibility);
    }

    fn start_drag(&mut self) {
        self.record(HostCall::Drag);
    }

    fn unregister_hotkeys(&mut self) {
        self.record(HostCall::UnregisterHotkeys);
    }
}
