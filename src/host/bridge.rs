//! Pages, injected scripts and the script snippets used to talk to them.
//!
//! The chrome and settings pages get `window.chatdock` from [`BRIDGE_JS`]
//! and post `{id, cmd, payload}` envelopes through `window.ipc`. The host
//! answers by evaluating [`resolve_script`] and pushes notifications with
//! [`emit_script`]. Provider pages only get [`CONTENT_REPORTER_JS`], which
//! reports in-page navigation and nothing else.

use crate::core::relay::Topic;
use serde::Deserialize;
use serde_json::Value;

pub const BRIDGE_JS: &str = include_str!("ui/bridge.js");
pub const CONTENT_REPORTER_JS: &str = include_str!("ui/content.js");
pub const SHELL_HTML: &str = include_str!("ui/shell.html");
pub const SETTINGS_HTML: &str = include_str!("ui/settings.html");
pub const PLACEHOLDER_HTML: &str = include_str!("ui/placeholder.html");

/// Script that hands a notification to the page's listeners.
pub fn emit_script(topic: Topic, payload: &Value) -> String {
    format!(
        "window.chatdock && window.chatdock.emit({}, {});",
        Value::from(topic.wire_name()),
        payload
    )
}

/// Script that settles the pending `invoke` promise for `request_id`.
pub fn resolve_script(request_id: u64, reply: &Value) -> String {
    format!("window.chatdock && window.chatdock.resolve({request_id}, {reply});")
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum ContentReport {
    Navigated { url: String },
}

/// Extract the URL from a message posted by the content reporter.
pub fn parse_content_report(raw: &str) -> Option<String> {
    match serde_json::from_str::<ContentReport>(raw).ok()? {
        ContentReport::Navigated { url } => Some(url),
    }
}
