//! Named commands the UI surfaces can invoke.
//!
//! Each command takes an optional JSON payload and produces a [`Reply`].
//! Failures are reported in the reply; nothing panics or propagates across
//! the IPC boundary.

mod handlers;
mod payload;
mod registry;


pub use registry::{all_commands, command_help, find_command, Command, CommandHandler};

use crate::core::app::App;
use crate::core::provider::Provider;
use crate::core::relay::Subscriber;
use crate::core::store::{ProviderStore, StoreError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// Wire kind for unknown commands and payloads that fail to parse.
pub const INVALID: &str = "invalid";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Status {
        ok: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<&'static str>,
    },
    Settings {
        ok: bool,
        open: bool,
    },
    Providers {
        providers: Vec<Provider>,
        #[serde(rename = "defaultId")]
        default_id: Option<String>,
    },
}

impl Reply {
    pub fn ok() -> Self {
        Reply::Status {
            ok: true,
            id: None,
            error: None,
        }
    }

    /// Request dropped without a reason, e.g. navigation to a bad URL.
    pub fn rejected() -> Self {
        Reply::Status {
            ok: false,
            id: None,
            error: None,
        }
    }

    pub fn invalid() -> Self {
        Reply::Status {
            ok: false,
            id: None,
            error: Some(INVALID),
        }
    }

    pub fn failed(err: &StoreError) -> Self {
        Reply::Status {
            ok: false,
            id: None,
            error: Some(err.kind()),
        }
    }

    pub fn added(id: String) -> Self {
        Reply::Status {
            ok: true,
            id: Some(id),
            error: None,
        }
    }

    pub fn settings(open: bool) -> Self {
        Reply::Settings { ok: true, open }
    }

    pub fn providers(store: &ProviderStore) -> Self {
        let (providers, default_id) = store.list();
        Reply::Providers {
            providers: providers.to_vec(),
            default_id: default_id.map(str::to_string),
        }
    }

    pub fn is_ok(&self) -> bool {
        match self {
            Reply::Status { ok, .. } | Reply::Settings { ok, .. } => *ok,
            Reply::Providers { .. } => true,
        }
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl From<Result<(), StoreError>> for Reply {
    fn from(result: Result<(), StoreError>) -> Self {
        match result {
            Ok(()) => Reply::ok(),
            Err(err) => {
                debug!(error = %err, "command failed");
                Reply::failed(&err)
            }
        }
    }
}

/// Run one command by name.
pub fn dispatch(app: &mut App, name: &str, payload: &Value) -> Reply {
    match find_command(name) {
        Some(command) => (command.handler)(app, payload),
        None => {
            debug!(command = name, available = %command_help(), "unknown command");
            Reply::invalid()
        }
    }
}

/// Message posted by a UI surface over IPC.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    /// Present when the page awaits a reply. Must be a non-negative integer;
    /// an envelope with any other id is rejected without running the command.
    #[serde(default)]
    pub id: Option<u64>,
    pub cmd: String,
    #[serde(default)]
    pub payload: Value,
}

/// Parse a raw IPC message from `origin`, run it, and send the reply back
/// when the page asked for one.
pub fn handle_message(app: &mut App, origin: Subscriber, raw: &str) -> Reply {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(?origin, error = %err, "dropping unparseable ipc message");
            return Reply::invalid();
        }
    };
    let request_id = match value.get("id") {
        None | Some(Value::Null) => None,
        Some(id) => match id.as_u64() {
            Some(id) => Some(id),
            None => {
                warn!(?origin, %id, "request id is not a non-negative integer");
                return Reply::invalid();
            }
        },
    };

    let reply = match Envelope::deserialize(&value) {
        Ok(envelope) => {
            debug!(?origin, cmd = %envelope.cmd, "command");
            dispatch(app, &envelope.cmd, &envelope.payload)
        }
        Err(err) => {
            warn!(?origin, error = %err, "malformed command envelope");
            Reply::invalid()
        }
    };

    if let Some(request_id) = request_id {
        app.respond(origin, request_id, &reply.to_json());
    }
    reply
}
