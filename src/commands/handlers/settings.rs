use crate::commands::payload::{parse, VisibleArg};
use crate::commands::Reply;
use crate::core::app::App;
use serde_json::Value;

pub(crate) fn handle_show(app: &mut App, payload: &Value) -> Reply {
    match parse::<VisibleArg>(payload) {
        Ok(arg) => Reply::settings(app.show_settings(arg.visible())),
        Err(reply) => reply,
    }
}

pub(crate) fn handle_toggle(app: &mut App, _payload: &Value) -> Reply {
    Reply::settings(app.toggle_settings())
}

pub(crate) fn handle_get_state(app: &mut App, _payload: &Value) -> Reply {
    Reply::settings(app.settings_open())
}

pub(crate) fn handle_open(app: &mut App, _payload: &Value) -> Reply {
    Reply::settings(app.show_settings(true))
}
