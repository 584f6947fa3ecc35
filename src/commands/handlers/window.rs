use crate::commands::payload::{parse, HeightArg};
use crate::commands::Reply;
use crate::core::app::App;
use serde_json::Value;

pub(crate) fn handle_minimize(app: &mut App, _payload: &Value) -> Reply {
    app.minimize();
    Reply::ok()
}

pub(crate) fn handle_close(app: &mut App, _payload: &Value) -> Reply {
    app.request_close();
    Reply::ok()
}

pub(crate) fn handle_toggle_maximize(app: &mut App, _payload: &Value) -> Reply {
    app.toggle_maximize();
    Reply::ok()
}

pub(crate) fn handle_drag(app: &mut App, _payload: &Value) -> Reply {
    app.start_drag();
    Reply::ok()
}

pub(crate) fn handle_set_chrome_height(app: &mut App, payload: &Value) -> Reply {
    let height = match parse::<HeightArg>(payload) {
        Ok(arg) => arg.height(),
        Err(reply) => return reply,
    };
    if app.set_chrome_height(height) {
        Reply::ok()
    } else {
        Reply::invalid()
    }
}
