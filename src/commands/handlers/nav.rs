use crate::commands::payload::{parse, UrlArg};
use crate::commands::Reply;
use crate::core::app::App;
use serde_json::Value;

pub(crate) fn handle_go(app: &mut App, payload: &Value) -> Reply {
    let url = match parse::<UrlArg>(payload) {
        Ok(arg) => arg.into_url(),
        Err(reply) => return reply,
    };
    if app.navigate(&url) {
        Reply::ok()
    } else {
        Reply::rejected()
    }
}
