use crate::commands::payload::{parse, AddPayload, IdArg, PinnedPayload, UpdatePayload};
use crate::commands::Reply;
use crate::core::app::App;
use crate::core::store::{NewProvider, ProviderPatch};
use serde_json::Value;

pub(crate) fn handle_list(app: &mut App, _payload: &Value) -> Reply {
    Reply::providers(app.store())
}

pub(crate) fn handle_set_default(app: &mut App, payload: &Value) -> Reply {
    match parse::<IdArg>(payload) {
        Ok(arg) => app.set_default(&arg.into_id()).into(),
        Err(reply) => reply,
    }
}

pub(crate) fn handle_open(app: &mut App, payload: &Value) -> Reply {
    match parse::<IdArg>(payload) {
        Ok(arg) => app.open_provider(&arg.into_id()).into(),
        Err(reply) => reply,
    }
}

pub(crate) fn handle_remove(app: &mut App, payload: &Value) -> Reply {
    match parse::<IdArg>(payload) {
        Ok(arg) => app.remove_provider(&arg.into_id()).into(),
        Err(reply) => reply,
    }
}

pub(crate) fn handle_add(app: &mut App, payload: &Value) -> Reply {
    let add = match parse::<AddPayload>(payload) {
        Ok(add) => add,
        Err(reply) => return reply,
    };
    let draft = NewProvider {
        label: add.label,
        url: add.url,
        icon: add.icon.unwrap_or_default(),
        pinned: add.pinned.unwrap_or(false),
        set_as_default: add.set_as_default.unwrap_or(false),
    };
    match app.add_provider(draft) {
        Ok(id) => Reply::added(id),
        Err(err) => Reply::failed(&err),
    }
}

pub(crate) fn handle_set_pinned(app: &mut App, payload: &Value) -> Reply {
    match parse::<PinnedPayload>(payload) {
        Ok(pinned) => app.set_pinned(&pinned.id, pinned.pinned).into(),
        Err(reply) => reply,
    }
}

pub(crate) fn handle_update(app: &mut App, payload: &Value) -> Reply {
    let update = match parse::<UpdatePayload>(payload) {
        Ok(update) => update,
        Err(reply) => return reply,
    };
    let patch = ProviderPatch {
        label: update.label,
        url: update.url,
        icon: update.icon,
    };
    app.update_provider(&update.id, patch).into()
}
