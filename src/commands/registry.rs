use super::{handlers, Reply};
use crate::core::app::App;
use serde_json::Value;

pub type CommandHandler = fn(&mut App, &Value) -> Reply;

pub struct Command {
    pub name: &'static str,
    pub help: &'static str,
    pub handler: CommandHandler,
}

pub fn all_commands() -> &'static [Command] {
    COMMANDS
}

pub fn find_command(name: &str) -> Option<&'static Command> {
    all_commands().iter().find(|command| command.name == name)
}

/// One `name: help` line per command, in table order.
pub fn command_help() -> String {
    all_commands()
        .iter()
        .map(|command| format!("{}: {}", command.name, command.help))
        .collect::<Vec<_>>()
        .join("\n")
}

const COMMANDS: &[Command] = &[
    Command {
        name: "window.minimize",
        help: "Minimize the shell window.",
        handler: handlers::window::handle_minimize,
    },
    Command {
        name: "window.close",
        help: "Close the shell window.",
        handler: handlers::window::handle_close,
    },
    Command {
        name: "window.toggleMaximize",
        help: "Maximize the window, or restore it when already maximized.",
        handler: handlers::window::handle_toggle_maximize,
    },
    Command {
        name: "window.drag",
        help: "Start moving the window with the pointer.",
        handler: handlers::window::handle_drag,
    },
    Command {
        name: "chrome.setHeight",
        help: "Report the rendered chrome height in pixels.",
        handler: handlers::window::handle_set_chrome_height,
    },
    Command {
        name: "nav.go",
        help: "Load a URL in the content surface and leave settings.",
        handler: handlers::nav::handle_go,
    },
    Command {
        name: "settings.show",
        help: "Show or hide the settings surface.",
        handler: handlers::settings::handle_show,
    },
    Command {
        name: "settings.toggle",
        help: "Toggle the settings surface.",
        handler: handlers::settings::handle_toggle,
    },
    Command {
        name: "settings.getState",
        help: "Report whether settings is open.",
        handler: handlers::settings::handle_get_state,
    },
    Command {
        name: "settings.open",
        help: "Show the settings surface.",
        handler: handlers::settings::handle_open,
    },
    Command {
        name: "providers.list",
        help: "List providers and the default provider id.",
        handler: handlers::providers::handle_list,
    },
    Command {
        name: "providers.get",
        help: "Same as providers.list.",
        handler: handlers::providers::handle_list,
    },
    Command {
        name: "providers.setDefault",
        help: "Make a provider the default and load it.",
        handler: handlers::providers::handle_set_default,
    },
    Command {
        name: "providers.open",
        help: "Load a provider without changing the default.",
        handler: handlers::providers::handle_open,
    },
    Command {
        name: "providers.remove",
        help: "Delete a provider.",
        handler: handlers::providers::handle_remove,
    },
    Command {
        name: "providers.add",
        help: "Add a provider from a label and an http(s) URL.",
        handler: handlers::providers::handle_add,
    },
    Command {
        name: "providers.setPinned",
        help: "Pin or unpin a provider tab.",
        handler: handlers::providers::handle_set_pinned,
    },
    Command {
        name: "providers.update",
        help: "Change a provider's label, URL or icon.",
        handler: handlers::providers::handle_update,
    },
];
