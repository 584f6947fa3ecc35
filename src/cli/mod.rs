//! Command-line interface parsing and handling
//!
//! With no subcommand the shell window opens. The other subcommands edit
//! the provider list without starting a window.

pub mod provider_list;

#[cfg(test)]
mod tests;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::provider_list::format_provider_table;
use crate::core::config::SettingsFile;
use crate::core::store::{NewProvider, ProviderStore};
use crate::host::runtime::{self, RunOptions};
use crate::utils::cache::recover_cache_requested;
use crate::utils::logging::init_tracing;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_DESCRIBE"),
    ", built ",
    env!("VERGEN_BUILD_DATE"),
    ")"
);

#[derive(Parser)]
#[command(name = "chatdock", version, long_version = LONG_VERSION)]
#[command(about = "Dock several web chat services behind one tab bar")]
#[command(
    long_about = "Chatdock opens a frameless window with a tab strip across the top and \
one chat provider's web page below it. Providers are stored in settings.toml in the \
platform config directory and can be edited from the in-app settings page or with \
the subcommands below.\n\n\
Environment Variables:\n\
  CHATDOCK_LOG              Log filter (falls back to RUST_LOG, default info)\n\
  CHATDOCK_RECOVER_CACHE    Set to 1 to wipe the webview cache before starting\n\n\
Controls:\n\
  Ctrl+Space                Show, hide or restore the window from anywhere"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Settings file to use instead of the platform default
    #[arg(short = 'c', long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Clear the webview cache and storage before opening the window
    #[arg(long, global = true)]
    pub recover_cache: bool,

    /// Log at debug level
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Append logs to this file instead of stderr
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Open the shell window (default)
    Run,
    /// List configured providers
    List,
    /// Add a provider
    Add {
        /// Display name
        label: String,
        /// http(s) address of the chat page
        url: String,
        /// Icon hint shown in the tab strip
        #[arg(long)]
        icon: Option<String>,
        /// Pin the tab
        #[arg(long)]
        pinned: bool,
        /// Make it the default provider
        #[arg(long = "default")]
        set_as_default: bool,
    },
    /// Remove a provider
    Remove {
        /// Provider id as shown by `list`
        id: String,
    },
    /// Set the provider loaded at startup
    SetDefault {
        /// Provider id as shown by `list`
        id: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.verbose, args.log_file.as_deref())?;

    let file = resolve_settings_file(args.config)?;
    let mut store = ProviderStore::open(file);

    match args.command.unwrap_or(Commands::Run) {
        Commands::Run => runtime::run(
            store,
            RunOptions {
                recover_cache: recover_cache_requested(args.recover_cache),
            },
        ),
        command => {
            let output = run_maintenance(&command, &mut store)?;
            print!("{output}");
            Ok(())
        }
    }
}

/// Explicit `--config` path, or `settings.toml` in the platform config dir.
pub fn resolve_settings_file(config: Option<PathBuf>) -> Result<SettingsFile, Box<dyn Error>> {
    match config {
        Some(path) => Ok(SettingsFile::new(path)),
        None => SettingsFile::default_path()
            .map(SettingsFile::new)
            .ok_or_else(|| "could not determine a configuration directory".into()),
    }
}

/// Run a subcommand that edits providers without opening a window.
/// Returns the text to print.
pub fn run_maintenance(
    command: &Commands,
    store: &mut ProviderStore,
) -> Result<String, Box<dyn Error>> {
    let output = match command {
        Commands::Run => String::new(),
        Commands::List => {
            let (providers, default_id) = store.list();
            format_provider_table(providers, default_id)
        }
        Commands::Add {
            label,
            url,
            icon,
            pinned,
            set_as_default,
        } => {
            let (id, _change) = store.add(NewProvider {
                label: label.clone(),
                url: url.clone(),
                icon: icon.clone().unwrap_or_default(),
                pinned: *pinned,
                set_as_default: *set_as_default,
            })?;
            format!("✅ Added provider '{}' as {id}\n", label.trim())
        }
        Commands::Remove { id } => {
            let _change = store.remove(id)?;
            match store.default_id() {
                Some(default) => format!("✅ Removed {id} (default is {default})\n"),
                None => format!("✅ Removed {id} (no providers left)\n"),
            }
        }
        Commands::SetDefault { id } => {
            let _change = store.set_default(id)?;
            format!("✅ Set default provider to: {id}\n")
        }
    };
    Ok(output)
}
