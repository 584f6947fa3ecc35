//! Chatdock is a desktop shell that docks several web chat services behind
//! one tab strip.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the provider store, surface bookkeeping, and the relay
//!   that pushes state changes to the UI pages.
//! - [`commands`] parses and dispatches the named commands UI pages send
//!   over IPC.
//! - [`host`] defines the seams the core drives and implements them with
//!   `tao` windows and `wry` webviews.
//! - [`cli`] parses arguments and either runs the window or edits providers
//!   headlessly.
//!
//! The binary (`src/main.rs`) routes through [`crate::cli::main`].

pub mod cli;
pub mod commands;
pub mod core;
pub mod host;
pub mod utils;
