pub mod app;
pub mod builtin_providers;
pub mod config;
pub mod provider;
pub mod relay;
pub mod store;
pub mod view;
