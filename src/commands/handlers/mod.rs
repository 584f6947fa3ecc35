pub(super) mod nav;
pub(super) mod providers;
pub(super) mod settings;
pub(super) mod window;
