// Settings service module
// Locates and loads settings.toml

mod service;

pub use service::{load_settings_or_default, resolve_config_path, SettingsService, CONFIG_ENV_VAR};
