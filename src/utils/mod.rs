/// TOML configuration (`edflex.toml`) with hot reloading.
pub mod toml_config;
