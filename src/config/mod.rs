//! Configuration loading for the chapter reader.
//!
//! All user-tunable settings are centralized here and loaded from
//! `conf/config.toml` if present. Any missing or invalid entries fall back to
//! sensible defaults so the UI can still launch. Reading preferences (theme,
//! font, chapter) are not configuration; they live in the settings store.

mod defaults;
mod io;
mod models;
mod tables;

pub use io::load_config;
pub use models::AppConfig;
