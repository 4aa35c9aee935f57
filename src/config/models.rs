use serde::Deserialize;

/// High-level app configuration, flattened from the TOML tables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub log_level: LogLevel,
    pub settings_path: String,
    pub chapters_dir: String,
    pub speech_program: String,
    pub speech_base_wpm: u32,
    pub window_width: f32,
    pub window_height: f32,
    pub key_toggle_play: String,
    pub key_next_chapter: String,
    pub key_previous_chapter: String,
    pub key_cycle_theme: String,
    pub key_toggle_settings: String,
    pub key_safe_quit: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            log_level: crate::config::defaults::default_log_level(),
            settings_path: crate::config::defaults::default_settings_path(),
            chapters_dir: crate::config::defaults::default_chapters_dir(),
            speech_program: crate::config::defaults::default_speech_program(),
            speech_base_wpm: crate::config::defaults::default_speech_base_wpm(),
            window_width: crate::config::defaults::default_window_width(),
            window_height: crate::config::defaults::default_window_height(),
            key_toggle_play: crate::config::defaults::default_key_toggle_play(),
            key_next_chapter: crate::config::defaults::default_key_next_chapter(),
            key_previous_chapter: crate::config::defaults::default_key_previous_chapter(),
            key_cycle_theme: crate::config::defaults::default_key_cycle_theme(),
            key_toggle_settings: crate::config::defaults::default_key_toggle_settings(),
            key_safe_quit: crate::config::defaults::default_key_safe_quit(),
        }
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Debug
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
