use super::defaults;
use super::models::{AppConfig, LogLevel};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct ConfigTables {
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    storage: StorageConfig,
    #[serde(default)]
    content: ContentConfig,
    #[serde(default)]
    speech: SpeechConfig,
    #[serde(default)]
    window: WindowConfig,
    #[serde(default)]
    keys: KeysConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            log_level: tables.logging.log_level,
            settings_path: tables.storage.settings_path,
            chapters_dir: tables.content.chapters_dir,
            speech_program: tables.speech.program,
            speech_base_wpm: tables.speech.base_words_per_minute,
            window_width: tables.window.width,
            window_height: tables.window.height,
            key_toggle_play: tables.keys.toggle_play,
            key_next_chapter: tables.keys.next_chapter,
            key_previous_chapter: tables.keys.previous_chapter,
            key_cycle_theme: tables.keys.cycle_theme,
            key_toggle_settings: tables.keys.toggle_settings,
            key_safe_quit: tables.keys.safe_quit,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct StorageConfig {
    #[serde(default = "defaults::default_settings_path")]
    settings_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            settings_path: defaults::default_settings_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ContentConfig {
    #[serde(default = "defaults::default_chapters_dir")]
    chapters_dir: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        ContentConfig {
            chapters_dir: defaults::default_chapters_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct SpeechConfig {
    #[serde(default = "defaults::default_speech_program")]
    program: String,
    #[serde(default = "defaults::default_speech_base_wpm")]
    base_words_per_minute: u32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        SpeechConfig {
            program: defaults::default_speech_program(),
            base_words_per_minute: defaults::default_speech_base_wpm(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct WindowConfig {
    #[serde(default = "defaults::default_window_width")]
    width: f32,
    #[serde(default = "defaults::default_window_height")]
    height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: defaults::default_window_width(),
            height: defaults::default_window_height(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct KeysConfig {
    #[serde(default = "defaults::default_key_toggle_play")]
    toggle_play: String,
    #[serde(default = "defaults::default_key_next_chapter")]
    next_chapter: String,
    #[serde(default = "defaults::default_key_previous_chapter")]
    previous_chapter: String,
    #[serde(default = "defaults::default_key_cycle_theme")]
    cycle_theme: String,
    #[serde(default = "defaults::default_key_toggle_settings")]
    toggle_settings: String,
    #[serde(default = "defaults::default_key_safe_quit")]
    safe_quit: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        KeysConfig {
            toggle_play: defaults::default_key_toggle_play(),
            next_chapter: defaults::default_key_next_chapter(),
            previous_chapter: defaults::default_key_previous_chapter(),
            cycle_theme: defaults::default_key_cycle_theme(),
            toggle_settings: defaults::default_key_toggle_settings(),
            safe_quit: defaults::default_key_safe_quit(),
        }
    }
}
