use super::models::LogLevel;

pub(crate) fn default_log_level() -> LogLevel {
    LogLevel::Debug
}

pub(crate) fn default_settings_path() -> String {
    ".cache/settings.json".to_string()
}

pub(crate) fn default_chapters_dir() -> String {
    "chapters".to_string()
}

pub(crate) fn default_speech_program() -> String {
    "espeak-ng".to_string()
}

pub(crate) fn default_speech_base_wpm() -> u32 {
    175
}

pub(crate) fn default_window_width() -> f32 {
    900.0
}

pub(crate) fn default_window_height() -> f32 {
    760.0
}

pub(crate) fn default_key_toggle_play() -> String {
    "space".to_string()
}

pub(crate) fn default_key_next_chapter() -> String {
    "n".to_string()
}

pub(crate) fn default_key_previous_chapter() -> String {
    "p".to_string()
}

pub(crate) fn default_key_cycle_theme() -> String {
    "t".to_string()
}

pub(crate) fn default_key_toggle_settings() -> String {
    "ctrl+t".to_string()
}

pub(crate) fn default_key_safe_quit() -> String {
    "q".to_string()
}
