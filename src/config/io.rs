use super::models::AppConfig;
use super::tables::ConfigTables;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load configuration from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err:#}");
            AppConfig::default()
        }
    }
}

pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let tables: ConfigTables = toml::from_str(contents).context("Parsing config tables")?;
    Ok(tables.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::models::LogLevel;

    #[test]
    fn empty_document_uses_defaults() {
        assert_eq!(parse_config("").unwrap(), AppConfig::default());
    }

    #[test]
    fn defaults_log_at_debug() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.log_level, LogLevel::Debug);
        assert_eq!(cfg.log_level.as_filter_str(), "debug");
    }

    #[test]
    fn tables_override_individual_fields() {
        let cfg = parse_config(
            r#"
            [logging]
            log_level = "warn"

            [speech]
            program = "/opt/espeak/bin/espeak-ng"

            [keys]
            toggle_play = "ctrl+p"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.log_level, LogLevel::Warn);
        assert_eq!(cfg.speech_program, "/opt/espeak/bin/espeak-ng");
        assert_eq!(cfg.speech_base_wpm, 175);
        assert_eq!(cfg.key_toggle_play, "ctrl+p");
        assert_eq!(cfg.key_next_chapter, "n");
        assert_eq!(cfg.settings_path, ".cache/settings.json");
    }

    #[test]
    fn invalid_values_are_reported() {
        assert!(parse_config("[logging]\nlog_level = \"loud\"\n").is_err());
        assert!(parse_config("[mystery]\nvalue = 1\n").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("absent.toml"));
        assert_eq!(cfg, AppConfig::default());
    }
}
