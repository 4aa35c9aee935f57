//! Persisted reading preferences.
//!
//! Every field is stored under its own string key. Values are parsed
//! leniently on load (numeric prefix, `"18px"` reads as 18) and anything
//! missing, unparseable, zero or negative falls back to the field default.

use crate::chapters::CHAPTER_COUNT;
use crate::error::ReaderError;
use crate::store::KeyValueStore;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const KEY_THEME: &str = "theme";
pub const KEY_FONT_SIZE: &str = "fontSize";
pub const KEY_FONT_FAMILY: &str = "fontFamily";
pub const KEY_LINE_HEIGHT: &str = "lineHeight";
pub const KEY_SPEECH_RATE: &str = "speechRate";
pub const KEY_VOICE_INDEX: &str = "voiceIndex";
pub const KEY_CURRENT_CHAPTER: &str = "currentChapter";

pub const DEFAULT_FONT_SIZE: u32 = 18;
pub const DEFAULT_FONT_FAMILY: &str = "Georgia, serif";
pub const DEFAULT_LINE_HEIGHT: f32 = 1.8;
pub const DEFAULT_SPEECH_RATE: f32 = 1.0;
pub const DEFAULT_VOICE_INDEX: usize = 0;
pub const DEFAULT_CHAPTER: u8 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub theme: Theme,
    pub font_size: u32,
    pub font_family: String,
    pub line_height: f32,
    pub speech_rate: f32,
    pub voice_index: usize,
    pub current_chapter: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            theme: Theme::default(),
            font_size: DEFAULT_FONT_SIZE,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            line_height: DEFAULT_LINE_HEIGHT,
            speech_rate: DEFAULT_SPEECH_RATE,
            voice_index: DEFAULT_VOICE_INDEX,
            current_chapter: DEFAULT_CHAPTER,
        }
    }
}

impl Settings {
    /// Read every field from `store`, defaulting whatever is absent or invalid.
    pub fn load(store: &impl KeyValueStore) -> Settings {
        let theme = match non_empty(store.get(KEY_THEME)) {
            Some(raw) => raw.parse::<Theme>().unwrap_or_else(|err| {
                warn!("{err}; falling back to {}", Theme::default());
                Theme::default()
            }),
            None => Theme::default(),
        };

        let font_size = positive_int(store.get(KEY_FONT_SIZE))
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(DEFAULT_FONT_SIZE);
        let font_family =
            non_empty(store.get(KEY_FONT_FAMILY)).unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string());
        let line_height = positive_float(store.get(KEY_LINE_HEIGHT)).unwrap_or(DEFAULT_LINE_HEIGHT);
        let speech_rate = positive_float(store.get(KEY_SPEECH_RATE)).unwrap_or(DEFAULT_SPEECH_RATE);
        let voice_index = positive_int(store.get(KEY_VOICE_INDEX))
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(DEFAULT_VOICE_INDEX);

        let current_chapter = match positive_int(store.get(KEY_CURRENT_CHAPTER)) {
            Some(chapter) if chapter > i64::from(CHAPTER_COUNT) => {
                warn!(
                    stored = chapter,
                    max = CHAPTER_COUNT,
                    "Stored chapter out of range; clamping"
                );
                CHAPTER_COUNT
            }
            Some(chapter) => chapter as u8,
            None => DEFAULT_CHAPTER,
        };

        let settings = Settings {
            theme,
            font_size,
            font_family,
            line_height,
            speech_rate,
            voice_index,
            current_chapter,
        };
        debug!(?settings, "Loaded reader settings");
        settings
    }

    /// Write every field back. All keys are attempted; the first failure is returned.
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), ReaderError> {
        let entries = [
            (KEY_THEME, self.theme.as_str().to_string()),
            (KEY_FONT_SIZE, self.font_size.to_string()),
            (KEY_FONT_FAMILY, self.font_family.clone()),
            (KEY_LINE_HEIGHT, self.line_height.to_string()),
            (KEY_SPEECH_RATE, self.speech_rate.to_string()),
            (KEY_VOICE_INDEX, self.voice_index.to_string()),
            (KEY_CURRENT_CHAPTER, self.current_chapter.to_string()),
        ];

        let mut first_err = None;
        for (key, value) in entries {
            if let Err(err) = store.set(key, &value) {
                first_err.get_or_insert(err);
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|value| !value.is_empty())
}

fn positive_int(raw: Option<String>) -> Option<i64> {
    raw.as_deref().and_then(parse_int_prefix).filter(|v| *v > 0)
}

fn positive_float(raw: Option<String>) -> Option<f32> {
    raw.as_deref()
        .and_then(parse_float_prefix)
        .map(|v| v as f32)
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Leading-integer parse: skips whitespace, accepts a sign, stops at the first non-digit.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = split_sign(trimmed);
    let digits: &str = &rest[..rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len())];
    if digits.is_empty() {
        return None;
    }
    // Saturate rather than fail on absurdly long digit runs.
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Leading-float parse with the same tolerance as [`parse_int_prefix`].
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = split_sign(trimmed);
    let bytes = rest.as_bytes();

    let mut end = 0;
    let mut seen_digit = false;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        seen_digit = true;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            seen_digit = true;
        }
    }
    if !seen_digit {
        return None;
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    let value = rest[..end].parse::<f64>().ok()?;
    Some(if negative { -value } else { value })
}

fn split_sign(raw: &str) -> (bool, &str) {
    if let Some(rest) = raw.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = raw.strip_prefix('+') {
        (false, rest)
    } else {
        (false, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn empty_store_yields_documented_defaults() {
        let settings = Settings::load(&MemoryStore::new());
        assert_eq!(
            settings,
            Settings {
                theme: Theme::Dark,
                font_size: 18,
                font_family: "Georgia, serif".to_string(),
                line_height: 1.8,
                speech_rate: 1.0,
                voice_index: 0,
                current_chapter: 1,
            }
        );
    }

    #[test]
    fn non_numeric_values_fall_back_to_defaults() {
        let store = MemoryStore::with_entries([
            (KEY_FONT_SIZE, "large"),
            (KEY_LINE_HEIGHT, "tall"),
            (KEY_SPEECH_RATE, ""),
            (KEY_VOICE_INDEX, "first"),
            (KEY_CURRENT_CHAPTER, "intro"),
        ]);
        let settings = Settings::load(&store);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn zero_and_negative_values_fall_back_to_defaults() {
        let store = MemoryStore::with_entries([
            (KEY_FONT_SIZE, "0"),
            (KEY_LINE_HEIGHT, "-1.5"),
            (KEY_SPEECH_RATE, "0.0"),
            (KEY_CURRENT_CHAPTER, "0"),
        ]);
        let settings = Settings::load(&store);
        assert_eq!(settings.font_size, DEFAULT_FONT_SIZE);
        assert_eq!(settings.line_height, DEFAULT_LINE_HEIGHT);
        assert_eq!(settings.speech_rate, DEFAULT_SPEECH_RATE);
        assert_eq!(settings.current_chapter, DEFAULT_CHAPTER);
    }

    #[test]
    fn numeric_prefixes_are_accepted() {
        let store = MemoryStore::with_entries([
            (KEY_FONT_SIZE, " 22px"),
            (KEY_LINE_HEIGHT, "1.5em"),
            (KEY_SPEECH_RATE, "1.25x"),
            (KEY_VOICE_INDEX, "3"),
            (KEY_CURRENT_CHAPTER, "4.9"),
        ]);
        let settings = Settings::load(&store);
        assert_eq!(settings.font_size, 22);
        assert_eq!(settings.line_height, 1.5);
        assert_eq!(settings.speech_rate, 1.25);
        assert_eq!(settings.voice_index, 3);
        assert_eq!(settings.current_chapter, 4);
    }

    #[test]
    fn unknown_theme_loads_as_dark() {
        let store = MemoryStore::with_entries([(KEY_THEME, "neon")]);
        assert_eq!(Settings::load(&store).theme, Theme::Dark);
    }

    #[test]
    fn out_of_range_chapter_is_clamped_on_load() {
        let store = MemoryStore::with_entries([(KEY_CURRENT_CHAPTER, "99")]);
        assert_eq!(Settings::load(&store).current_chapter, CHAPTER_COUNT);
    }

    #[test]
    fn floats_beyond_f32_range_fall_back_to_defaults() {
        let store = MemoryStore::with_entries([
            (KEY_LINE_HEIGHT, "1e39"),
            (KEY_SPEECH_RATE, "1e300"),
        ]);
        let settings = Settings::load(&store);
        assert_eq!(settings.line_height, DEFAULT_LINE_HEIGHT);
        assert_eq!(settings.speech_rate, DEFAULT_SPEECH_RATE);

        let store = MemoryStore::with_entries([(KEY_LINE_HEIGHT, "1e-50")]);
        assert_eq!(Settings::load(&store).line_height, DEFAULT_LINE_HEIGHT);
    }

    #[test]
    fn save_writes_every_key() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            theme: Theme::Ocean,
            font_size: 20,
            font_family: "Verdana, sans-serif".to_string(),
            line_height: 2.0,
            speech_rate: 1.5,
            voice_index: 2,
            current_chapter: 3,
        };
        settings.save(&mut store).unwrap();

        assert_eq!(store.len(), 7);
        assert_eq!(store.get(KEY_THEME).as_deref(), Some("ocean"));
        assert_eq!(store.get(KEY_LINE_HEIGHT).as_deref(), Some("2"));
        assert_eq!(store.get(KEY_SPEECH_RATE).as_deref(), Some("1.5"));
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn default_floats_serialize_in_short_form() {
        let mut store = MemoryStore::new();
        Settings::default().save(&mut store).unwrap();
        assert_eq!(store.get(KEY_LINE_HEIGHT).as_deref(), Some("1.8"));
        assert_eq!(store.get(KEY_SPEECH_RATE).as_deref(), Some("1"));
    }

    #[test]
    fn float_prefix_handles_exponents_and_bare_fractions() {
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("2e1px"), Some(20.0));
        assert_eq!(parse_float_prefix("3e"), Some(3.0));
        assert_eq!(parse_float_prefix("-."), None);
        assert_eq!(parse_int_prefix("-7abc"), Some(-7));
        assert_eq!(parse_int_prefix("abc"), None);
    }
}
