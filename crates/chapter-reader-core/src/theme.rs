//! The fixed, ordered set of reader themes.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Sepia,
    Night,
    Ocean,
    Forest,
    Light,
    Lavender,
    Mint,
    Rose,
    Autumn,
    Midnight,
    Sand,
    Charcoal,
    Ivory,
    Slate,
    Peach,
}

impl Theme {
    /// Cycle order.
    pub const ALL: [Theme; 16] = [
        Theme::Dark,
        Theme::Sepia,
        Theme::Night,
        Theme::Ocean,
        Theme::Forest,
        Theme::Light,
        Theme::Lavender,
        Theme::Mint,
        Theme::Rose,
        Theme::Autumn,
        Theme::Midnight,
        Theme::Sand,
        Theme::Charcoal,
        Theme::Ivory,
        Theme::Slate,
        Theme::Peach,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Sepia => "sepia",
            Theme::Night => "night",
            Theme::Ocean => "ocean",
            Theme::Forest => "forest",
            Theme::Light => "light",
            Theme::Lavender => "lavender",
            Theme::Mint => "mint",
            Theme::Rose => "rose",
            Theme::Autumn => "autumn",
            Theme::Midnight => "midnight",
            Theme::Sand => "sand",
            Theme::Charcoal => "charcoal",
            Theme::Ivory => "ivory",
            Theme::Slate => "slate",
            Theme::Peach => "peach",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|theme| *theme == self)
            .unwrap_or_default()
    }

    /// The theme after this one, wrapping at the end of the list.
    pub fn next(self) -> Theme {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Themes whose page background is dark; the shell picks light text for these.
    pub fn is_dark(self) -> bool {
        matches!(
            self,
            Theme::Dark
                | Theme::Night
                | Theme::Ocean
                | Theme::Forest
                | Theme::Midnight
                | Theme::Charcoal
                | Theme::Slate
        )
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl std::fmt::Display for UnknownTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown theme '{}'", self.0)
    }
}

impl std::error::Error for UnknownTheme {}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownTheme(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_cycles_to_sepia() {
        assert_eq!(Theme::Dark.index(), 0);
        assert_eq!(Theme::Dark.next(), Theme::Sepia);
    }

    #[test]
    fn last_theme_wraps_to_first() {
        assert_eq!(Theme::Peach.next(), Theme::Dark);
    }

    #[test]
    fn full_cycle_returns_to_start() {
        let mut theme = Theme::Forest;
        for _ in 0..Theme::ALL.len() {
            theme = theme.next();
        }
        assert_eq!(theme, Theme::Forest);
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Midnight".parse::<Theme>(), Ok(Theme::Midnight));
        assert_eq!(" ivory ".parse::<Theme>(), Ok(Theme::Ivory));
        assert!("neon".parse::<Theme>().is_err());
    }
}
