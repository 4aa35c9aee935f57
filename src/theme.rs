//! Colour palettes for the sixteen reader themes.

use chapter_reader_core::Theme;
use iced::theme::Palette;
use iced::{Color, Theme as IcedTheme, color};

/// Page background, body text and accent colour for a theme.
pub fn palette(theme: Theme) -> Palette {
    let (background, text, primary) = match theme {
        Theme::Dark => (color!(0x1e1e1e), color!(0xe0e0e0), color!(0x7aa2f7)),
        Theme::Sepia => (color!(0xf4ecd8), color!(0x5b4636), color!(0xa0522d)),
        Theme::Night => (color!(0x0b0f19), color!(0xc8ccd4), color!(0x5c6bc0)),
        Theme::Ocean => (color!(0x0f2a3d), color!(0xd6ecf3), color!(0x26a6d1)),
        Theme::Forest => (color!(0x1b2d1f), color!(0xd9e8d4), color!(0x6aa84f)),
        Theme::Light => (color!(0xffffff), color!(0x222222), color!(0x3d6fd8)),
        Theme::Lavender => (color!(0xf1ecf9), color!(0x3c2f57), color!(0x8e6cc9)),
        Theme::Mint => (color!(0xe8f6ef), color!(0x24453a), color!(0x3aa57a)),
        Theme::Rose => (color!(0xfbecef), color!(0x5a2a35), color!(0xd0607a)),
        Theme::Autumn => (color!(0xf6e3cc), color!(0x4e2b14), color!(0xc8642a)),
        Theme::Midnight => (color!(0x101030), color!(0xd0d4f0), color!(0x7c83fd)),
        Theme::Sand => (color!(0xefe4cf), color!(0x4a3f2c), color!(0xb08a48)),
        Theme::Charcoal => (color!(0x2b2b2b), color!(0xd8d8d8), color!(0xe0a458)),
        Theme::Ivory => (color!(0xfffff0), color!(0x33302a), color!(0x8a7a4a)),
        Theme::Slate => (color!(0x2f3b4a), color!(0xdfe6ee), color!(0x78a6d6)),
        Theme::Peach => (color!(0xffe9dc), color!(0x553226), color!(0xe07b53)),
    };

    Palette {
        background,
        text,
        primary,
        success: color!(0x4caf50),
        danger: color!(0xe05252),
    }
}

/// Theme handed to iced for the whole window.
pub fn iced_theme(theme: Theme) -> IcedTheme {
    IcedTheme::custom(theme.as_str().to_string(), palette(theme))
}

/// Backdrop colour behind the chapter index modal.
pub fn backdrop(theme: Theme) -> Color {
    if theme.is_dark() {
        Color { a: 0.65, ..Color::BLACK }
    } else {
        Color { a: 0.45, ..Color::BLACK }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luminance(color: Color) -> f32 {
        0.2126 * color.r + 0.7152 * color.g + 0.0722 * color.b
    }

    #[test]
    fn dark_themes_have_dark_backgrounds() {
        for theme in Theme::ALL {
            let palette = palette(theme);
            let background = luminance(palette.background);
            let text = luminance(palette.text);
            assert_eq!(theme.is_dark(), background < 0.5, "{theme}");
            assert!((background - text).abs() > 0.4, "{theme} lacks contrast");
        }
    }

    #[test]
    fn every_theme_gets_a_distinct_palette() {
        let mut backgrounds: Vec<_> = Theme::ALL
            .iter()
            .map(|theme| format!("{:?}", palette(*theme).background))
            .collect();
        backgrounds.sort();
        backgrounds.dedup();
        assert_eq!(backgrounds.len(), Theme::ALL.len());
    }
}
