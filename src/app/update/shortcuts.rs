use super::super::messages::Message;
use super::super::state::App;
use chapter_reader_core::overlay::Overlay;
use iced::keyboard::{Key, Modifiers, key};

impl App {
    pub(super) fn shortcut_message_for_key(
        &self,
        key: Key,
        modifiers: Modifiers,
    ) -> Option<Message> {
        let pressed = match key.as_ref() {
            Key::Named(key::Named::Space) => "space".to_string(),
            Key::Named(key::Named::Escape) => "escape".to_string(),
            Key::Character(ch) => ch.to_ascii_lowercase(),
            _ => return None,
        };

        if pressed == "escape" && self.snapshot.overlays.is_open(Overlay::ChapterIndex) {
            return Some(Message::CloseChapterIndex);
        }

        let bindings: [(&str, &str, Message); 6] = [
            (self.config.key_toggle_play.as_str(), "space", Message::TogglePlay),
            (self.config.key_next_chapter.as_str(), "n", Message::NextChapter),
            (self.config.key_previous_chapter.as_str(), "p", Message::PreviousChapter),
            (self.config.key_cycle_theme.as_str(), "t", Message::CycleTheme),
            (self.config.key_toggle_settings.as_str(), "ctrl+t", Message::ToggleSettings),
            (self.config.key_safe_quit.as_str(), "q", Message::SafeQuit),
        ];

        bindings
            .into_iter()
            .find(|(raw, fallback, _)| Self::shortcut_matches(raw, fallback, &pressed, modifiers))
            .map(|(_, _, message)| message)
    }

    pub(super) fn shortcut_matches(
        raw: &str,
        fallback: &str,
        pressed: &str,
        modifiers: Modifiers,
    ) -> bool {
        let normalized = Self::normalize_shortcut_token(raw, fallback);

        let mut required_ctrl = false;
        let mut required_alt = false;
        let mut required_logo = false;
        let mut required_shift = false;
        let mut required_key: Option<&str> = None;

        for token in normalized
            .split('+')
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            match token {
                "ctrl" | "control" => required_ctrl = true,
                "alt" => required_alt = true,
                "logo" | "meta" | "super" | "cmd" | "command" => required_logo = true,
                "shift" => required_shift = true,
                key => required_key = Some(key),
            }
        }

        let Some(required_key) = required_key else {
            return false;
        };
        if pressed != required_key {
            return false;
        }

        modifiers.control() == required_ctrl
            && modifiers.alt() == required_alt
            && modifiers.logo() == required_logo
            && modifiers.shift() == required_shift
    }

    pub(super) fn normalize_shortcut_token(raw: &str, fallback: &str) -> String {
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            fallback.to_string()
        } else {
            normalized.replace("spacebar", "space")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::keyboard::Modifiers;

    #[test]
    fn empty_binding_uses_fallback() {
        assert_eq!(App::normalize_shortcut_token("  ", "ctrl+t"), "ctrl+t");
        assert!(App::shortcut_matches("", "n", "n", Modifiers::empty()));
    }

    #[test]
    fn plain_key_rejects_modifiers() {
        assert!(App::shortcut_matches("t", "t", "t", Modifiers::empty()));
        assert!(!App::shortcut_matches("t", "t", "t", Modifiers::CTRL));
    }

    #[test]
    fn ctrl_binding_requires_ctrl() {
        assert!(App::shortcut_matches("Ctrl+T", "x", "t", Modifiers::CTRL));
        assert!(!App::shortcut_matches("ctrl+t", "x", "t", Modifiers::empty()));
    }

    #[test]
    fn modifier_only_binding_never_matches() {
        assert!(!App::shortcut_matches("ctrl+", "x", "ctrl", Modifiers::CTRL));
    }
}
