use super::messages::Message;
use crate::config::AppConfig;
use crate::tts::EspeakEngine;
use chapter_reader_core::chapters::ChapterCatalog;
use chapter_reader_core::speech::{SpeechEvent, Voice};
use chapter_reader_core::store::JsonFileStore;
use chapter_reader_core::{ReaderController, ReaderSnapshot};
use iced::Font;
use iced::Task;
use iced::font::Family;
use iced::widget::scrollable::Id as ScrollId;
use once_cell::sync::Lazy;
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::info;

pub(crate) static TEXT_SCROLL_ID: Lazy<ScrollId> = Lazy::new(|| ScrollId::new("chapter-text"));

pub(crate) const MIN_FONT_SIZE: u32 = 12;
pub(crate) const MAX_FONT_SIZE: u32 = 32;
pub(crate) const MIN_LINE_HEIGHT: f32 = 1.2;
pub(crate) const MAX_LINE_HEIGHT: f32 = 2.4;
pub(crate) const MIN_SPEECH_RATE: f32 = 0.5;
pub(crate) const MAX_SPEECH_RATE: f32 = 2.0;

/// A font stack offered in the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontChoice {
    pub label: &'static str,
    pub stack: &'static str,
}

impl std::fmt::Display for FontChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label)
    }
}

pub(crate) const FONT_CHOICES: &[FontChoice] = &[
    FontChoice {
        label: "Georgia",
        stack: "Georgia, serif",
    },
    FontChoice {
        label: "Times New Roman",
        stack: "'Times New Roman', serif",
    },
    FontChoice {
        label: "Arial",
        stack: "Arial, sans-serif",
    },
    FontChoice {
        label: "Verdana",
        stack: "Verdana, sans-serif",
    },
    FontChoice {
        label: "Courier New",
        stack: "'Courier New', monospace",
    },
];

/// An entry in the voice picker; `index` points into the engine's voice list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceChoice {
    pub index: usize,
    pub label: String,
}

impl std::fmt::Display for VoiceChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

pub(crate) fn voice_choices(voices: &[Voice]) -> Vec<VoiceChoice> {
    voices
        .iter()
        .enumerate()
        .map(|(index, voice)| VoiceChoice {
            index,
            label: voice.label(),
        })
        .collect()
}

pub(crate) fn font_choice_for_stack(stack: &str) -> Option<FontChoice> {
    FONT_CHOICES
        .iter()
        .copied()
        .find(|choice| choice.stack == stack)
}

/// Resolve a CSS-style font stack to the first family iced knows about.
pub(crate) fn font_for_stack(stack: &str) -> Font {
    let family = stack
        .split(',')
        .map(|name| name.trim().trim_matches(|c| c == '\'' || c == '"'))
        .find_map(|name| match name.to_ascii_lowercase().as_str() {
            "georgia" => Some(Family::Name("Georgia")),
            "times new roman" => Some(Family::Name("Times New Roman")),
            "arial" => Some(Family::Name("Arial")),
            "verdana" => Some(Family::Name("Verdana")),
            "courier new" => Some(Family::Name("Courier New")),
            "serif" => Some(Family::Serif),
            "sans-serif" => Some(Family::SansSerif),
            "monospace" => Some(Family::Monospace),
            _ => None,
        })
        .unwrap_or(Family::Serif);

    Font {
        family,
        ..Font::DEFAULT
    }
}

pub(crate) type Reader = ReaderController<JsonFileStore, EspeakEngine>;

/// Application state: the reader controller plus the last snapshot it produced.
pub struct App {
    pub(super) reader: Reader,
    pub(super) snapshot: ReaderSnapshot,
    pub(super) speech_events: Receiver<SpeechEvent>,
    pub(super) config: AppConfig,
}

impl App {
    pub fn bootstrap(config: AppConfig, catalog: ChapterCatalog) -> (App, Task<Message>) {
        let (app, events) = App::new(config, catalog);
        crate::tts::spawn_voice_loader(app.config.speech_program.clone(), events);
        (app, Task::none())
    }

    /// Build the reader; the returned sender feeds the same speech event channel.
    pub(super) fn new(config: AppConfig, catalog: ChapterCatalog) -> (App, Sender<SpeechEvent>) {
        let (events_tx, speech_events) = mpsc::channel();
        let engine = EspeakEngine::new(
            config.speech_program.clone(),
            config.speech_base_wpm,
            events_tx.clone(),
        );
        let store = JsonFileStore::open(&config.settings_path);
        let reader = ReaderController::new(store, engine, catalog);
        let snapshot = reader.snapshot();
        info!(
            chapter = snapshot.settings.current_chapter,
            theme = %snapshot.settings.theme,
            "Reader ready"
        );

        (
            App {
                reader,
                snapshot,
                speech_events,
                config,
            },
            events_tx,
        )
    }

    pub fn title(&self) -> String {
        format!("Chapter Reader - {}", self.snapshot.chapter_title)
    }

    pub fn theme(&self) -> iced::Theme {
        crate::theme::iced_theme(self.snapshot.settings.theme)
    }

    pub(super) fn current_font(&self) -> Font {
        font_for_stack(&self.snapshot.settings.font_family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_stack_resolves_first_known_family() {
        assert_eq!(font_for_stack("Georgia, serif").family, Family::Name("Georgia"));
        assert_eq!(
            font_for_stack("'Courier New', monospace").family,
            Family::Name("Courier New")
        );
    }

    #[test]
    fn unknown_families_fall_back_to_generic() {
        assert_eq!(font_for_stack("Papyrus, sans-serif").family, Family::SansSerif);
        assert_eq!(font_for_stack("Papyrus").family, Family::Serif);
    }

    #[test]
    fn default_stack_is_offered_in_picker() {
        let choice = font_choice_for_stack(chapter_reader_core::settings::DEFAULT_FONT_FAMILY);
        assert_eq!(choice.map(|c| c.label), Some("Georgia"));
        assert!(font_choice_for_stack("Comic Sans MS").is_none());
    }
}
