use super::super::messages::Message;
use super::super::state::{
    App, MAX_FONT_SIZE, MAX_LINE_HEIGHT, MAX_SPEECH_RATE, MIN_FONT_SIZE, MIN_LINE_HEIGHT,
    MIN_SPEECH_RATE,
};
use super::Effect;
use super::runtime::interrupted;
use chapter_reader_core::overlay::{ClickTarget, Overlay};
use chapter_reader_core::{ReaderCommand, ViewEffect};
use std::sync::mpsc::TryRecvError;
use tracing::{debug, info, warn};

/// Buttons that live outside the settings panel; pressing one counts as an outside click.
fn clicks_outside_settings(message: &Message) -> bool {
    matches!(
        message,
        Message::CycleTheme
            | Message::OpenChapterIndex
            | Message::CloseChapterIndex
            | Message::GoToChapter(_)
            | Message::NextChapter
            | Message::PreviousChapter
            | Message::TogglePlay
    )
}

/// Snap a slider value onto a 0.1 grid so labels read "1.9", not "1.9000001".
fn tenths(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

impl App {
    pub(super) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        if self.snapshot.overlays.settings && clicks_outside_settings(&message) {
            self.dispatch(ReaderCommand::Click(ClickTarget::Page), &mut effects);
        }

        match message {
            Message::CycleTheme => self.dispatch(ReaderCommand::CycleTheme, &mut effects),
            Message::FontSizeChanged(px) => {
                let px = px.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
                self.dispatch(ReaderCommand::SetFontSize { px }, &mut effects);
            }
            Message::FontFamilyChanged(choice) => self.dispatch(
                ReaderCommand::SetFontFamily {
                    stack: choice.stack.to_string(),
                },
                &mut effects,
            ),
            Message::LineHeightChanged(value) => {
                let multiplier = tenths(value).clamp(MIN_LINE_HEIGHT, MAX_LINE_HEIGHT);
                self.dispatch(ReaderCommand::SetLineHeight { multiplier }, &mut effects);
            }
            Message::SpeechRateChanged(value) => {
                let rate = tenths(value).clamp(MIN_SPEECH_RATE, MAX_SPEECH_RATE);
                self.dispatch(ReaderCommand::SetSpeechRate { rate }, &mut effects);
            }
            Message::VoiceSelected(choice) => self.dispatch(
                ReaderCommand::SetVoice {
                    index: choice.index,
                },
                &mut effects,
            ),
            Message::OpenChapterIndex => self.dispatch(
                ReaderCommand::OpenOverlay(Overlay::ChapterIndex),
                &mut effects,
            ),
            Message::CloseChapterIndex => self.dispatch(
                ReaderCommand::CloseOverlay(Overlay::ChapterIndex),
                &mut effects,
            ),
            Message::GoToChapter(number) => {
                self.dispatch(ReaderCommand::GoToChapter { number }, &mut effects)
            }
            Message::NextChapter => self.dispatch(ReaderCommand::NextChapter, &mut effects),
            Message::PreviousChapter => {
                self.dispatch(ReaderCommand::PreviousChapter, &mut effects)
            }
            Message::TogglePlay => self.dispatch(ReaderCommand::TogglePlay, &mut effects),
            Message::ToggleSettings => self.dispatch(ReaderCommand::ToggleSettings, &mut effects),
            Message::Clicked(target) => self.dispatch(ReaderCommand::Click(target), &mut effects),
            Message::KeyPressed { key, modifiers } => {
                if let Some(shortcut) = self.shortcut_message_for_key(key, modifiers) {
                    return self.reduce(shortcut);
                }
            }
            Message::Tick => {
                if interrupted() {
                    info!("Received Ctrl+C; stopping speech and exiting");
                    effects.push(Effect::Quit);
                } else {
                    self.drain_speech_events(&mut effects);
                }
            }
            Message::SafeQuit => {
                info!("Safe quit requested");
                effects.push(Effect::Quit);
            }
        }

        effects
    }

    fn dispatch(&mut self, command: ReaderCommand, effects: &mut Vec<Effect>) {
        match self.reader.apply_command(command) {
            Ok(event) => {
                debug!(action = event.action, "Applied reader command");
                effects.extend(event.effects.into_iter().map(|effect| match effect {
                    ViewEffect::ScrollToTop => Effect::ScrollToTop,
                }));
                self.snapshot = event.snapshot;
            }
            Err(err) => warn!("Reader command rejected: {err}"),
        }
    }

    fn drain_speech_events(&mut self, effects: &mut Vec<Effect>) {
        loop {
            match self.speech_events.try_recv() {
                Ok(event) => self.dispatch(ReaderCommand::Speech(event), effects),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("Speech event channel closed");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use chapter_reader_core::chapters::ChapterCatalog;
    use chapter_reader_core::Theme;

    fn build_app(dir: &std::path::Path) -> App {
        let config = AppConfig {
            settings_path: dir.join("settings.json").to_string_lossy().into_owned(),
            speech_program: "definitely-not-a-speech-program".to_string(),
            ..AppConfig::default()
        };
        let (app, _events) = App::new(config, ChapterCatalog::builtin());
        app
    }

    #[test]
    fn buttons_outside_panel_collapse_settings() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = build_app(dir.path());

        app.reduce(Message::ToggleSettings);
        assert!(app.snapshot.overlays.settings);

        app.reduce(Message::CycleTheme);
        assert!(!app.snapshot.overlays.settings);
        assert_eq!(app.snapshot.settings.theme, Theme::Sepia);

        app.reduce(Message::ToggleSettings);
        app.reduce(Message::NextChapter);
        assert!(!app.snapshot.overlays.settings);
        assert_eq!(app.snapshot.settings.current_chapter, 2);
    }

    #[test]
    fn panel_controls_keep_settings_open() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = build_app(dir.path());

        app.reduce(Message::ToggleSettings);
        app.reduce(Message::FontSizeChanged(22));
        app.reduce(Message::LineHeightChanged(2.0));

        assert!(app.snapshot.overlays.settings);
        assert_eq!(app.snapshot.settings.font_size, 22);

        app.reduce(Message::ToggleSettings);
        assert!(!app.snapshot.overlays.settings);
    }

    #[test]
    fn slider_values_snap_to_tenths() {
        assert_eq!(tenths(1.9000001), 1.9);
        assert_eq!(tenths(1.2499), 1.2);
        assert_eq!(tenths(2.0).to_string(), "2");
    }
}
