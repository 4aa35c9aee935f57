use super::{Effect, ReaderController, ViewEffect};
use crate::error::ReaderError;
use crate::overlay::{ClickTarget, Overlay, Overlays};
use crate::settings::Settings;
use crate::speech::{PlaybackPhase, SpeechEngine, SpeechEvent, Voice};
use crate::store::KeyValueStore;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterEntry {
    pub number: u8,
    pub title: String,
    pub current: bool,
}

/// Everything the view needs to render one frame.
#[derive(Debug, Clone, Serialize)]
pub struct ReaderSnapshot {
    pub settings: Settings,
    pub theme_index: usize,
    pub font_size_label: String,
    pub line_height_label: String,
    pub speech_rate_label: String,
    pub chapter_title: String,
    pub chapter_text: String,
    pub chapters: Vec<ChapterEntry>,
    pub can_go_next: bool,
    pub can_go_previous: bool,
    pub playback: PlaybackPhase,
    pub show_play_icon: bool,
    pub show_pause_icon: bool,
    pub overlays: Overlays,
    pub voices: Vec<Voice>,
    pub selected_voice: Option<usize>,
}

#[derive(Debug, Clone)]
pub enum ReaderCommand {
    GetSnapshot,
    CycleTheme,
    SetFontSize { px: u32 },
    SetFontFamily { stack: String },
    SetLineHeight { multiplier: f32 },
    SetSpeechRate { rate: f32 },
    SetVoice { index: usize },
    GoToChapter { number: u8 },
    NextChapter,
    PreviousChapter,
    TogglePlay,
    StartSpeech,
    StopSpeech,
    OpenOverlay(Overlay),
    CloseOverlay(Overlay),
    ToggleSettings,
    Click(ClickTarget),
    Speech(SpeechEvent),
}

impl ReaderCommand {
    pub fn action(&self) -> &'static str {
        match self {
            Self::GetSnapshot => "reader_get_snapshot",
            Self::CycleTheme => "reader_cycle_theme",
            Self::SetFontSize { .. } => "reader_set_font_size",
            Self::SetFontFamily { .. } => "reader_set_font_family",
            Self::SetLineHeight { .. } => "reader_set_line_height",
            Self::SetSpeechRate { .. } => "reader_set_speech_rate",
            Self::SetVoice { .. } => "reader_set_voice",
            Self::GoToChapter { .. } => "reader_go_to_chapter",
            Self::NextChapter => "reader_next_chapter",
            Self::PreviousChapter => "reader_previous_chapter",
            Self::TogglePlay => "reader_toggle_play",
            Self::StartSpeech => "reader_start_speech",
            Self::StopSpeech => "reader_stop_speech",
            Self::OpenOverlay(_) => "reader_open_overlay",
            Self::CloseOverlay(_) => "reader_close_overlay",
            Self::ToggleSettings => "reader_toggle_settings",
            Self::Click(_) => "reader_click",
            Self::Speech(SpeechEvent::Finished { .. }) => "reader_speech_finished",
            Self::Speech(SpeechEvent::VoicesChanged(_)) => "reader_voices_changed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReaderEvent {
    pub action: &'static str,
    pub snapshot: ReaderSnapshot,
    pub effects: Vec<ViewEffect>,
}

impl<S: KeyValueStore, E: SpeechEngine> ReaderController<S, E> {
    /// Run one command and report the resulting state.
    pub fn apply_command(&mut self, command: ReaderCommand) -> Result<ReaderEvent, ReaderError> {
        let action = command.action();
        let effects = self.reduce(command)?;
        Ok(ReaderEvent {
            action,
            snapshot: self.snapshot(),
            effects,
        })
    }

    pub fn snapshot(&self) -> ReaderSnapshot {
        let speaking = self.playback.is_speaking();
        let selected_voice = Some(self.settings.voice_index).filter(|idx| *idx < self.voices.len());
        ReaderSnapshot {
            settings: self.settings.clone(),
            theme_index: self.settings.theme.index(),
            font_size_label: self.font_size_label(),
            line_height_label: self.line_height_label(),
            speech_rate_label: self.speech_rate_label(),
            chapter_title: self.chapter_title(),
            chapter_text: self.chapter_text().to_string(),
            chapters: self.chapter_entries(),
            can_go_next: self.can_go_next(),
            can_go_previous: self.can_go_previous(),
            playback: self.playback.phase(),
            show_play_icon: !speaking,
            show_pause_icon: speaking,
            overlays: self.overlays,
            voices: self.voices.clone(),
            selected_voice,
        }
    }

    fn reduce(&mut self, command: ReaderCommand) -> Result<Vec<ViewEffect>, ReaderError> {
        let mut effects: Vec<Effect> = Vec::new();

        match command {
            ReaderCommand::GetSnapshot => {}
            ReaderCommand::CycleTheme => self.handle_cycle_theme(&mut effects),
            ReaderCommand::SetFontSize { px } => self.handle_font_size_changed(px, &mut effects),
            ReaderCommand::SetFontFamily { stack } => {
                self.handle_font_family_changed(stack, &mut effects);
            }
            ReaderCommand::SetLineHeight { multiplier } => {
                self.handle_line_height_changed(multiplier, &mut effects);
            }
            ReaderCommand::SetSpeechRate { rate } => {
                self.handle_speech_rate_changed(rate, &mut effects);
            }
            ReaderCommand::SetVoice { index } => self.handle_voice_changed(index, &mut effects),
            ReaderCommand::GoToChapter { number } => {
                self.handle_go_to_chapter(number, &mut effects)?;
            }
            ReaderCommand::NextChapter => self.handle_next_chapter(&mut effects),
            ReaderCommand::PreviousChapter => self.handle_previous_chapter(&mut effects),
            ReaderCommand::TogglePlay => self.handle_toggle_play(&mut effects),
            ReaderCommand::StartSpeech => self.handle_start_speech(&mut effects),
            ReaderCommand::StopSpeech => self.handle_stop_speech(&mut effects),
            ReaderCommand::OpenOverlay(overlay) => self.open_overlay(overlay),
            ReaderCommand::CloseOverlay(overlay) => self.close_overlay(overlay),
            ReaderCommand::ToggleSettings => self.toggle_settings(),
            ReaderCommand::Click(target) => self.handle_click(target),
            ReaderCommand::Speech(event) => self.handle_speech_event(event),
        }

        Ok(self.run_effects(effects))
    }
}
