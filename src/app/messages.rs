use super::state::{FontChoice, VoiceChoice};
use chapter_reader_core::overlay::ClickTarget;
use iced::keyboard::{Key, Modifiers};

/// Messages emitted by the UI.
#[derive(Debug, Clone)]
pub enum Message {
    CycleTheme,
    FontSizeChanged(u32),
    FontFamilyChanged(FontChoice),
    LineHeightChanged(f32),
    SpeechRateChanged(f32),
    VoiceSelected(VoiceChoice),
    OpenChapterIndex,
    CloseChapterIndex,
    GoToChapter(u8),
    NextChapter,
    PreviousChapter,
    TogglePlay,
    ToggleSettings,
    Clicked(ClickTarget),
    KeyPressed { key: Key, modifiers: Modifiers },
    Tick,
    SafeQuit,
}
