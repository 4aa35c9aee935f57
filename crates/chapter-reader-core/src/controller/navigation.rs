use super::command::ChapterEntry;
use super::{Effect, ReaderController, ViewEffect};
use crate::chapters::{CHAPTER_COUNT, default_title, is_valid_chapter};
use crate::error::ReaderError;
use crate::overlay::Overlay;
use crate::speech::SpeechEngine;
use crate::store::KeyValueStore;
use tracing::{debug, info};

impl<S: KeyValueStore, E: SpeechEngine> ReaderController<S, E> {
    /// Jump to chapter `number` (1-based). Numbers outside the book are rejected.
    pub fn go_to_chapter(&mut self, number: u8) -> Result<Vec<ViewEffect>, ReaderError> {
        let mut effects = Vec::new();
        self.handle_go_to_chapter(number, &mut effects)?;
        Ok(self.run_effects(effects))
    }

    /// No-op on the last chapter.
    pub fn next_chapter(&mut self) -> Vec<ViewEffect> {
        self.with_effects(Self::handle_next_chapter)
    }

    /// No-op on the first chapter.
    pub fn previous_chapter(&mut self) -> Vec<ViewEffect> {
        self.with_effects(Self::handle_previous_chapter)
    }

    pub fn chapter_title(&self) -> String {
        self.current_chapter()
            .map(|chapter| chapter.title.clone())
            .unwrap_or_else(|| default_title(self.settings.current_chapter))
    }

    pub fn chapter_text(&self) -> &str {
        self.current_chapter()
            .map(|chapter| chapter.text.as_str())
            .unwrap_or("")
    }

    /// Chapter list with the current entry marked.
    pub fn chapter_entries(&self) -> Vec<ChapterEntry> {
        self.catalog
            .iter()
            .map(|chapter| ChapterEntry {
                number: chapter.number,
                title: chapter.title.clone(),
                current: chapter.number == self.settings.current_chapter,
            })
            .collect()
    }

    pub fn can_go_next(&self) -> bool {
        self.settings.current_chapter < CHAPTER_COUNT
    }

    pub fn can_go_previous(&self) -> bool {
        self.settings.current_chapter > 1
    }

    pub(super) fn handle_go_to_chapter(
        &mut self,
        number: u8,
        effects: &mut Vec<Effect>,
    ) -> Result<(), ReaderError> {
        if !is_valid_chapter(i64::from(number)) {
            debug!(number, "Rejected chapter outside the book");
            return Err(ReaderError::ChapterOutOfRange {
                requested: number,
                max: CHAPTER_COUNT,
            });
        }

        self.settings.current_chapter = number;
        effects.push(Effect::SaveSettings);
        self.overlays.set(Overlay::ChapterIndex, false);
        effects.push(Effect::View(ViewEffect::ScrollToTop));
        info!(chapter = number, title = %self.chapter_title(), "Navigated to chapter");

        if self.playback.is_speaking() {
            self.handle_stop_speech(effects);
        }
        Ok(())
    }

    pub(super) fn handle_next_chapter(&mut self, effects: &mut Vec<Effect>) {
        if self.can_go_next() {
            let next = self.settings.current_chapter + 1;
            if let Err(err) = self.handle_go_to_chapter(next, effects) {
                debug!("Next chapter rejected: {err}");
            }
        }
    }

    pub(super) fn handle_previous_chapter(&mut self, effects: &mut Vec<Effect>) {
        if self.can_go_previous() {
            let previous = self.settings.current_chapter - 1;
            if let Err(err) = self.handle_go_to_chapter(previous, effects) {
                debug!("Previous chapter rejected: {err}");
            }
        }
    }
}
