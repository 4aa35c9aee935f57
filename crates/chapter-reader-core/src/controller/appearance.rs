use super::{Effect, ReaderController, ViewEffect};
use crate::speech::SpeechEngine;
use crate::store::KeyValueStore;
use crate::theme::Theme;
use tracing::{debug, info};

impl<S: KeyValueStore, E: SpeechEngine> ReaderController<S, E> {
    /// Advance to the next theme in the fixed order and persist it.
    pub fn cycle_theme(&mut self) -> Theme {
        self.with_effects(Self::handle_cycle_theme);
        self.settings.theme
    }

    pub fn set_font_size(&mut self, px: u32) -> Vec<ViewEffect> {
        self.with_effects(|this, effects| this.handle_font_size_changed(px, effects))
    }

    pub fn set_font_family(&mut self, stack: impl Into<String>) -> Vec<ViewEffect> {
        let stack = stack.into();
        self.with_effects(|this, effects| this.handle_font_family_changed(stack, effects))
    }

    pub fn set_line_height(&mut self, multiplier: f32) -> Vec<ViewEffect> {
        self.with_effects(|this, effects| this.handle_line_height_changed(multiplier, effects))
    }

    pub fn set_speech_rate(&mut self, rate: f32) -> Vec<ViewEffect> {
        self.with_effects(|this, effects| this.handle_speech_rate_changed(rate, effects))
    }

    pub fn set_voice_index(&mut self, index: usize) -> Vec<ViewEffect> {
        self.with_effects(|this, effects| this.handle_voice_changed(index, effects))
    }

    pub fn font_size_label(&self) -> String {
        format!("{}px", self.settings.font_size)
    }

    pub fn line_height_label(&self) -> String {
        self.settings.line_height.to_string()
    }

    pub fn speech_rate_label(&self) -> String {
        format!("{}x", self.settings.speech_rate)
    }

    pub(super) fn handle_cycle_theme(&mut self, effects: &mut Vec<Effect>) {
        let next = self.settings.theme.next();
        info!(from = %self.settings.theme, to = %next, "Cycled theme");
        self.settings.theme = next;
        effects.push(Effect::SaveSettings);
    }

    pub(super) fn handle_font_size_changed(&mut self, px: u32, effects: &mut Vec<Effect>) {
        debug!(old = self.settings.font_size, new = px, "Font size changed");
        self.settings.font_size = px;
        effects.push(Effect::SaveSettings);
    }

    pub(super) fn handle_font_family_changed(&mut self, stack: String, effects: &mut Vec<Effect>) {
        debug!(family = %stack, "Font family changed");
        self.settings.font_family = stack;
        effects.push(Effect::SaveSettings);
    }

    pub(super) fn handle_line_height_changed(&mut self, multiplier: f32, effects: &mut Vec<Effect>) {
        debug!(line_height = multiplier, "Line height changed");
        self.settings.line_height = multiplier;
        effects.push(Effect::SaveSettings);
    }

    pub(super) fn handle_speech_rate_changed(&mut self, rate: f32, effects: &mut Vec<Effect>) {
        info!(rate, "Adjusted speech rate");
        self.settings.speech_rate = rate;
        effects.push(Effect::SaveSettings);
    }

    pub(super) fn handle_voice_changed(&mut self, index: usize, effects: &mut Vec<Effect>) {
        match self.voices.get(index) {
            Some(voice) => info!(index, voice = %voice.name, "Selected voice"),
            None => debug!(index, known = self.voices.len(), "Selected voice not in current list"),
        }
        self.settings.voice_index = index;
        effects.push(Effect::SaveSettings);
    }
}
