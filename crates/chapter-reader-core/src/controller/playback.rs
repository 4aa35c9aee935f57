use super::{Effect, ReaderController, ViewEffect};
use crate::speech::{SpeechEngine, SpeechEvent, Utterance, Voice};
use crate::store::KeyValueStore;
use tracing::{debug, info, warn};

impl<S: KeyValueStore, E: SpeechEngine> ReaderController<S, E> {
    pub fn toggle_play(&mut self) -> Vec<ViewEffect> {
        self.with_effects(Self::handle_toggle_play)
    }

    /// Speak the current chapter. Any utterance already in flight is cancelled first.
    pub fn start_speech(&mut self) -> Vec<ViewEffect> {
        self.with_effects(Self::handle_start_speech)
    }

    pub fn stop_speech(&mut self) -> Vec<ViewEffect> {
        self.with_effects(Self::handle_stop_speech)
    }

    /// Feed an engine notification back into the controller.
    pub fn handle_speech_event(&mut self, event: SpeechEvent) {
        match event {
            SpeechEvent::Finished { generation } => {
                if self.playback.finish(generation) {
                    info!(generation, "Speech finished");
                } else {
                    debug!(
                        generation,
                        current = self.playback.generation(),
                        "Ignoring stale speech completion"
                    );
                }
            }
            SpeechEvent::VoicesChanged(voices) => self.replace_voices(voices),
        }
    }

    /// Voice the next utterance will use; `None` when the saved index is stale.
    pub fn selected_voice(&self) -> Option<&Voice> {
        self.voices.get(self.settings.voice_index)
    }

    pub(super) fn handle_toggle_play(&mut self, effects: &mut Vec<Effect>) {
        if self.playback.is_speaking() {
            self.handle_stop_speech(effects);
        } else {
            self.handle_start_speech(effects);
        }
    }

    pub(super) fn handle_start_speech(&mut self, effects: &mut Vec<Effect>) {
        if self.playback.is_speaking() {
            debug!(
                generation = self.playback.generation(),
                "Cancelling active utterance before restart"
            );
            effects.push(Effect::CancelSpeech);
        }

        let text = self.chapter_text().to_string();
        let voice = self.selected_voice().cloned();
        if voice.is_none() && !self.voices.is_empty() {
            warn!(
                index = self.settings.voice_index,
                known = self.voices.len(),
                "Saved voice index is stale; using engine default voice"
            );
        }

        let generation = self.playback.begin();
        info!(
            generation,
            chapter = self.settings.current_chapter,
            rate = self.settings.speech_rate,
            chars = text.len(),
            "Starting speech"
        );
        effects.push(Effect::Speak(Utterance {
            generation,
            text,
            rate: self.settings.speech_rate,
            voice,
        }));
    }

    pub(super) fn handle_stop_speech(&mut self, effects: &mut Vec<Effect>) {
        info!(generation = self.playback.generation(), "Stopping speech");
        effects.push(Effect::CancelSpeech);
        self.playback.reset();
    }

    fn replace_voices(&mut self, voices: Vec<Voice>) {
        info!(count = voices.len(), "Voice list updated");
        self.voices = voices;
        if !self.voices.is_empty() && self.settings.voice_index >= self.voices.len() {
            warn!(
                index = self.settings.voice_index,
                known = self.voices.len(),
                "Saved voice index does not match the available voices"
            );
        }
    }
}
