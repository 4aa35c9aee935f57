//! Speech engine contract and the controller-side playback state.
//!
//! Engines report completion asynchronously by emitting
//! [`SpeechEvent::Finished`] tagged with the generation of the utterance that
//! ended. The shell feeds those events back into the controller, which drops
//! any whose generation is no longer current.

use crate::error::ReaderError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub name: String,
    pub language: String,
    /// Engine-specific identifier passed back when speaking.
    pub id: String,
}

impl Voice {
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.language)
    }
}

/// One text-to-speech request.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub generation: u64,
    pub text: String,
    pub rate: f32,
    /// `None` lets the engine use its default voice.
    pub voice: Option<Voice>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpeechEvent {
    Finished { generation: u64 },
    VoicesChanged(Vec<Voice>),
}

pub trait SpeechEngine {
    fn speak(&mut self, utterance: Utterance) -> Result<(), ReaderError>;
    /// Drop whatever is speaking or queued. Must be safe to call when idle.
    fn cancel(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackPhase {
    #[default]
    Idle,
    Speaking {
        generation: u64,
    },
}

#[derive(Debug, Clone, Default)]
pub struct PlaybackState {
    phase: PlaybackPhase,
    generation: u64,
}

impl PlaybackState {
    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn is_speaking(&self) -> bool {
        matches!(self.phase, PlaybackPhase::Speaking { .. })
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Allocate the next generation id and mark it as speaking.
    pub(crate) fn begin(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.phase = PlaybackPhase::Speaking {
            generation: self.generation,
        };
        self.generation
    }

    pub(crate) fn reset(&mut self) {
        self.phase = PlaybackPhase::Idle;
    }

    /// Returns true when `generation` was the active utterance and playback is now idle.
    pub(crate) fn finish(&mut self, generation: u64) -> bool {
        match self.phase {
            PlaybackPhase::Speaking { generation: active } if active == generation => {
                self.phase = PlaybackPhase::Idle;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generations_increase_per_start() {
        let mut state = PlaybackState::default();
        let first = state.begin();
        let second = state.begin();
        assert!(second > first);
        assert_eq!(state.phase(), PlaybackPhase::Speaking { generation: second });
    }

    #[test]
    fn finish_ignores_other_generations() {
        let mut state = PlaybackState::default();
        let first = state.begin();
        let second = state.begin();
        assert!(!state.finish(first));
        assert!(state.is_speaking());
        assert!(state.finish(second));
        assert!(!state.is_speaking());
    }

    #[test]
    fn finish_after_reset_is_ignored() {
        let mut state = PlaybackState::default();
        let generation = state.begin();
        state.reset();
        assert!(!state.finish(generation));
        assert_eq!(state.phase(), PlaybackPhase::Idle);
    }

    #[test]
    fn voice_label_includes_language() {
        let voice = Voice {
            name: "English (America)".into(),
            language: "en-us".into(),
            id: "gmw/en-US".into(),
        };
        assert_eq!(voice.label(), "English (America) (en-us)");
    }
}
