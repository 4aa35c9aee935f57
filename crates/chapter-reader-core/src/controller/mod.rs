//! The reader controller.
//!
//! Operations mutate in-memory state and describe their side effects as
//! [`Effect`] values. `run_effects` then persists settings and talks to the
//! speech engine; effects only the view can perform come back to the caller
//! as [`ViewEffect`]s.

mod appearance;
mod command;
mod navigation;
mod overlays;
mod playback;

pub use command::{ChapterEntry, ReaderCommand, ReaderEvent, ReaderSnapshot};

use crate::chapters::{Chapter, ChapterCatalog};
use crate::overlay::Overlays;
use crate::settings::Settings;
use crate::speech::{PlaybackState, SpeechEngine, Utterance, Voice};
use crate::store::KeyValueStore;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Work the shell must do after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewEffect {
    ScrollToTop,
}

/// Side effects produced by the handlers.
#[derive(Debug)]
pub(crate) enum Effect {
    SaveSettings,
    Speak(Utterance),
    CancelSpeech,
    View(ViewEffect),
}

pub struct ReaderController<S, E> {
    store: S,
    engine: E,
    catalog: ChapterCatalog,
    settings: Settings,
    playback: PlaybackState,
    voices: Vec<Voice>,
    overlays: Overlays,
}

impl<S: KeyValueStore, E: SpeechEngine> ReaderController<S, E> {
    /// Load settings from `store` and start idle with no voices known yet.
    pub fn new(store: S, engine: E, catalog: ChapterCatalog) -> Self {
        let settings = Settings::load(&store);
        info!(
            theme = %settings.theme,
            chapter = settings.current_chapter,
            font_size = settings.font_size,
            "Initialized reader controller"
        );
        Self {
            store,
            engine,
            catalog,
            settings,
            playback: PlaybackState::default(),
            voices: Vec::new(),
            overlays: Overlays::default(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn is_speaking(&self) -> bool {
        self.playback.is_speaking()
    }

    pub fn overlays(&self) -> Overlays {
        self.overlays
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn catalog(&self) -> &ChapterCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn current_chapter(&self) -> Option<&Chapter> {
        self.catalog.get(self.settings.current_chapter)
    }

    pub(crate) fn with_effects(
        &mut self,
        handler: impl FnOnce(&mut Self, &mut Vec<Effect>),
    ) -> Vec<ViewEffect> {
        let mut effects = Vec::new();
        handler(self, &mut effects);
        self.run_effects(effects)
    }

    pub(crate) fn run_effects(&mut self, effects: Vec<Effect>) -> Vec<ViewEffect> {
        let mut view_effects = Vec::new();
        for effect in effects {
            match effect {
                Effect::SaveSettings => self.persist(),
                Effect::Speak(utterance) => {
                    let generation = utterance.generation;
                    if let Err(err) = self.engine.speak(utterance) {
                        warn!(generation, "Speech request refused: {err}");
                        if self.playback.finish(generation) {
                            debug!(generation, "Playback returned to idle after refusal");
                        }
                    }
                }
                Effect::CancelSpeech => self.engine.cancel(),
                Effect::View(effect) => {
                    if !view_effects.contains(&effect) {
                        view_effects.push(effect);
                    }
                }
            }
        }
        view_effects
    }

    fn persist(&mut self) {
        if let Err(err) = self.settings.save(&mut self.store) {
            warn!("Failed to persist reader settings: {err}");
        } else {
            debug!("Persisted reader settings");
        }
    }
}
