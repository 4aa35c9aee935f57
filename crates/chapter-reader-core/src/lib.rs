//! UI-agnostic core of the chapter reader.
//!
//! The [`controller::ReaderController`] owns the reading preferences, the
//! chapter catalog and the speech playback state. Persistence goes through a
//! [`store::KeyValueStore`] and speech through a [`speech::SpeechEngine`], so
//! the same controller drives the desktop shell and the unit tests.

pub mod chapters;
pub mod controller;
pub mod error;
pub mod overlay;
pub mod settings;
pub mod speech;
pub mod store;
pub mod theme;

pub use controller::{ReaderCommand, ReaderController, ReaderEvent, ReaderSnapshot, ViewEffect};
pub use error::ReaderError;
pub use settings::Settings;
pub use theme::Theme;
