use thiserror::Error;

/// Operations the controller refuses to perform.
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("chapter {requested} is outside 1..={max}")]
    ChapterOutOfRange { requested: u8, max: u8 },
    #[error("settings store failure: {0}")]
    Store(String),
    #[error("speech engine failure: {0}")]
    Speech(String),
}
