use thiserror::Error;

/// A draft that cannot become a journal entry yet.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("brew method is required")]
    MissingBrewMethod,

    #[error("roast level is required")]
    MissingRoastLevel,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GuideError {
    #[error("{requested} servings is outside the {min}-{max} range")]
    ServingsOutOfRange { requested: u32, min: u32, max: u32 },

    #[error("unknown quantity slot '{{{0}}}' in instruction template")]
    UnknownSlot(String),

    #[error("unterminated quantity slot in instruction template")]
    UnterminatedSlot,
}

#[derive(Debug, Error)]
pub enum JournalError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("journal entry {0} not found")]
    NotFound(String),

    #[error("journal store failed: {0:#}")]
    Storage(#[from] anyhow::Error),
}
