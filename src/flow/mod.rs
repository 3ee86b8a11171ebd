//! Guided, one-question-at-a-time entry flow.

pub mod controller;
pub mod draft;
pub mod step;

pub use controller::{EntryFlow, FlowView};
pub use draft::{DraftPatch, EntryDraft};
pub use step::{EntryStep, FlowVariant};
