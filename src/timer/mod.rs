pub mod controller;
pub mod state;

pub use controller::{BrewTimers, StepTimerKey, TimerSnapshot};
pub use state::{format_countdown, StepTimerState, TimerStatus};
