pub mod entries;
pub mod flow;
pub mod guides;
pub mod settings;
pub mod timers;
