mod engine;
mod mode;

pub use engine::{format_mmss, TimerEngine, TimerState};
pub use mode::{Durations, TimerMode};
