pub mod drag;
pub mod engine;
pub mod phase;
pub mod progress;

pub use engine::{ClockEngine, TickOutcome, TimerState};
pub use phase::Phase;

/// Fixed lengths of each phase, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Durations {
    pub work_secs: u32,
    pub short_break_secs: u32,
    pub long_break_secs: u32,
    pub long_break_every: u32,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            work_secs: 25 * 60,
            short_break_secs: 5 * 60,
            long_break_secs: 15 * 60,
            long_break_every: 4,
        }
    }
}

impl Durations {
    pub fn for_phase(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Work => self.work_secs,
            Phase::ShortBreak => self.short_break_secs,
            Phase::LongBreak => self.long_break_secs,
        }
    }
}

/// Render seconds as `M:SS`, e.g. 1500 -> "25:00", 245 -> "4:05".
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
