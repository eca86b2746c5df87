use super::phase::{self, Phase};
use super::Durations;

/// Countdown state for the active phase.
///
/// Fields are private: only the tick, the phase transition, reset and the
/// drag controller may change them. `remaining_secs <= total_secs` always.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    remaining_secs: u32,
    total_secs: u32,
    phase: Phase,
    running: bool,
    completed_work_phases: u32,
}

impl TimerState {
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn completed_work_phases(&self) -> u32 {
        self.completed_work_phases
    }
}

/// Result of one countdown step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The engine is paused; nothing changed.
    Idle,
    /// One second was taken off the clock.
    Counted,
    /// The phase ran out. Ticking is suspended until `advance_phase`.
    Expired,
}

/// Owns the countdown and the phase cycle.
#[derive(Debug, Clone)]
pub struct ClockEngine {
    state: TimerState,
    durations: Durations,
    awaiting_transition: bool,
}

impl ClockEngine {
    pub fn new(durations: Durations) -> Self {
        Self {
            state: TimerState {
                remaining_secs: durations.work_secs,
                total_secs: durations.work_secs,
                phase: Phase::Work,
                running: false,
                completed_work_phases: 0,
            },
            durations,
            awaiting_transition: false,
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// True between expiry and the phase transition.
    pub fn is_awaiting_transition(&self) -> bool {
        self.awaiting_transition
    }

    /// Resume the countdown. Returns false when nothing changed: already
    /// running, or a phase transition is pending.
    pub fn start(&mut self) -> bool {
        if self.state.running || self.awaiting_transition {
            return false;
        }
        self.state.running = true;
        true
    }

    /// Suspend the countdown. Returns false if it was already paused.
    pub fn pause(&mut self) -> bool {
        if !self.state.running {
            return false;
        }
        self.state.running = false;
        true
    }

    /// Back to a fresh, paused Work phase with the cycle count cleared.
    pub fn reset(&mut self) {
        self.awaiting_transition = false;
        self.enter(Phase::Work);
        self.state.running = false;
        self.state.completed_work_phases = 0;
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.running {
            return TickOutcome::Idle;
        }
        match self.state.remaining_secs.checked_sub(1) {
            Some(left) => {
                self.state.remaining_secs = left;
                TickOutcome::Counted
            }
            None => {
                self.state.running = false;
                self.awaiting_transition = true;
                TickOutcome::Expired
            }
        }
    }

    /// Move to the next phase of the cycle and resume ticking.
    pub fn advance_phase(&mut self) -> Phase {
        let (next, completed) = phase::next_phase(
            self.state.phase,
            self.state.completed_work_phases,
            self.durations.long_break_every,
        );
        self.state.completed_work_phases = completed;
        self.enter(next);
        self.awaiting_transition = false;
        self.state.running = true;
        next
    }

    /// Overwrite the remaining time, clamped to the phase length.
    pub fn set_remaining(&mut self, secs: u32) {
        self.state.remaining_secs = secs.min(self.state.total_secs);
    }

    fn enter(&mut self, phase: Phase) {
        let total = self.durations.for_phase(phase).max(1);
        self.state.phase = phase;
        self.state.total_secs = total;
        self.state.remaining_secs = total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short() -> Durations {
        Durations {
            work_secs: 3,
            short_break_secs: 2,
            long_break_secs: 4,
            long_break_every: 4,
        }
    }

    fn run_until_expired(engine: &mut ClockEngine) {
        for _ in 0..1000 {
            if engine.tick() == TickOutcome::Expired {
                return;
            }
        }
        panic!("engine never expired");
    }

    #[test]
    fn starts_paused_in_work() {
        let engine = ClockEngine::new(short());
        let s = engine.state();
        assert_eq!(s.phase(), Phase::Work);
        assert_eq!(s.remaining_secs(), 3);
        assert_eq!(s.total_secs(), 3);
        assert!(!s.running());
    }

    #[test]
    fn start_and_pause_are_idempotent() {
        let mut engine = ClockEngine::new(short());
        assert!(engine.start());
        assert!(!engine.start());
        assert!(engine.pause());
        assert!(!engine.pause());
    }

    #[test]
    fn paused_tick_does_nothing() {
        let mut engine = ClockEngine::new(short());
        assert_eq!(engine.tick(), TickOutcome::Idle);
        assert_eq!(engine.state().remaining_secs(), 3);
    }

    #[test]
    fn expiry_happens_on_the_tick_after_zero() {
        let mut engine = ClockEngine::new(short());
        engine.start();
        assert_eq!(engine.tick(), TickOutcome::Counted);
        assert_eq!(engine.tick(), TickOutcome::Counted);
        assert_eq!(engine.tick(), TickOutcome::Counted);
        assert_eq!(engine.state().remaining_secs(), 0);

        assert_eq!(engine.tick(), TickOutcome::Expired);
        assert!(!engine.state().running());
        assert!(engine.is_awaiting_transition());

        // Suspended until the transition runs
        assert!(!engine.start());
        assert_eq!(engine.tick(), TickOutcome::Idle);
    }

    #[test]
    fn transition_resets_clock_and_resumes() {
        let mut engine = ClockEngine::new(short());
        engine.start();
        run_until_expired(&mut engine);

        assert_eq!(engine.advance_phase(), Phase::ShortBreak);
        let s = engine.state();
        assert_eq!(s.remaining_secs(), 2);
        assert_eq!(s.total_secs(), 2);
        assert_eq!(s.completed_work_phases(), 1);
        assert!(s.running());
        assert!(!engine.is_awaiting_transition());
    }

    #[test]
    fn long_break_after_four_work_phases() {
        let mut engine = ClockEngine::new(short());
        engine.start();
        let mut breaks = Vec::new();
        while breaks.len() < 4 {
            run_until_expired(&mut engine);
            let next = engine.advance_phase();
            if next.is_break() {
                breaks.push(next);
            }
        }
        assert_eq!(
            breaks,
            vec![Phase::ShortBreak, Phase::ShortBreak, Phase::ShortBreak, Phase::LongBreak]
        );
        assert_eq!(engine.state().total_secs(), 4);
        assert_eq!(engine.state().completed_work_phases(), 4);
    }

    #[test]
    fn reset_returns_to_fresh_work_phase() {
        let mut engine = ClockEngine::new(short());
        engine.start();
        run_until_expired(&mut engine);
        engine.advance_phase();
        engine.tick();

        engine.reset();
        let s = engine.state();
        assert_eq!(s.phase(), Phase::Work);
        assert_eq!(s.completed_work_phases(), 0);
        assert_eq!(s.remaining_secs(), s.total_secs());
        assert_eq!(s.total_secs(), 3);
        assert!(!s.running());
        assert!(!engine.is_awaiting_transition());
    }

    #[test]
    fn reset_cancels_pending_transition() {
        let mut engine = ClockEngine::new(short());
        engine.start();
        run_until_expired(&mut engine);
        engine.reset();
        assert!(engine.start());
    }

    #[test]
    fn set_remaining_is_clamped() {
        let mut engine = ClockEngine::new(short());
        engine.set_remaining(99);
        assert_eq!(engine.state().remaining_secs(), 3);
        engine.set_remaining(1);
        assert_eq!(engine.state().remaining_secs(), 1);
    }
}
