/// One segment of the Pomodoro cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Work => "Work",
            Phase::ShortBreak => "Short break",
            Phase::LongBreak => "Long break",
        }
    }

    /// Status line shown while this phase is active.
    pub fn status(self) -> &'static str {
        match self {
            Phase::Work => "Time to focus!",
            Phase::ShortBreak => "Short break!",
            Phase::LongBreak => "Long break!",
        }
    }

    pub fn is_break(self) -> bool {
        !matches!(self, Phase::Work)
    }
}

/// Decide the phase that follows `current`.
///
/// Leaving Work counts one more completed work phase; every
/// `long_break_every`-th completion earns a long break. Breaks always lead
/// back to Work. Returns the next phase and the updated completed count.
pub fn next_phase(current: Phase, completed_work: u32, long_break_every: u32) -> (Phase, u32) {
    match current {
        Phase::Work => {
            let completed = completed_work + 1;
            let every = long_break_every.max(1);
            if completed % every == 0 {
                (Phase::LongBreak, completed)
            } else {
                (Phase::ShortBreak, completed)
            }
        }
        Phase::ShortBreak | Phase::LongBreak => (Phase::Work, completed_work),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breaks_return_to_work() {
        assert_eq!(next_phase(Phase::ShortBreak, 1, 4), (Phase::Work, 1));
        assert_eq!(next_phase(Phase::LongBreak, 4, 4), (Phase::Work, 4));
    }

    #[test]
    fn fourth_work_phase_earns_long_break() {
        let mut phase = Phase::Work;
        let mut completed = 0;
        let mut breaks = Vec::new();

        while breaks.len() < 8 {
            let (next, count) = next_phase(phase, completed, 4);
            if next.is_break() {
                breaks.push(next);
            }
            phase = next;
            completed = count;
        }

        use Phase::*;
        assert_eq!(
            breaks,
            vec![ShortBreak, ShortBreak, ShortBreak, LongBreak, ShortBreak, ShortBreak, ShortBreak, LongBreak]
        );
        assert_eq!(completed, 8);
    }

    #[test]
    fn zero_interval_is_treated_as_every_phase() {
        assert_eq!(next_phase(Phase::Work, 0, 0), (Phase::LongBreak, 1));
    }

    #[test]
    fn status_strings() {
        assert_eq!(Phase::Work.status(), "Time to focus!");
        assert!(Phase::LongBreak.is_break());
        assert!(!Phase::Work.is_break());
    }
}
