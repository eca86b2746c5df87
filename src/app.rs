use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use crate::audio::player::PlaylistPlayer;
use crate::theme::{ThemePreference, ThemeStore, ThemeTarget};
use crate::timer::drag::{DragController, RingGeometry};
use crate::timer::{ClockEngine, Durations, TickOutcome, TimerState};

/// Countdown period.
pub const TICK: Duration = Duration::from_secs(1);

/// How far (in columns) from the ring line a press still grabs it.
const GRAB_TOLERANCE: f64 = 1.5;

/// The whole widget state. Every input and every clock step goes through
/// one of these methods; `now` is passed in so tests can drive time.
pub struct App {
    engine: ClockEngine,
    drag: DragController,
    player: PlaylistPlayer,
    theme: ThemeStore,
    alarm_delay: Duration,
    /// Deadline of the next countdown step while running.
    next_tick: Option<Instant>,
    /// When the pending phase transition fires.
    transition_due: Option<Instant>,
    phase_started: DateTime<Local>,
}

impl App {
    pub fn new(
        durations: Durations,
        alarm_delay: Duration,
        player: PlaylistPlayer,
        theme: ThemeStore,
    ) -> Self {
        Self {
            engine: ClockEngine::new(durations),
            drag: DragController::default(),
            player,
            theme,
            alarm_delay,
            next_tick: None,
            transition_due: None,
            phase_started: Local::now(),
        }
    }

    pub fn timer(&self) -> &TimerState {
        self.engine.state()
    }

    pub fn player(&self) -> &PlaylistPlayer {
        &self.player
    }

    pub fn theme(&self) -> ThemePreference {
        self.theme.current()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn is_awaiting_transition(&self) -> bool {
        self.engine.is_awaiting_transition()
    }

    pub fn phase_started(&self) -> DateTime<Local> {
        self.phase_started
    }

    // --- Clock controls ---

    /// Start the countdown. Ignored while the ring is being dragged; the
    /// drag owns `remaining` until it is released.
    pub fn start(&mut self, now: Instant) {
        if self.drag.is_dragging() {
            log::debug!("Start ignored during drag");
            return;
        }
        if self.engine.start() {
            log::info!("Timer started ({})", self.engine.state().phase().label());
            self.next_tick = Some(now + TICK);
            self.sync_music();
        }
    }

    pub fn pause(&mut self) {
        if self.engine.pause() {
            log::info!("Timer paused");
            self.next_tick = None;
            self.sync_music();
        }
    }

    pub fn toggle_running(&mut self, now: Instant) {
        if self.engine.state().running() {
            self.pause();
        } else {
            self.start(now);
        }
    }

    pub fn reset(&mut self) {
        self.engine.reset();
        self.drag.end();
        self.next_tick = None;
        self.transition_due = None;
        self.phase_started = Local::now();
        log::info!("Timer reset");
        self.sync_music();
    }

    /// Run every countdown step and pending transition due by `now`, and
    /// move the playlist on when a track ended.
    pub fn update(&mut self, now: Instant) {
        while let Some(due) = self.next_tick {
            if now < due {
                break;
            }
            match self.engine.tick() {
                TickOutcome::Counted => self.next_tick = Some(due + TICK),
                TickOutcome::Expired => self.on_expired(due),
                TickOutcome::Idle => self.next_tick = None,
            }
        }

        if let Some(due) = self.transition_due {
            if now >= due {
                self.finish_transition(due);
            }
        }

        self.player.poll_finished();
    }

    fn on_expired(&mut self, at: Instant) {
        let phase = self.engine.state().phase();
        log::info!("{} phase finished", phase.label());
        self.next_tick = None;
        self.transition_due = Some(at + self.alarm_delay);
        self.player.sound_alarm();
        self.sync_music();
    }

    fn finish_transition(&mut self, at: Instant) {
        self.transition_due = None;
        let next = self.engine.advance_phase();
        self.phase_started = Local::now();
        log::info!(
            "Entering {} ({} work phases completed)",
            next.label(),
            self.engine.state().completed_work_phases()
        );
        self.next_tick = Some(at + TICK);
        self.sync_music();
    }

    /// Music follows the clock: on while a Work phase is running, off
    /// otherwise.
    fn sync_music(&mut self) {
        let state = self.engine.state();
        let wanted = state.running() && !state.phase().is_break();
        if wanted && !self.player.is_playing() {
            self.player.play();
        } else if !wanted && self.player.is_playing() {
            self.player.pause();
        }
    }

    // --- Ring drag ---

    /// Press on the ring. Returns true when a drag started.
    pub fn begin_drag(&mut self, geometry: &RingGeometry, column: u16, row: u16) -> bool {
        if !geometry.hits_ring(column, row, GRAB_TOLERANCE) {
            return false;
        }
        if !self.drag.begin(&mut self.engine) {
            return false;
        }
        log::debug!("Drag started");
        self.next_tick = None;
        self.sync_music();
        self.drag.update(&mut self.engine, geometry, column, row);
        true
    }

    pub fn drag_to(&mut self, geometry: &RingGeometry, column: u16, row: u16) {
        self.drag.update(&mut self.engine, geometry, column, row);
    }

    pub fn end_drag(&mut self) {
        if self.drag.end() {
            log::debug!(
                "Drag ended at {} s",
                self.engine.state().remaining_secs()
            );
        }
    }

    // --- Music controls ---

    pub fn toggle_music(&mut self) {
        self.player.toggle();
    }

    pub fn next_track(&mut self) {
        self.player.next();
    }

    pub fn previous_track(&mut self) {
        self.player.previous();
    }

    pub fn select_track(&mut self, index: usize) {
        self.player.select(index);
    }

    // --- Theme ---

    pub fn toggle_theme(&mut self, target: &mut dyn ThemeTarget) -> ThemePreference {
        let theme = self.theme.toggle(target);
        log::info!("Theme switched to {theme}");
        theme
    }
}
