use std::f64::consts::{FRAC_PI_2, TAU};

use super::engine::ClockEngine;

/// Where the ring sits on screen, in terminal cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    /// Center of the ring as (column, row); fractional.
    pub center: (f64, f64),
    /// Radius measured in columns.
    pub radius: f64,
    /// Height/width ratio of one cell.
    pub cell_aspect: f64,
}

impl RingGeometry {
    /// Offset of the middle of a cell from the ring center, in column units
    /// with y pointing up.
    pub fn offset(&self, column: u16, row: u16) -> (f64, f64) {
        let dx = column as f64 + 0.5 - self.center.0;
        let dy = (self.center.1 - (row as f64 + 0.5)) * self.cell_aspect;
        (dx, dy)
    }

    /// Whether a cell lies on the ring band, within `tolerance` columns.
    pub fn hits_ring(&self, column: u16, row: u16, tolerance: f64) -> bool {
        let (dx, dy) = self.offset(column, row);
        (dx.hypot(dy) - self.radius).abs() <= tolerance
    }
}

/// Angle of a pointer offset, clockwise from 12 o'clock, in [0, 2π).
///
/// `atan2` yields the usual counter-clockwise angle from 3 o'clock; the
/// quarter-turn rotation puts 0 at the top of the ring.
pub fn pointer_angle(dx: f64, dy: f64) -> f64 {
    normalize_angle(FRAC_PI_2 - dy.atan2(dx))
}

pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// Share of the phase that an angle represents. The top of the ring is the
/// full circle, matching where the handle sits with the whole phase left.
pub fn fraction_from_angle(angle: f64) -> f64 {
    let a = normalize_angle(angle);
    if a == 0.0 {
        1.0
    } else {
        a / TAU
    }
}

pub fn remaining_from_angle(angle: f64, total_secs: u32) -> u32 {
    let secs = (fraction_from_angle(angle) * total_secs as f64).round() as u32;
    secs.min(total_secs)
}

/// Turns pointer drags on the ring into remaining-time edits.
#[derive(Debug, Default)]
pub struct DragController {
    dragging: bool,
}

impl DragController {
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Enter drag mode, suspending the countdown. Refused while a phase
    /// transition is pending.
    pub fn begin(&mut self, engine: &mut ClockEngine) -> bool {
        if engine.is_awaiting_transition() {
            return false;
        }
        engine.pause();
        self.dragging = true;
        true
    }

    /// Follow the pointer. Returns the new remaining seconds, or None when
    /// not dragging or the pointer sits exactly on the center.
    pub fn update(
        &mut self,
        engine: &mut ClockEngine,
        geometry: &RingGeometry,
        column: u16,
        row: u16,
    ) -> Option<u32> {
        if !self.dragging {
            return None;
        }
        let (dx, dy) = geometry.offset(column, row);
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        let secs = remaining_from_angle(pointer_angle(dx, dy), engine.state().total_secs());
        engine.set_remaining(secs);
        Some(engine.state().remaining_secs())
    }

    /// Leave drag mode. The engine stays paused.
    pub fn end(&mut self) -> bool {
        std::mem::replace(&mut self.dragging, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::Durations;
    use std::f64::consts::PI;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn geometry() -> RingGeometry {
        // Center of cell (20, 10); a 10-column radius
        RingGeometry {
            center: (20.5, 10.5),
            radius: 10.0,
            cell_aspect: 2.0,
        }
    }

    #[test]
    fn angle_zero_is_full_phase() {
        assert_eq!(remaining_from_angle(0.0, 1500), 1500);
    }

    #[test]
    fn angle_pi_is_half_phase() {
        assert_eq!(remaining_from_angle(PI, 1500), 750);
        assert_eq!(remaining_from_angle(PI, 300), 150);
    }

    #[test]
    fn quarter_turns() {
        assert_eq!(remaining_from_angle(PI / 2.0, 1200), 300);
        assert_eq!(remaining_from_angle(3.0 * PI / 2.0, 1200), 900);
    }

    #[test]
    fn pointer_angles_go_clockwise_from_top() {
        assert!(close(pointer_angle(0.0, 1.0), 0.0));
        assert!(close(pointer_angle(1.0, 0.0), PI / 2.0));
        assert!(close(pointer_angle(0.0, -1.0), PI));
        assert!(close(pointer_angle(-1.0, 0.0), 3.0 * PI / 2.0));
    }

    #[test]
    fn normalize_wraps_into_range() {
        assert!(close(normalize_angle(-PI / 2.0), 3.0 * PI / 2.0));
        assert!(close(normalize_angle(TAU + 1.0), 1.0));
        assert_eq!(normalize_angle(TAU), 0.0);
    }

    #[test]
    fn offset_scales_rows_by_aspect() {
        let g = geometry();
        let (dx, dy) = g.offset(20, 5);
        assert!(close(dx, 0.0));
        assert!(close(dy, 10.0));
        assert!(g.hits_ring(20, 5, 1.0));
        assert!(g.hits_ring(30, 10, 1.0));
        assert!(!g.hits_ring(20, 10, 1.0));
    }

    #[test]
    fn drag_suspends_engine_and_sets_time() {
        let mut engine = ClockEngine::new(Durations::default());
        engine.start();
        let mut drag = DragController::default();

        assert!(drag.begin(&mut engine));
        assert!(!engine.state().running());

        // Bottom of the ring: half the work phase
        let secs = drag.update(&mut engine, &geometry(), 20, 15);
        assert_eq!(secs, Some(750));
        assert_eq!(engine.state().remaining_secs(), 750);

        // Right side: a quarter
        assert_eq!(drag.update(&mut engine, &geometry(), 30, 10), Some(375));

        assert!(drag.end());
        assert!(!drag.is_dragging());
        assert!(!engine.state().running());
    }

    #[test]
    fn update_without_drag_is_ignored() {
        let mut engine = ClockEngine::new(Durations::default());
        let mut drag = DragController::default();
        assert_eq!(drag.update(&mut engine, &geometry(), 20, 15), None);
        assert_eq!(engine.state().remaining_secs(), 1500);
    }

    #[test]
    fn pointer_on_center_is_ignored() {
        let mut engine = ClockEngine::new(Durations::default());
        let mut drag = DragController::default();
        drag.begin(&mut engine);
        assert_eq!(drag.update(&mut engine, &geometry(), 20, 10), None);
    }
}
