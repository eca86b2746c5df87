use std::f64::consts::TAU;

/// How far through the ring the current phase is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingProgress {
    /// remaining / total, clamped to [0, 1].
    pub fraction: f64,
    /// Length of the ring left undrawn: circumference * (1 - fraction).
    pub dash_offset: f64,
    /// Handle position, radians clockwise from 12 o'clock.
    pub handle_angle: f64,
}

impl RingProgress {
    /// Length of the ring that is drawn.
    pub fn drawn_length(&self, circumference: f64) -> f64 {
        (circumference - self.dash_offset).max(0.0)
    }
}

pub fn progress_fraction(remaining_secs: u32, total_secs: u32) -> f64 {
    if total_secs == 0 {
        return 0.0;
    }
    (remaining_secs as f64 / total_secs as f64).clamp(0.0, 1.0)
}

pub fn ring_progress(remaining_secs: u32, total_secs: u32, circumference: f64) -> RingProgress {
    let fraction = progress_fraction(remaining_secs, total_secs);
    RingProgress {
        fraction,
        dash_offset: circumference * (1.0 - fraction),
        handle_angle: fraction * TAU,
    }
}

/// Point on a ring of `radius` at `angle` (clockwise from 12 o'clock),
/// relative to the ring center with y pointing up.
pub fn point_on_ring(angle: f64, radius: f64) -> (f64, f64) {
    (radius * angle.sin(), radius * angle.cos())
}
