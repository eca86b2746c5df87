use std::f64::consts::TAU;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::Widget;

use crate::timer::drag::RingGeometry;
use crate::timer::progress::{point_on_ring, ring_progress};

/// Arc samples per column of ring length.
const SAMPLES_PER_COLUMN: f64 = 4.0;

/// Where the ring lands inside `area`. The same mapping is used for drawing
/// and for turning mouse positions into angles.
pub fn ring_geometry(area: Rect, cell_aspect: f64) -> RingGeometry {
    let half_w = area.width as f64 / 2.0;
    let half_h = area.height as f64 / 2.0;
    let radius = (half_w.min(half_h * cell_aspect) - 1.0).max(1.0);
    RingGeometry {
        center: (area.x as f64 + half_w, area.y as f64 + half_h),
        radius,
        cell_aspect,
    }
}

/// Circular countdown: a faint full track, the remaining share drawn
/// clockwise from 12 o'clock, a handle at its end and the clock in the middle.
pub struct RingWidget {
    remaining_secs: u32,
    total_secs: u32,
    label: String,
    cell_aspect: f64,
    color: Color,
    track_color: Color,
    background: Color,
    dragging: bool,
}

impl RingWidget {
    pub fn new(remaining_secs: u32, total_secs: u32, cell_aspect: f64) -> Self {
        Self {
            remaining_secs,
            total_secs,
            label: String::new(),
            cell_aspect,
            color: Color::Red,
            track_color: Color::DarkGray,
            background: Color::Reset,
            dragging: false,
        }
    }

    pub fn with_label(mut self, label: String) -> Self {
        self.label = label;
        self
    }

    pub fn with_colors(mut self, color: Color, track: Color, background: Color) -> Self {
        self.color = color;
        self.track_color = track;
        self.background = background;
        self
    }

    pub fn dragging(mut self, dragging: bool) -> Self {
        self.dragging = dragging;
        self
    }
}

fn sample_arc(radius: f64, length: f64) -> Vec<(f64, f64)> {
    if length <= 0.0 || radius <= 0.0 {
        return Vec::new();
    }
    let steps = (length * SAMPLES_PER_COLUMN).ceil().max(1.0) as usize;
    (0..=steps)
        .map(|i| point_on_ring(length * i as f64 / steps as f64 / radius, radius))
        .collect()
}

impl Widget for RingWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 3 {
            return;
        }

        let geometry = ring_geometry(area, self.cell_aspect);
        let radius = geometry.radius;
        let circumference = TAU * radius;
        let progress = ring_progress(self.remaining_secs, self.total_secs, circumference);

        let track = sample_arc(radius, circumference);
        let arc = sample_arc(radius, progress.drawn_length(circumference));
        let (hx, hy) = point_on_ring(progress.handle_angle, radius);

        let half_w = area.width as f64 / 2.0;
        let half_h = area.height as f64 / 2.0 * self.cell_aspect;
        let handle_style = if self.dragging {
            Style::default().fg(self.color).add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(self.color)
        };
        let label_x = -(self.label.chars().count() as f64) / 2.0;
        let handle = if progress.fraction > 0.0 { "●" } else { "○" };

        Canvas::default()
            .marker(Marker::Braille)
            .background_color(self.background)
            .x_bounds([-half_w, half_w])
            .y_bounds([-half_h, half_h])
            .paint(|ctx| {
                ctx.draw(&Points { coords: &track, color: self.track_color });
                ctx.layer();
                ctx.draw(&Points { coords: &arc, color: self.color });
                ctx.layer();
                ctx.print(hx, hy, Span::styled(handle, handle_style));
                ctx.print(
                    label_x,
                    0.0,
                    Span::styled(
                        self.label.clone(),
                        Style::default().fg(self.color).add_modifier(Modifier::BOLD),
                    ),
                );
            })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_is_centered_in_area() {
        let g = ring_geometry(Rect::new(10, 5, 40, 20), 2.0);
        assert_eq!(g.center, (30.0, 15.0));
        // Width limits: min(20, 10 * 2) - 1
        assert_eq!(g.radius, 19.0);
    }

    #[test]
    fn short_area_limits_radius_by_height() {
        let g = ring_geometry(Rect::new(0, 0, 80, 10), 2.0);
        assert_eq!(g.radius, 9.0);
    }

    #[test]
    fn arc_samples_cover_requested_length() {
        let radius = 10.0;
        let half = sample_arc(radius, TAU * radius / 2.0);
        let (x, y) = *half.last().unwrap();
        assert!(x.abs() < 1e-9);
        assert!((y + radius).abs() < 1e-9);
        assert!(sample_arc(radius, 0.0).is_empty());
    }

    #[test]
    fn renders_label_without_panicking() {
        let area = Rect::new(0, 0, 30, 12);
        let mut buf = Buffer::empty(area);
        RingWidget::new(750, 1500, 2.0)
            .with_label("12:30".into())
            .render(area, &mut buf);

        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect();
        assert!(text.contains('●'));
    }
}
