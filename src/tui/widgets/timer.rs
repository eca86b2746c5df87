use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::timer::{format_clock, TimerState};
use crate::tui::palette::Palette;

/// Phase status, clock readout and cycle count.
pub struct TimerWidget<'a> {
    state: &'a TimerState,
    palette: &'a Palette,
    /// Optional label override (e.g., "Next phase...").
    label: Option<String>,
}

impl<'a> TimerWidget<'a> {
    pub fn new(state: &'a TimerState, palette: &'a Palette) -> Self {
        Self {
            state,
            palette,
            label: None,
        }
    }

    pub fn with_label(mut self, label: String) -> Self {
        self.label = Some(label);
        self
    }
}

impl Widget for TimerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let phase = self.state.phase();
        let color = self.palette.phase_color(phase);

        let status = self.label.unwrap_or_else(|| phase.status().to_string());
        let run_state = if self.state.running() { "running" } else { "paused" };

        let lines = vec![
            Line::from(Span::styled(
                status,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(
                    format_clock(self.state.remaining_secs()),
                    Style::default().fg(self.palette.foreground).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" / {}  ", format_clock(self.state.total_secs())),
                    Style::default().fg(self.palette.dim),
                ),
                Span::styled(run_state, Style::default().fg(self.palette.accent)),
            ]),
            Line::from(Span::styled(
                format!("Pomodoros: {}", self.state.completed_work_phases()),
                Style::default().fg(self.palette.foreground),
            )),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(self.palette.base())
            .block(
                Block::default()
                    .title(format!(" {} ", phase.label()))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            )
            .render(area, buf);
    }
}
