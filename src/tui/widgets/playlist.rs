use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Widget};

use crate::audio::playlist::Playlist;
use crate::tui::palette::Palette;

/// Track list with the active track highlighted.
pub struct PlaylistWidget<'a> {
    playlist: &'a Playlist,
    playing: bool,
    palette: &'a Palette,
}

impl<'a> PlaylistWidget<'a> {
    pub fn new(playlist: &'a Playlist, playing: bool, palette: &'a Palette) -> Self {
        Self {
            playlist,
            playing,
            palette,
        }
    }
}

/// Rows the widget needs, borders included.
pub fn playlist_height(playlist: &Playlist) -> u16 {
    playlist.len() as u16 + 2
}

/// Which track a click on `row` lands on, if any.
pub fn track_at(area: Rect, row: u16, len: usize) -> Option<usize> {
    let first = area.y + 1;
    if row < first || row >= area.y + area.height.saturating_sub(1) {
        return None;
    }
    let index = (row - first) as usize;
    (index < len).then_some(index)
}

impl Widget for PlaylistWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let current = self.playlist.current_index();
        let items: Vec<ListItem> = self
            .playlist
            .tracks()
            .iter()
            .enumerate()
            .map(|(i, track)| {
                let marker = match (i == current, self.playing) {
                    (true, true) => "▶ ",
                    (true, false) => "‖ ",
                    _ => "  ",
                };
                let style = if i == current {
                    Style::default()
                        .fg(self.palette.accent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(self.palette.foreground)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{marker}{}. ", i + 1), style),
                    Span::styled(track.title.clone(), style),
                ]))
            })
            .collect();

        let title = if self.playing { " Music ♪ " } else { " Music " };
        List::new(items)
            .style(self.palette.base())
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.palette.dim)),
            )
            .render(area, buf);
    }
}
