use std::time::{Duration, Instant};

use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::App;
use crate::timer::format_clock;
use crate::tui::event::{AppEvent, EventHandler};
use crate::tui::palette::Palette;
use crate::tui::widgets::playlist::{playlist_height, track_at, PlaylistWidget};
use crate::tui::widgets::ring::{ring_geometry, RingWidget};
use crate::tui::widgets::timer::TimerWidget;
use crate::tui::Tui;

/// Poll interval; the countdown itself is driven by deadlines in `App`.
const FRAME_RATE: Duration = Duration::from_millis(100);

/// Screen regions from the last draw, used to place mouse input.
#[derive(Debug, Default, Clone, Copy)]
struct ScreenLayout {
    ring: Rect,
    playlist: Rect,
}

/// Run the Pomodoro screen until the user quits.
pub fn run(
    terminal: &mut Tui,
    app: &mut App,
    palette: &mut Palette,
    cell_aspect: f64,
) -> anyhow::Result<()> {
    let events = EventHandler::new(FRAME_RATE);
    let mut layout = ScreenLayout::default();

    loop {
        app.update(Instant::now());

        terminal.draw(|frame| {
            let area = frame.area();
            layout = render(frame, area, app, palette, cell_aspect);
        })?;

        match events.next()? {
            AppEvent::Key(key) if key.kind == KeyEventKind::Press => {
                if !handle_key(app, palette, key, Instant::now()) {
                    return Ok(());
                }
            }
            AppEvent::Mouse(mouse) => handle_mouse(app, &layout, cell_aspect, mouse),
            AppEvent::Tick | AppEvent::Resize(_, _) => {}
            _ => {}
        }
    }
}

/// Apply a key press. Returns false when the user asked to quit.
fn handle_key(app: &mut App, palette: &mut Palette, key: KeyEvent, now: Instant) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return false,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return false,
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_running(now),
        KeyCode::Char('r') => app.reset(),
        KeyCode::Char('m') => app.toggle_music(),
        KeyCode::Char('n') | KeyCode::Right => app.next_track(),
        KeyCode::Char('p') | KeyCode::Left => app.previous_track(),
        KeyCode::Char('t') => {
            app.toggle_theme(palette);
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.select_track(index);
        }
        _ => {}
    }
    true
}

fn handle_mouse(app: &mut App, layout: &ScreenLayout, cell_aspect: f64, mouse: MouseEvent) {
    let geometry = ring_geometry(layout.ring, cell_aspect);
    let (column, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if app.begin_drag(&geometry, column, row) {
                return;
            }
            if layout.playlist.contains(Position::new(column, row)) {
                let len = app.player().playlist().len();
                if let Some(index) = track_at(layout.playlist, row, len) {
                    app.select_track(index);
                }
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if app.is_dragging() {
                app.drag_to(&geometry, column, row);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => app.end_drag(),
        _ => {}
    }
}

fn render(
    frame: &mut ratatui::Frame,
    area: Rect,
    app: &App,
    palette: &Palette,
    cell_aspect: f64,
) -> ScreenLayout {
    let outer = Block::default()
        .title(" pomolofi ")
        .title(Line::from(format!(" {} [t] ", palette.icon)).right_aligned())
        .borders(Borders::ALL)
        .style(palette.base());
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let playlist = app.player().playlist();
    let rows = Layout::vertical([
        Constraint::Min(8),                              // ring
        Constraint::Length(5),                           // status + clock
        Constraint::Length(playlist_height(playlist)),   // track list
        Constraint::Length(1),                           // key hint
    ])
    .split(inner);

    let timer = app.timer();
    let color = palette.phase_color(timer.phase());

    let ring = RingWidget::new(timer.remaining_secs(), timer.total_secs(), cell_aspect)
        .with_label(format_clock(timer.remaining_secs()))
        .with_colors(color, palette.dim, palette.background)
        .dragging(app.is_dragging());
    frame.render_widget(ring, rows[0]);

    let mut timer_widget = TimerWidget::new(timer, palette);
    if app.is_awaiting_transition() {
        timer_widget = timer_widget.with_label("Time's up!".into());
    } else if app.is_dragging() {
        timer_widget = timer_widget.with_label("Setting time...".into());
    }
    frame.render_widget(timer_widget, rows[1]);

    frame.render_widget(
        PlaylistWidget::new(playlist, app.player().is_playing(), palette),
        rows[2],
    );

    let key = Style::default().fg(palette.accent).add_modifier(Modifier::BOLD);
    let hint = vec![
        Span::styled(" [Space]", key),
        Span::raw(" start/pause  "),
        Span::styled("[r]", key),
        Span::raw(" reset  "),
        Span::styled("[m]", key),
        Span::raw(" music  "),
        Span::styled("[n/p]", key),
        Span::raw(" track  "),
        Span::styled("[q]", key),
        Span::raw(" quit  "),
        Span::styled(
            format!("phase since {}", app.phase_started().format("%H:%M")),
            Style::default().fg(palette.dim),
        ),
    ];
    frame.render_widget(Paragraph::new(Line::from(hint)), rows[3]);

    ScreenLayout {
        ring: rows[0],
        playlist: rows[2],
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::audio::player::fake::FakeOutput;
    use crate::audio::player::PlaylistPlayer;
    use crate::audio::playlist::{Playlist, Track};
    use crate::storage::MemoryStore;
    use crate::theme::{ThemePreference, ThemeStore};
    use crate::timer::{Durations, Phase};

    fn app(palette: &mut Palette) -> App {
        let tracks = (1..=3)
            .map(|i| Track {
                title: format!("Lofi {i}"),
                path: PathBuf::from(format!("Lofi{i}.mp3")),
            })
            .collect();
        let player = PlaylistPlayer::new(
            Playlist::new(tracks).unwrap(),
            Box::new(FakeOutput::default()),
        );
        let theme = ThemeStore::initialize(Box::new(MemoryStore::default()), palette);
        App::new(Durations::default(), Duration::from_secs(1), player, theme)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn keys_drive_the_app() {
        let mut palette = Palette::default();
        let mut app = app(&mut palette);
        let now = Instant::now();

        assert!(handle_key(&mut app, &mut palette, press(KeyCode::Char(' ')), now));
        assert!(app.timer().running());
        assert!(app.player().is_playing());

        handle_key(&mut app, &mut palette, press(KeyCode::Char('n')), now);
        assert_eq!(app.player().playlist().current_index(), 1);

        handle_key(&mut app, &mut palette, press(KeyCode::Char('3')), now);
        assert_eq!(app.player().playlist().current_index(), 2);

        handle_key(&mut app, &mut palette, press(KeyCode::Char('r')), now);
        assert!(!app.timer().running());
        assert_eq!(app.timer().phase(), Phase::Work);

        assert!(!handle_key(&mut app, &mut palette, press(KeyCode::Char('q')), now));
    }

    #[test]
    fn theme_key_updates_palette() {
        let mut palette = Palette::default();
        let mut app = app(&mut palette);
        handle_key(&mut app, &mut palette, press(KeyCode::Char('t')), Instant::now());
        assert_eq!(app.theme(), ThemePreference::Dark);
        assert_eq!(palette.theme, ThemePreference::Dark);
    }

    #[test]
    fn mouse_drag_on_ring_sets_time() {
        let mut palette = Palette::default();
        let mut app = app(&mut palette);
        let layout = ScreenLayout {
            ring: Rect::new(0, 0, 41, 20),
            playlist: Rect::new(0, 20, 40, 5),
        };
        // Ring center (20.5, 10), radius min(20.5, 20) - 1 = 19 columns;
        // the bottom of the ring sits 9.5 rows below the center.
        handle_mouse(&mut app, &layout, 2.0, mouse(MouseEventKind::Down(MouseButton::Left), 20, 19));
        assert!(app.is_dragging());
        assert_eq!(app.timer().remaining_secs(), 750);

        handle_mouse(&mut app, &layout, 2.0, mouse(MouseEventKind::Up(MouseButton::Left), 20, 19));
        assert!(!app.is_dragging());
    }

    #[test]
    fn click_on_playlist_selects_track() {
        let mut palette = Palette::default();
        let mut app = app(&mut palette);
        let layout = ScreenLayout {
            ring: Rect::new(0, 0, 41, 20),
            playlist: Rect::new(0, 20, 40, 5),
        };
        handle_mouse(&mut app, &layout, 2.0, mouse(MouseEventKind::Down(MouseButton::Left), 5, 22));
        assert_eq!(app.player().playlist().current_index(), 1);
        assert!(app.player().is_playing());
    }
}
