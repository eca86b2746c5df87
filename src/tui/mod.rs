pub mod event;
pub mod palette;
pub mod screens;
pub mod widgets;

use std::io::{self, Stdout};
use std::sync::Once;

use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::Terminal;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

static PANIC_HOOK: Once = Once::new();

/// The terminal in raw mode, on the alternate screen, with mouse reports on
/// (the ring is dragged with the mouse). Dropping the session puts the
/// terminal back, so an early `?` return never strands the shell in raw mode.
pub struct Session {
    terminal: Tui,
    active: bool,
}

impl Session {
    pub fn enter() -> io::Result<Self> {
        // A panic in the draw loop must still hand back a usable shell
        PANIC_HOOK.call_once(|| {
            let original_hook = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                let _ = restore();
                original_hook(info);
            }));
        });

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
            let _ = restore();
            return Err(e);
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal, active: true })
    }

    pub fn terminal(&mut self) -> &mut Tui {
        &mut self.terminal
    }

    /// Leave the session, reporting a failed restore instead of ignoring it.
    pub fn leave(mut self) -> io::Result<()> {
        self.active = false;
        restore()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.active {
            if let Err(e) = restore() {
                log::warn!("Failed to restore terminal: {e}");
            }
        }
    }
}

fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
    Ok(())
}
