use std::sync::mpsc;
use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyEvent, MouseEvent};

/// Events consumed by the TUI main loop.
pub enum AppEvent {
    /// A keyboard event.
    Key(KeyEvent),
    /// Mouse press, drag or release.
    Mouse(MouseEvent),
    /// Terminal was resized.
    #[allow(dead_code)]
    Resize(u16, u16),
    /// Periodic tick for driving the clock and render updates.
    Tick,
}

/// Polls crossterm events and sends them to the main render loop.
///
/// Runs in a background thread. Sends Key, Mouse and Resize events as they
/// arrive, plus a Tick whenever `tick_rate` passes without input.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    _handle: std::thread::JoinHandle<()>,
}

impl EventHandler {
    /// Start the event polling thread.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        let handle = std::thread::spawn(move || loop {
            let app_event = if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    Ok(Event::Key(key)) => AppEvent::Key(key),
                    Ok(Event::Mouse(mouse)) => AppEvent::Mouse(mouse),
                    Ok(Event::Resize(w, h)) => AppEvent::Resize(w, h),
                    _ => continue,
                }
            } else {
                // No event within tick_rate, tick to drive the clock
                AppEvent::Tick
            };
            if tx.send(app_event).is_err() {
                return;
            }
        });

        Self {
            rx,
            _handle: handle,
        }
    }

    /// Receive the next event, blocking until one is available.
    pub fn next(&self) -> Result<AppEvent, mpsc::RecvError> {
        self.rx.recv()
    }
}
