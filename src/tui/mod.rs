mod app;
mod help_text;
pub mod scheduler;
pub mod theme;
mod ui;

pub use app::{App, AppMode, Focus};

use color_eyre::Result;
use crossterm::event::{self, Event};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};

/// Run the TUI application.
///
/// Draws, then waits up to 100ms for input. Between inputs the watcher is
/// drained and due timers fire, so debounced rebuilds and highlight
/// removal happen without a key press.
pub fn run(terminal: &mut DefaultTerminal, app: App) -> Result<()> {
    let mut app = app;

    loop {
        terminal.draw(|frame| ui::render(frame, &mut app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }

        app.poll_watcher();
        app.run_due(Instant::now());
    }
}
