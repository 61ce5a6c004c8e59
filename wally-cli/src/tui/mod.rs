use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use tokio::sync::mpsc;

mod app;
mod event;
mod theme;
mod ui;

pub use app::App;

use crate::clipboard::ClipboardWriter;
use crate::controller::ControllerEvent;

/// Run the TUI application
pub async fn run_tui<C: ClipboardWriter>(
    mut app: App<C>,
    controller_rx: mpsc::UnboundedReceiver<ControllerEvent>,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, controller_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_app<B: Backend, C: ClipboardWriter>(
    terminal: &mut Terminal<B>,
    app: &mut App<C>,
    mut controller_rx: mpsc::UnboundedReceiver<ControllerEvent>,
) -> Result<()> {
    let mut event_handler = event::EventHandler::new();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        tokio::select! {
            Some(event) = event_handler.next() => {
                if !app.handle_event(event) {
                    break;
                }
            }
            Some(event) = controller_rx.recv() => app.handle_controller_event(event),
            else => break,
        }
    }

    Ok(())
}
