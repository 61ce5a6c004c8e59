use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;

/// Terminal events
#[derive(Debug, Clone)]
pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Quit,
}

/// Event handler for the TUI
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut reader = event::EventStream::new();
            let mut tick_interval = tokio::time::interval(Duration::from_millis(100));

            loop {
                let tick_delay = tick_interval.tick();
                let event_delay = reader.next().fuse();

                tokio::select! {
                    _ = tick_delay => {
                        if tx.send(AppEvent::Tick).is_err() {
                            break;
                        }
                    }
                    maybe_event = event_delay => {
                        match maybe_event {
                            Some(Ok(CrosstermEvent::Key(key))) => {
                                if key.kind == event::KeyEventKind::Press
                                    && tx.send(AppEvent::Key(key)).is_err()
                                {
                                    break;
                                }
                            }
                            Some(Err(_)) | None => {
                                let _ = tx.send(AppEvent::Quit);
                                break;
                            }
                            _ => {}
                        }
                    }
                }
            }
        });

        Self { rx }
    }

    /// Get the next event
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}
