use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use wally_types::WalletField;

use crate::clipboard::ClipboardWriter;
use crate::controller::{ControllerEvent, WalletController};
use crate::tui::event::AppEvent;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Main application state
pub struct App<C> {
    pub controller: WalletController<C>,
    pub explorer_url: String,
    pub source_url: String,
    pub should_quit: bool,
    spinner_frame: usize,
}

impl<C: ClipboardWriter> App<C> {
    pub fn new(controller: WalletController<C>, explorer_url: String, source_url: String) -> Self {
        Self {
            controller,
            explorer_url,
            source_url,
            should_quit: false,
            spinner_frame: 0,
        }
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }

    /// Handle terminal events, returns false once the app should exit
    pub fn handle_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::Quit => {
                self.should_quit = true;
            }
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Tick => {
                if self.controller.state().is_loading() {
                    self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
                }
            }
        }
        !self.should_quit
    }

    pub fn handle_controller_event(&mut self, event: ControllerEvent) {
        self.controller.handle_event(event);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Ctrl-C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('g') | KeyCode::Enter => {
                self.controller.generate_wallet();
            }
            KeyCode::Char('l') => self.controller.clear_wallet(),
            KeyCode::Char('t') => self.controller.toggle_seed_phrase(),
            KeyCode::Char('a') => {
                self.controller.copy_field(WalletField::BtcAddress);
            }
            KeyCode::Char('k') => {
                self.controller.copy_field(WalletField::PrivateKey);
            }
            KeyCode::Char('s') => {
                self.controller.copy_field(WalletField::SeedPhrase);
            }
            _ => {}
        }
    }
}
