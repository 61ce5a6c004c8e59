//! Wallet request controller.
//!
//! Owns every piece of client state: request status, the loaded wallet, the
//! request counter and the toast. Fetches and toast timers run as spawned
//! tasks and report back as [`ControllerEvent`]s; state only changes inside
//! methods on the controller, called from the task that owns it.
//!
//! Each fetch is tagged with the counter value it was issued under. Only the
//! latest outstanding request may update the state, so a slow response can
//! never overwrite a newer one, and nothing lands after `clear_wallet`.

use crate::api::{FetchError, WalletSource};
use crate::clipboard::ClipboardWriter;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use wally_types::display::TOAST_DURATION_MS;
use wally_types::{WalletField, WalletRecord};
use zeroize::Zeroize;

pub const TOAST_DURATION: Duration = Duration::from_millis(TOAST_DURATION_MS);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Success,
    Failure,
}

/// Client-visible request state
#[derive(Debug, Default)]
pub struct RequestState {
    status: Status,
    request_counter: u64,
    in_flight: Option<u64>,
    wallet: Option<WalletRecord>,
    toast: Option<Toast>,
    show_seed_phrase: bool,
}

impl RequestState {
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }

    pub fn request_counter(&self) -> u64 {
        self.request_counter
    }

    /// The loaded wallet; `Some` exactly when the status is `Loaded`
    pub fn wallet(&self) -> Option<&WalletRecord> {
        self.wallet.as_ref()
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn show_seed_phrase(&self) -> bool {
        self.show_seed_phrase
    }
}

#[cfg(test)]
impl RequestState {
    pub(crate) fn with_wallet(wallet: WalletRecord, show_seed_phrase: bool) -> Self {
        Self {
            status: Status::Loaded,
            wallet: Some(wallet),
            show_seed_phrase,
            ..Self::default()
        }
    }
}

/// Results delivered back to the controller from spawned tasks
#[derive(Debug)]
pub enum ControllerEvent {
    WalletResolved {
        request_id: u64,
        result: Result<WalletRecord, FetchError>,
    },
    ToastExpired {
        toast_id: u64,
    },
}

pub struct WalletController<C> {
    source: Arc<dyn WalletSource>,
    clipboard: C,
    tx: mpsc::UnboundedSender<ControllerEvent>,
    state: RequestState,
    toast_seq: u64,
    toast_duration: Duration,
}

impl<C: ClipboardWriter> WalletController<C> {
    /// Create a controller and the receiver its events arrive on.
    ///
    /// The owner must feed every received event back into
    /// [`handle_event`](Self::handle_event).
    pub fn new(
        source: Arc<dyn WalletSource>,
        clipboard: C,
    ) -> (Self, mpsc::UnboundedReceiver<ControllerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = Self {
            source,
            clipboard,
            tx,
            state: RequestState::default(),
            toast_seq: 0,
            toast_duration: TOAST_DURATION,
        };
        (controller, rx)
    }

    pub fn with_seed_phrase_visible(mut self, visible: bool) -> Self {
        self.state.show_seed_phrase = visible;
        self
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Start a generation request and return its id.
    ///
    /// The previous wallet is discarded immediately. The id doubles as the
    /// cache-busting token sent to the server.
    pub fn generate_wallet(&mut self) -> u64 {
        self.state.request_counter += 1;
        let request_id = self.state.request_counter;
        self.state.in_flight = Some(request_id);
        self.state.status = Status::Loading;
        self.state.wallet = None;

        debug!("Requesting wallet (request {})", request_id);
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = source.fetch_wallet(request_id).await;
            let _ = tx.send(ControllerEvent::WalletResolved { request_id, result });
        });

        request_id
    }

    /// Return to the informational view, dropping the wallet and abandoning
    /// any request still in flight
    pub fn clear_wallet(&mut self) {
        self.state.in_flight = None;
        self.state.wallet = None;
        self.state.status = Status::Idle;
    }

    pub fn toggle_seed_phrase(&mut self) {
        self.state.show_seed_phrase = !self.state.show_seed_phrase;
    }

    /// Copy arbitrary text, reporting the outcome through a toast
    pub fn copy(&mut self, text: &str) -> CopyOutcome {
        match self.clipboard.copy(text) {
            Ok(mechanism) => {
                debug!("Copied to clipboard via {}", mechanism);
                self.show_toast("Copied to clipboard", ToastKind::Success);
                CopyOutcome::Success
            }
            Err(e) => {
                warn!("Clipboard write failed: {}", e);
                self.show_toast(format!("Copy failed: {}", e), ToastKind::Error);
                CopyOutcome::Failure
            }
        }
    }

    /// Copy one field of the loaded wallet
    pub fn copy_field(&mut self, field: WalletField) -> CopyOutcome {
        let Some(mut text) = self.state.wallet.as_ref().map(|w| w.field(field).to_string()) else {
            self.show_toast("No wallet to copy from. Generate one first", ToastKind::Error);
            return CopyOutcome::Failure;
        };
        let outcome = self.copy(&text);
        text.zeroize();
        outcome
    }

    /// Apply the result of a spawned task
    pub fn handle_event(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::WalletResolved { request_id, result } => {
                if self.state.in_flight != Some(request_id) {
                    debug!(
                        "Discarding stale wallet response (request {}, latest {})",
                        request_id, self.state.request_counter
                    );
                    return;
                }
                self.state.in_flight = None;
                match result {
                    Ok(wallet) => {
                        info!("Wallet loaded (request {})", request_id);
                        self.state.wallet = Some(wallet);
                        self.state.status = Status::Loaded;
                    }
                    Err(e) => {
                        error!("Failed to fetch wallet data: {}", e);
                        self.state.wallet = None;
                        self.state.status = Status::Failed;
                    }
                }
            }
            ControllerEvent::ToastExpired { toast_id } => {
                if self.state.toast.as_ref().map(|t| t.id) == Some(toast_id) {
                    self.state.toast = None;
                }
            }
        }
    }

    /// Replace the visible toast and arm its expiry timer. An older timer
    /// firing later carries a stale id and is ignored.
    fn show_toast(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.toast_seq += 1;
        let toast_id = self.toast_seq;
        self.state.toast = Some(Toast {
            id: toast_id,
            message: message.into(),
            kind,
        });

        let tx = self.tx.clone();
        let deadline = tokio::time::Instant::now() + self.toast_duration;
        tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let _ = tx.send(ControllerEvent::ToastExpired { toast_id });
        });
    }
}
