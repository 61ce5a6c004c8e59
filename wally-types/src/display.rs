//! Display contract shared by the browser page and the terminal client.
//!
//! A loaded wallet shows its address and private key as copyable read-only
//! values, a QR code of the address and an optional block-explorer link. The
//! seed phrase is always kept in memory but only rendered when the user asks
//! for it. Without a loaded wallet the informational view is shown instead.

use crate::WalletField;

pub const APP_NAME: &str = "wally.";
pub const TAGLINE: &str = "Bitcoin Wallet Generator";

pub const PURPOSE: &str = "Generate a fresh Bitcoin wallet (address, private key and seed phrase) \
with a single click, then copy each value or scan the address as a QR code.";

pub const PRIVACY_STATEMENT: &str = "All generation happens against the configured service; \
nothing is persisted locally.";

pub const FAILURE_NOTICE: &str = "Wallet generation failed. Please try again.";

/// Caption rendered below the address QR code
pub const QR_CAPTION: &str = "BTC Address QR Code";

/// Default project source link
pub const DEFAULT_SOURCE_URL: &str = "https://github.com/wally-wallet/wally";

/// Default block explorer address prefix
pub const DEFAULT_EXPLORER_URL: &str = "https://mempool.space/address/";

/// How long a toast notification stays visible, in milliseconds
pub const TOAST_DURATION_MS: u64 = 3_000;

/// Fields rendered for a loaded wallet
pub fn visible_fields(show_seed_phrase: bool) -> Vec<WalletField> {
    WalletField::ALL
        .into_iter()
        .filter(|field| show_seed_phrase || *field != WalletField::SeedPhrase)
        .collect()
}

/// Block explorer link for an address, `None` when no explorer is configured
pub fn explorer_link(explorer_url: &str, address: &str) -> Option<String> {
    let base = explorer_url.trim();
    if base.is_empty() || address.is_empty() {
        return None;
    }
    if base.ends_with('/') || base.ends_with('=') {
        Some(format!("{}{}", base, address))
    } else {
        Some(format!("{}/{}", base, address))
    }
}
