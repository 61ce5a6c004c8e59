//! Types shared by the wally proxy server and the terminal client.
//!
//! The wallet payload is produced by the upstream generation service and is
//! treated as three opaque strings. Nothing in this crate validates, parses or
//! checksums them.

pub mod display;

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroize;

/// A generated wallet as returned by the upstream service.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletRecord {
    pub btc_address: String,
    pub private_key: String,
    pub seed_phrase: String,
}

impl WalletRecord {
    pub fn new(
        btc_address: impl Into<String>,
        private_key: impl Into<String>,
        seed_phrase: impl Into<String>,
    ) -> Self {
        Self {
            btc_address: btc_address.into(),
            private_key: private_key.into(),
            seed_phrase: seed_phrase.into(),
        }
    }

    /// Value of a single field
    pub fn field(&self, field: WalletField) -> &str {
        match field {
            WalletField::BtcAddress => &self.btc_address,
            WalletField::PrivateKey => &self.private_key,
            WalletField::SeedPhrase => &self.seed_phrase,
        }
    }
}

// Secrets never reach log output.
impl fmt::Debug for WalletRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletRecord")
            .field("btc_address", &self.btc_address)
            .field("private_key", &"<redacted>")
            .field("seed_phrase", &"<redacted>")
            .finish()
    }
}

impl Drop for WalletRecord {
    fn drop(&mut self) {
        self.private_key.zeroize();
        self.seed_phrase.zeroize();
    }
}

/// Addressable fields of a [`WalletRecord`], in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalletField {
    BtcAddress,
    PrivateKey,
    SeedPhrase,
}

impl WalletField {
    pub const ALL: [WalletField; 3] = [Self::BtcAddress, Self::PrivateKey, Self::SeedPhrase];

    /// JSON key used on the wire
    pub fn key(&self) -> &'static str {
        match self {
            Self::BtcAddress => "btcAddress",
            Self::PrivateKey => "privateKey",
            Self::SeedPhrase => "seedPhrase",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::BtcAddress => "BTC Address",
            Self::PrivateKey => "Private Key",
            Self::SeedPhrase => "Seed Phrase",
        }
    }
}

impl fmt::Display for WalletField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for WalletField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "btcAddress" | "address" | "btc-address" => Ok(Self::BtcAddress),
            "privateKey" | "private-key" | "key" => Ok(Self::PrivateKey),
            "seedPhrase" | "seed-phrase" | "seed" => Ok(Self::SeedPhrase),
            other => Err(format!("unknown wallet field: {}", other)),
        }
    }
}

/// Structured error body returned by the proxy for any non-2xx response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: u16,
}
