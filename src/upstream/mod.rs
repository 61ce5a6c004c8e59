pub mod cache_buster;
pub mod client;

pub use cache_buster::CacheBuster;
pub use client::{UpstreamClient, WALLET_GEN_PATH};
