use std::sync::atomic::{AtomicU64, Ordering};

/// Source of cache-busting query tokens.
///
/// Tokens are the wall-clock time in milliseconds since the Unix epoch. When
/// the clock has not moved past the last issued token (two calls inside one
/// millisecond, or the clock stepping backwards) the previous token plus one
/// is issued instead, so consecutive tokens always differ.
#[derive(Debug, Default)]
pub struct CacheBuster {
    last: AtomicU64,
}

impl CacheBuster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next token from the current wall clock
    pub fn next(&self) -> u64 {
        let now = chrono::Utc::now().timestamp_millis().max(0) as u64;
        self.next_at(now)
    }

    /// Next token given a clock reading in milliseconds
    pub fn next_at(&self, now_ms: u64) -> u64 {
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let token = now_ms.max(prev.saturating_add(1));
            match self
                .last
                .compare_exchange_weak(prev, token, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return token,
                Err(actual) => prev = actual,
            }
        }
    }

    /// Last token handed out, zero before the first call
    pub fn last(&self) -> u64 {
        self.last.load(Ordering::Acquire)
    }
}
