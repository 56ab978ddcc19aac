use std::time::Duration;

/// How long the UI loop waits for a key before redrawing
pub const POLL_INTERVAL_MS: u64 = 250;

pub fn poll_interval() -> Duration {
    Duration::from_millis(POLL_INTERVAL_MS)
}
