//! Shared timestamp helpers for deterministic report envelopes.

use std::time::{SystemTime, UNIX_EPOCH};

const SECONDS_PER_DAY: f64 = 24.0 * 60.0 * 60.0;

/// Returns unix-epoch seconds with `Z` suffix (e.g. `1771220592Z`).
pub fn now_epoch_z() -> String {
    epoch_z(SystemTime::now())
}

/// Epoch-seconds rendering of an arbitrary timestamp.
pub fn epoch_z(t: SystemTime) -> String {
    let secs = t.duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
    format!("{}Z", secs)
}

/// Fractional age in days of `then` as seen from `now`. A timestamp in the
/// future reads as age zero.
pub fn age_days(now: SystemTime, then: SystemTime) -> f64 {
    match now.duration_since(then) {
        Ok(elapsed) => elapsed.as_secs_f64() / SECONDS_PER_DAY,
        Err(_) => 0.0,
    }
}
