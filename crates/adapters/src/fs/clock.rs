use std::time::{SystemTime, UNIX_EPOCH};

use filter_studio_application::Clock;

/// Stamps gallery entries with milliseconds since the Unix epoch.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_timestamp_string(&self) -> String {
        epoch_millis(SystemTime::now()).to_string()
    }
}

fn epoch_millis(at: SystemTime) -> u128 {
    at.duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
}
