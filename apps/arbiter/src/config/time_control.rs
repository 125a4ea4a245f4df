use std::env;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_INITIAL_TIME: u64 = 600;
const DEFAULT_TICK_MILLIS: u64 = 1_000;

/// Clock configuration for the live session: how much time each side
/// starts with (in time units) and how long one tick takes. Production
/// runs one-second ticks, so units are seconds; tests shrink the tick
/// to drive expiry quickly.
#[derive(Debug, Clone, Copy)]
pub struct TimeControl {
    pub initial: u64,
    pub tick: Duration,
}

impl TimeControl {
    pub fn new(initial: u64, tick: Duration) -> Self {
        Self { initial, tick }
    }

    /// Read the time control from the environment:
    /// `ARBITER_INITIAL_TIME` (units per side, default 600) and
    /// `ARBITER_TICK_MILLIS` (tick period, default 1000).
    pub fn from_env() -> Result<Self, AppError> {
        let initial = optional_var("ARBITER_INITIAL_TIME", DEFAULT_INITIAL_TIME)?;
        if initial == 0 {
            return Err(AppError::config(
                "ARBITER_INITIAL_TIME must be at least 1".to_string(),
            ));
        }
        let tick_millis = optional_var("ARBITER_TICK_MILLIS", DEFAULT_TICK_MILLIS)?;
        if tick_millis == 0 {
            return Err(AppError::config(
                "ARBITER_TICK_MILLIS must be at least 1".to_string(),
            ));
        }
        Ok(Self::new(initial, Duration::from_millis(tick_millis)))
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_TIME, Duration::from_millis(DEFAULT_TICK_MILLIS))
    }
}

fn optional_var(name: &str, default: u64) -> Result<u64, AppError> {
    match env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|_| AppError::config(format!("{name} must be a number, got '{raw}'"))),
    }
}
