use std::fmt::Display;
use std::thread;
use std::time::Duration;

use log::warn;

/// Runs `op` up to `attempts` times (at least once), sleeping `backoff`
/// between failures. `op` receives the 1-based attempt number. The error of
/// the final attempt is returned when all of them fail.
pub fn with_fixed_backoff<T, E: Display>(
    attempts: u32,
    backoff: Duration,
    mut op: impl FnMut(u32) -> Result<T, E>,
) -> Result<T, E> {
    let mut attempt = 1;
    loop {
        match op(attempt) {
            Ok(value) => return Ok(value),
            Err(err) if attempt < attempts => {
                warn!(
                    "Attempt {attempt}/{attempts} failed: {err}; retrying in {}s",
                    backoff.as_secs()
                );
                thread::sleep(backoff);
                attempt += 1;
            }
            Err(err) => {
                warn!("Final attempt {attempt}/{attempts} failed: {err}");
                return Err(err);
            }
        }
    }
}
