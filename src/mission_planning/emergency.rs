//! Timed operator choice for emergency handling
//!
//! The operator gets a bounded window to pick an action. If nothing valid
//! arrives in time the fallback is selected, exactly once.

use std::fmt;
use std::io::BufRead;
use std::str::FromStr;
use std::thread;
use std::time::Duration;

use flume::{Receiver, RecvTimeoutError};
use log::{debug, warn};

use crate::common::MissionError;

/// Action taken after a boundary violation or mission fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmergencyAction {
    /// Land where the drone is
    Land,
    /// Fly back to the home position, then land
    ReturnHome,
}

impl fmt::Display for EmergencyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmergencyAction::Land => f.write_str("land"),
            EmergencyAction::ReturnHome => f.write_str("return home"),
        }
    }
}

impl FromStr for EmergencyAction {
    type Err = MissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "land" => Ok(EmergencyAction::Land),
            "2" | "home" | "return" => Ok(EmergencyAction::ReturnHome),
            other => Err(MissionError::invalid(format!(
                "unknown emergency action '{}'",
                other
            ))),
        }
    }
}

/// Wait up to `timeout` for a choice, otherwise return `fallback`
pub fn await_choice(
    rx: &Receiver<EmergencyAction>,
    timeout: Duration,
    fallback: EmergencyAction,
) -> EmergencyAction {
    match rx.recv_timeout(timeout) {
        Ok(action) => {
            debug!("operator chose: {}", action);
            action
        }
        Err(RecvTimeoutError::Timeout) => {
            warn!("no operator choice within {:?}, defaulting to {}", timeout, fallback);
            fallback
        }
        Err(RecvTimeoutError::Disconnected) => {
            warn!("operator input closed, defaulting to {}", fallback);
            fallback
        }
    }
}

/// Read a single line from `reader` on a background thread
///
/// The returned channel yields at most one action. Unparseable input sends
/// nothing, which leaves the decision to the fallback.
pub fn spawn_choice_reader<R>(mut reader: R) -> Receiver<EmergencyAction>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = flume::bounded(1);

    thread::spawn(move || {
        let mut line = String::new();
        if reader.read_line(&mut line).is_err() {
            return;
        }
        match line.parse::<EmergencyAction>() {
            Ok(action) => {
                // Receiver may already have given up
                let _ = tx.send(action);
            }
            Err(e) => warn!("{}", e),
        }
    });

    rx
}
