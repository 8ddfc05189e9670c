use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Countdown boundary crossings produce Events.
/// The host ticks the engine and reacts; the engine itself performs no I/O.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A period end was crossed with sound enabled; the host should ring.
    BellDue {
        /// The boundary instant that was crossed.
        scheduled_for: NaiveDateTime,
        at: NaiveDateTime,
    },
    /// A new countdown target was armed.
    TargetArmed {
        target: NaiveDateTime,
        at: NaiveDateTime,
    },
}
