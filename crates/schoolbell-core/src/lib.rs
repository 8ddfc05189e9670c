//! # Schoolbell Core Library
//!
//! Core logic for Schoolbell, a classroom bell scheduler: users define named
//! time periods, the countdown engine tracks wall-clock time against that
//! list, and a bell rings at each period end. The CLI binary is a thin host
//! over this library.
//!
//! ## Architecture
//!
//! - **Schedule model**: pure time arithmetic over an ordered period list --
//!   current-period lookup, next-bell projection across midnight, and
//!   normalization of raw edits into canonical sorted form
//! - **Countdown engine**: a wall-clock state machine that requires the host
//!   to invoke `tick()` on its polling cadence; fires each boundary exactly
//!   once and immediately re-arms
//! - **Audio**: rodio-backed bell playback on a dedicated thread, with a
//!   synthesized chime fallback
//! - **Storage**: JSON-file key-value persistence for the schedule and the
//!   sound preference
//!
//! ## Key Components
//!
//! - [`Schedule`] / [`Period`]: the schedule model
//! - [`CountdownEngine`]: the bell trigger state machine
//! - [`BellPlayer`]: the audio collaborator
//! - [`Store`]: the persistence collaborator
//! - [`Clock`]: injected wall-clock capability

pub mod audio;
pub mod clock;
pub mod countdown;
pub mod error;
pub mod events;
pub mod schedule;
pub mod storage;

pub use audio::{Bell, BellPlayer};
pub use clock::{Clock, SystemClock};
pub use countdown::{CountdownEngine, CountdownSnapshot};
pub use error::{AudioError, CoreError, StorageError};
pub use events::Event;
pub use schedule::{Period, Schedule, TimeRemaining};
pub use storage::Store;
