//! Countdown engine: the bell trigger state machine.
//!
//! The engine is wall-clock driven and has no internal thread or timer --
//! the host calls [`CountdownEngine::tick`] on its polling cadence (~250 ms)
//! with an explicit `now`. Ticks are therefore strictly serialized and the
//! cached target is only ever re-armed inside a tick.
//!
//! ## State transitions
//!
//! ```text
//! Idle(no target, empty schedule)
//! Armed(target) -> [tick with now >= target, sound on] -> emit BellDue -> Armed(later target)
//! ```
//!
//! Firing re-arms immediately with a one-second epsilon past `now`, so the
//! next target is strictly later than the boundary that just fired and the
//! same crossing cannot emit twice. No per-boundary "already fired" flag is
//! needed.

use chrono::{Duration, NaiveDateTime};
use log::debug;
use serde::Serialize;

use crate::events::Event;
use crate::schedule::{minute_of_day, minutes_to_time_12h, Schedule, TimeRemaining};

/// Guarantees strict forward progress when re-arming after a fire.
const REARM_EPSILON_SECS: i64 = 1;

/// Caller-driven countdown over a normalized schedule.
#[derive(Debug, Clone)]
pub struct CountdownEngine {
    schedule: Schedule,
    /// Next bell instant. `None` only when the schedule is empty.
    target: Option<NaiveDateTime>,
    sound_enabled: bool,
}

/// Read-only projection of the countdown for display.
#[derive(Debug, Clone, Serialize)]
pub struct CountdownSnapshot {
    /// Name of the period containing `at`, if any.
    pub current_period: Option<String>,
    pub sound_enabled: bool,
    pub target: Option<NaiveDateTime>,
    /// 12-hour label for the target, e.g. `10:45 AM`.
    pub target_label: Option<String>,
    pub remaining: Option<TimeRemaining>,
    pub at: NaiveDateTime,
}

impl CountdownEngine {
    /// Create an engine over `schedule` (normalized here) and arm the first
    /// target relative to `now`.
    pub fn new(schedule: Schedule, now: NaiveDateTime) -> Self {
        let schedule = schedule.normalize();
        let target = schedule.next_bell(now);
        Self {
            schedule,
            target,
            sound_enabled: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn target(&self) -> Option<NaiveDateTime> {
        self.target
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    /// Build a display snapshot for the given instant.
    pub fn snapshot(&self, now: NaiveDateTime) -> CountdownSnapshot {
        CountdownSnapshot {
            current_period: self
                .schedule
                .current_period(minute_of_day(now))
                .map(|p| p.name.clone()),
            sound_enabled: self.sound_enabled,
            target: self.target,
            target_label: self
                .target
                .map(|t| minutes_to_time_12h(minute_of_day(t) as i64)),
            remaining: self.target.map(|t| TimeRemaining::between(now, t)),
            at: now,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }

    /// Replace the schedule (normalizing it) and re-arm relative to `now`.
    pub fn set_schedule(&mut self, schedule: Schedule, now: NaiveDateTime) -> Option<Event> {
        self.schedule = schedule.normalize();
        self.arm(now);
        self.target.map(|target| Event::TargetArmed { target, at: now })
    }

    /// Advance the countdown to `now`.
    ///
    /// When the cached target has been crossed the engine re-arms first and
    /// then reports the crossing, so a failing side effect in the host can
    /// never corrupt re-arming. A crossing with sound disabled advances
    /// silently; a stale boundary never rings late after sound is re-enabled.
    pub fn tick(&mut self, now: NaiveDateTime) -> Option<Event> {
        let target = self.target?;
        if now < target {
            return None;
        }
        self.arm(now + Duration::seconds(REARM_EPSILON_SECS));
        if self.sound_enabled {
            Some(Event::BellDue {
                scheduled_for: target,
                at: now,
            })
        } else {
            None
        }
    }

    fn arm(&mut self, from: NaiveDateTime) {
        self.target = self.schedule.next_bell(from);
        if let Some(target) = self.target {
            debug!("armed next bell at {target}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Period;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 9)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn school_day() -> Schedule {
        Schedule::new(vec![
            Period::new("Period 1", "08:00", "08:45"),
            Period::new("Break", "10:30", "10:45"),
        ])
    }

    #[test]
    fn empty_schedule_is_idle() {
        let mut engine = CountdownEngine::new(Schedule::default(), at(8, 0, 0));
        engine.set_sound_enabled(true);
        assert!(engine.target().is_none());
        assert!(engine.tick(at(12, 0, 0)).is_none());
    }

    #[test]
    fn fires_exactly_once_per_crossing() {
        let mut engine = CountdownEngine::new(school_day(), at(8, 0, 0));
        engine.set_sound_enabled(true);
        assert_eq!(engine.target(), Some(at(8, 45, 0)));

        // Not yet due.
        assert!(engine.tick(at(8, 44, 59)).is_none());

        let fired = engine.tick(at(8, 45, 0));
        assert_eq!(
            fired,
            Some(Event::BellDue {
                scheduled_for: at(8, 45, 0),
                at: at(8, 45, 0),
            })
        );
        // Re-armed strictly past the boundary that fired.
        assert_eq!(engine.target(), Some(at(10, 45, 0)));

        // The same crossing cannot fire again on the next ticks.
        assert!(engine.tick(at(8, 45, 0)).is_none());
        assert!(engine.tick(at(8, 45, 1)).is_none());
    }

    #[test]
    fn late_tick_still_fires_once() {
        let mut engine = CountdownEngine::new(school_day(), at(8, 0, 0));
        engine.set_sound_enabled(true);
        // Host was stalled well past the boundary.
        let fired = engine.tick(at(9, 30, 0));
        assert!(matches!(fired, Some(Event::BellDue { scheduled_for, .. }) if scheduled_for == at(8, 45, 0)));
        assert_eq!(engine.target(), Some(at(10, 45, 0)));
    }

    #[test]
    fn disabled_sound_never_fires_and_does_not_ring_late() {
        let mut engine = CountdownEngine::new(school_day(), at(8, 0, 0));
        assert!(engine.tick(at(8, 45, 0)).is_none());
        // The stale boundary was skipped, not queued.
        engine.set_sound_enabled(true);
        assert!(engine.tick(at(8, 45, 1)).is_none());
        assert_eq!(engine.target(), Some(at(10, 45, 0)));
    }

    #[test]
    fn last_bell_re_arms_across_midnight() {
        let mut engine = CountdownEngine::new(school_day(), at(10, 44, 0));
        engine.set_sound_enabled(true);
        assert!(engine.tick(at(10, 45, 0)).is_some());
        let target = engine.target().unwrap();
        assert_eq!(target.date(), at(0, 0, 0).date().succ_opt().unwrap());
        assert_eq!(minute_of_day(target), 8 * 60 + 45);
    }

    #[test]
    fn set_schedule_re_arms() {
        let mut engine = CountdownEngine::new(school_day(), at(8, 0, 0));
        let event = engine.set_schedule(
            Schedule::new(vec![Period::new("Assembly", "09:00", "09:30")]),
            at(8, 0, 0),
        );
        assert_eq!(
            event,
            Some(Event::TargetArmed {
                target: at(9, 30, 0),
                at: at(8, 0, 0),
            })
        );
        assert_eq!(engine.target(), Some(at(9, 30, 0)));
    }

    #[test]
    fn polling_loop_rings_exactly_once_per_crossing() {
        use crate::audio::Bell;
        use crate::error::AudioError;
        use std::sync::atomic::{AtomicUsize, Ordering};

        struct RecordingBell {
            rings: AtomicUsize,
        }

        impl Bell for RecordingBell {
            fn ring(&self) -> Result<(), AudioError> {
                self.rings.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }

        let bell = RecordingBell { rings: AtomicUsize::new(0) };
        let mut engine = CountdownEngine::new(school_day(), at(8, 44, 58));
        engine.set_sound_enabled(true);

        // Simulated 250 ms polling cadence across both bells of the day.
        let mut now = at(8, 44, 58);
        let end = at(10, 46, 0);
        while now <= end {
            if let Some(Event::BellDue { .. }) = engine.tick(now) {
                (&bell as &dyn Bell).ring().unwrap();
            }
            now += Duration::milliseconds(250);
        }

        assert_eq!(bell.rings.load(Ordering::SeqCst), 2);
        // Already re-armed past the last boundary that rang.
        assert!(engine.target().unwrap() > end);
    }

    #[test]
    fn snapshot_projects_current_period_and_remaining() {
        let mut engine = CountdownEngine::new(school_day(), at(10, 40, 0));
        engine.set_sound_enabled(true);
        let snap = engine.snapshot(at(10, 40, 0));
        assert_eq!(snap.current_period.as_deref(), Some("Break"));
        assert_eq!(snap.target, Some(at(10, 45, 0)));
        assert_eq!(snap.target_label.as_deref(), Some("10:45 AM"));
        let remaining = snap.remaining.unwrap();
        assert_eq!((remaining.minutes, remaining.seconds), (5, 0));
    }
}
