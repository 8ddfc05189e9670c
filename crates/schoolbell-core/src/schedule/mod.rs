//! Schedule model: named periods and pure time arithmetic.
//!
//! All arithmetic runs on minutes-since-midnight in `[0, 1440)`; the external
//! representation of a time-of-day is a zero-padded `HH:MM` 24-hour string.
//! Every function here is pure -- instants come in as parameters and no
//! function reads the clock or touches storage.
//!
//! Parsing is deliberately lenient: a malformed time string degrades to
//! minute 0 and an invalid period is filtered out by [`Schedule::normalize`]
//! rather than reported. Resilience over strictness.

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minutes in a 24-hour day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A named interval of the school day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub id: String,
    pub name: String,
    /// Start of the period, `HH:MM` 24-hour.
    pub start: String,
    /// End of the period, `HH:MM` 24-hour. The bell rings at this instant.
    pub end: String,
}

impl Period {
    /// Create a period with a fresh unique id.
    pub fn new(name: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            start: start.into(),
            end: end.into(),
        }
    }

    /// A period is valid when both times are well-formed and the name is
    /// non-blank after trimming. `end > start` is NOT required here; the
    /// editor may warn, normalization does not reject.
    pub fn is_valid(&self) -> bool {
        is_valid_time(&self.start) && is_valid_time(&self.end) && !self.name.trim().is_empty()
    }

    pub fn start_minutes(&self) -> u32 {
        time_to_minutes(&self.start)
    }

    pub fn end_minutes(&self) -> u32 {
        time_to_minutes(&self.end)
    }

    /// Signed duration in minutes. A period with `end <= start` yields a
    /// zero or negative duration and is never current -- a known quirk of
    /// the permissive data model, kept rather than "fixed".
    pub fn duration_min(&self) -> i64 {
        self.end_minutes() as i64 - self.start_minutes() as i64
    }

    /// Half-open containment test: `start <= now < end`.
    pub fn contains(&self, now_minutes: u32) -> bool {
        now_minutes >= self.start_minutes() && now_minutes < self.end_minutes()
    }
}

/// An ordered sequence of periods. Serializes as a bare JSON array.
///
/// Canonical form (produced by [`Schedule::normalize`]) is sorted ascending
/// by start minute and contains only valid periods. Gaps and overlaps are
/// tolerated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    pub periods: Vec<Period>,
}

impl Schedule {
    pub fn new(periods: Vec<Period>) -> Self {
        Self { periods }
    }

    /// The default school day, used when nothing is stored.
    ///
    /// Ids are stable across calls so that a listed default period can be
    /// removed by id before the schedule was ever saved.
    pub fn default_school_day() -> Self {
        fn preset(id: &str, name: &str, start: &str, end: &str) -> Period {
            Period {
                id: id.to_string(),
                name: name.to_string(),
                start: start.to_string(),
                end: end.to_string(),
            }
        }
        Self {
            periods: vec![
                preset("p1", "Period 1", "08:00", "08:45"),
                preset("p2", "Period 2", "08:50", "09:35"),
                preset("p3", "Period 3", "09:45", "10:30"),
                preset("brk", "Break", "10:30", "10:45"),
                preset("p4", "Period 4", "10:45", "11:30"),
                preset("p5", "Period 5", "11:35", "12:20"),
            ],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Filter out invalid periods, then sort ascending by start minute.
    ///
    /// Never mutates the input; idempotent. Insertion order is discarded
    /// (the sort is stable, so equal start times keep their relative order).
    pub fn normalize(&self) -> Schedule {
        let mut periods: Vec<Period> = self
            .periods
            .iter()
            .filter(|p| p.is_valid())
            .cloned()
            .collect();
        periods.sort_by_key(|p| p.start_minutes());
        Schedule { periods }
    }

    /// First period (in order) whose `[start, end)` interval contains
    /// `now_minutes`. `None` in a gap, before the first or after the last.
    pub fn current_period(&self, now_minutes: u32) -> Option<&Period> {
        self.periods.iter().find(|p| p.contains(now_minutes))
    }

    /// Project the next bell (period end) strictly after `now`.
    ///
    /// Takes the minimum end minute greater than now's minute-of-day on
    /// today's date; if every end has passed, the minimum end overall on the
    /// following date. `None` iff the schedule is empty. The result is always
    /// strictly after `now`.
    pub fn next_bell(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        if self.periods.is_empty() {
            return None;
        }
        let midnight = now.date().and_time(NaiveTime::MIN);
        let now_min = minute_of_day(now);

        if let Some(m) = self
            .periods
            .iter()
            .map(|p| p.end_minutes())
            .filter(|&m| m > now_min)
            .min()
        {
            return midnight.checked_add_signed(Duration::minutes(m as i64));
        }

        // No more bells today; first end time tomorrow.
        let first = self.periods.iter().map(|p| p.end_minutes()).min()?;
        midnight.checked_add_signed(Duration::days(1) + Duration::minutes(first as i64))
    }
}

/// Parse an `HH:MM` string into minutes since midnight.
///
/// Lenient by design: any malformed input (missing colon, non-numeric
/// component) degrades to 0 instead of failing. Oversized numeric components
/// saturate rather than overflow; trailing components (`"08:45:00"`) are
/// ignored.
pub fn time_to_minutes(time: &str) -> u32 {
    let mut parts = time.split(':');
    let hh = parts.next().and_then(|v| v.parse::<u32>().ok());
    let mm = parts.next().and_then(|v| v.parse::<u32>().ok());
    match (hh, mm) {
        (Some(hh), Some(mm)) => hh.saturating_mul(60).saturating_add(mm),
        _ => 0,
    }
}

/// Format minutes since midnight as zero-padded `HH:MM`.
///
/// Out-of-range and negative inputs wrap around the 24-hour clock.
pub fn minutes_to_time(total_minutes: i64) -> String {
    let minutes = total_minutes.rem_euclid(MINUTES_PER_DAY as i64);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Format minutes since midnight as `H:MM AM/PM`, wrapping like
/// [`minutes_to_time`]. Hour 0 renders as 12.
pub fn minutes_to_time_12h(total_minutes: i64) -> String {
    let minutes = total_minutes.rem_euclid(MINUTES_PER_DAY as i64);
    let hours24 = minutes / 60;
    let suffix = if hours24 >= 12 { "PM" } else { "AM" };
    let hours12 = ((hours24 + 11) % 12) + 1;
    format!("{}:{:02} {}", hours12, minutes % 60, suffix)
}

/// True iff the string is exactly two digits, a colon, two digits.
pub fn is_valid_time(value: &str) -> bool {
    let b = value.as_bytes();
    b.len() == 5
        && b[0].is_ascii_digit()
        && b[1].is_ascii_digit()
        && b[2] == b':'
        && b[3].is_ascii_digit()
        && b[4].is_ascii_digit()
}

/// Minute-of-day for an instant (seconds discarded).
pub fn minute_of_day(now: NaiveDateTime) -> u32 {
    now.hour() * 60 + now.minute()
}

/// Remaining time until a target, decomposed for display.
///
/// Computed by integer floor division of the clamped millisecond difference,
/// so a target at or before `now` yields all zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRemaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeRemaining {
    pub fn between(now: NaiveDateTime, target: NaiveDateTime) -> Self {
        let ms = target.signed_duration_since(now).num_milliseconds().max(0);
        let total_seconds = ms / 1000;
        Self {
            days: total_seconds / 86_400,
            hours: (total_seconds % 86_400) / 3_600,
            minutes: (total_seconds % 3_600) / 60,
            seconds: total_seconds % 60,
        }
    }

    /// Zero-padded `HH:MM:SS`; days fold into the hour count.
    pub fn format_hms(&self) -> String {
        format!(
            "{:02}:{:02}:{:02}",
            self.days * 24 + self.hours,
            self.minutes,
            self.seconds
        )
    }
}
