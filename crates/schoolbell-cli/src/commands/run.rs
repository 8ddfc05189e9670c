//! The live countdown loop.
//!
//! Samples the system clock on a 250 ms interval, ticks the engine, rings on
//! each boundary crossing and renders a single status line. Stored edits
//! made from another terminal are re-read once a minute. Ctrl-C releases the
//! interval and exits; the engine itself has no teardown state.

use std::io::Write;
use std::time::Duration;

use log::warn;
use schoolbell_core::{
    Bell, BellPlayer, Clock, CountdownEngine, CountdownSnapshot, Event, Schedule, Store,
    SystemClock,
};

const TICK_MILLIS: u64 = 250;
/// Stored edits made by other invocations (`schedule add`, `sound on`) are
/// re-read on this cadence: once a minute.
const RELOAD_EVERY_TICKS: u64 = 60_000 / TICK_MILLIS;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_loop())
}

async fn run_loop() -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let clock = SystemClock;

    let schedule = store.load_schedule(Schedule::default_school_day());
    let mut engine = CountdownEngine::new(schedule, clock.now());
    engine.set_sound_enabled(store.load_sound_enabled());

    let player = BellPlayer::new(store.load_sound_file());
    if engine.sound_enabled() {
        // Best effort: a missing audio device should not stop the countdown.
        if let Err(e) = player.unlock() {
            warn!("audio unavailable, countdown continues silently: {e}");
        }
    }

    let mut interval = tokio::time::interval(Duration::from_millis(TICK_MILLIS));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut ticks: u64 = 0;

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            _ = interval.tick() => {
                let now = clock.now();
                ticks += 1;
                if ticks % RELOAD_EVERY_TICKS == 0 {
                    let schedule = store
                        .load_schedule(Schedule::default_school_day())
                        .normalize();
                    if &schedule != engine.schedule() {
                        if let Some(armed) = engine.set_schedule(schedule, now) {
                            println!("\r{}", serde_json::to_string(&armed)?);
                        }
                    }
                    engine.set_sound_enabled(store.load_sound_enabled());
                }
                if let Some(event @ Event::BellDue { .. }) = engine.tick(now) {
                    // Re-arming already happened inside tick; a playback
                    // failure here cannot re-fire the same boundary.
                    println!("\r{}", serde_json::to_string(&event)?);
                    if let Err(e) = player.ring() {
                        warn!("bell playback failed: {e}");
                    }
                }
                render(&engine.snapshot(now))?;
            }
        }
    }
    println!();
    Ok(())
}

fn render(snap: &CountdownSnapshot) -> std::io::Result<()> {
    let line = match (&snap.remaining, &snap.target_label) {
        (Some(remaining), Some(label)) => {
            let current = snap.current_period.as_deref().unwrap_or("-");
            format!(
                "[{current}] next bell in {} (at {label})   ",
                remaining.format_hms()
            )
        }
        _ => "No bells scheduled   ".to_string(),
    };
    print!("\r{line}");
    std::io::stdout().flush()
}
