use clap::Subcommand;
use schoolbell_core::{Period, Schedule, Store};

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Show the stored schedule as JSON
    List,
    /// Add a period
    Add {
        /// Display name
        name: String,
        /// Start time, HH:MM 24-hour
        start: String,
        /// End time, HH:MM 24-hour (the bell rings here)
        end: String,
    },
    /// Remove a period by id
    Remove {
        id: String,
    },
    /// Remove all periods
    Clear,
    /// Reset to the default school day
    Reset,
    /// Replace the schedule from a JSON array of periods
    Set {
        /// JSON array of {id, name, start, end}
        json: String,
    },
}

pub fn run(action: ScheduleAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    match action {
        ScheduleAction::List => {
            let schedule = store
                .load_schedule(Schedule::default_school_day())
                .normalize();
            println!("{}", serde_json::to_string_pretty(&schedule)?);
        }
        ScheduleAction::Add { name, start, end } => {
            let period = Period::new(name, start, end);
            if !period.is_valid() {
                // Normalization drops it silently; warn at the editor level.
                eprintln!("warning: period has a blank name or malformed HH:MM time and will be dropped");
            }
            let mut schedule = store.load_schedule(Schedule::default_school_day());
            schedule.periods.push(period);
            let schedule = schedule.normalize();
            store.save_schedule(&schedule)?;
            println!("schedule now has {} period(s)", schedule.len());
        }
        ScheduleAction::Remove { id } => {
            let mut schedule = store.load_schedule(Schedule::default_school_day());
            let before = schedule.len();
            schedule.periods.retain(|p| p.id != id);
            if schedule.len() == before {
                eprintln!("no period with id {id}");
            }
            let schedule = schedule.normalize();
            store.save_schedule(&schedule)?;
            println!("schedule now has {} period(s)", schedule.len());
        }
        ScheduleAction::Clear => {
            store.save_schedule(&Schedule::default())?;
            println!("schedule cleared");
        }
        ScheduleAction::Reset => {
            store.save_schedule(&Schedule::default_school_day())?;
            println!("schedule reset to the default school day");
        }
        ScheduleAction::Set { json } => {
            let schedule: Schedule = serde_json::from_str(&json)?;
            let schedule = schedule.normalize();
            store.save_schedule(&schedule)?;
            println!("schedule updated: {} period(s)", schedule.len());
        }
    }
    Ok(())
}
