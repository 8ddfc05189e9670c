use std::path::PathBuf;

use clap::Subcommand;
use schoolbell_core::{BellPlayer, Store};

#[derive(Subcommand)]
pub enum SoundAction {
    /// Enable the bell and unlock audio output
    On,
    /// Disable the bell
    Off,
    /// Show the current preference as JSON
    Status,
    /// Set or clear the custom bell sound file
    File {
        /// Path to a sound file playable by rodio (wav/mp3/flac/ogg)
        path: Option<PathBuf>,
        /// Clear the configured file and use the synthesized chime
        #[arg(long)]
        clear: bool,
    },
}

pub fn run(action: SoundAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    match action {
        SoundAction::On => {
            // Unlock from a direct user action so the run loop can ring
            // autonomously. No audio output at all is a hard failure.
            BellPlayer::new(store.load_sound_file()).unlock()?;
            store.save_sound_enabled(true)?;
            println!("sound on");
        }
        SoundAction::Off => {
            store.save_sound_enabled(false)?;
            println!("sound off");
        }
        SoundAction::Status => {
            let status = serde_json::json!({
                "enabled": store.load_sound_enabled(),
                "file": store.load_sound_file(),
            });
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        SoundAction::File { path, clear } => {
            if clear {
                store.save_sound_file(None)?;
                println!("using the synthesized chime");
            } else if let Some(path) = path {
                if !path.is_file() {
                    eprintln!("warning: {} does not exist; the chime will be used as fallback", path.display());
                }
                store.save_sound_file(Some(&path))?;
                println!("bell sound set to {}", path.display());
            } else {
                match store.load_sound_file() {
                    Some(p) => println!("{}", p.display()),
                    None => println!("synthesized chime"),
                }
            }
        }
    }
    Ok(())
}
