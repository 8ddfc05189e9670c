use clap::Subcommand;
use schoolbell_core::{Bell, BellPlayer, Store};

#[derive(Subcommand)]
pub enum BellAction {
    /// Ring the bell once and wait for playback to finish
    Test,
}

pub fn run(action: BellAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    match action {
        BellAction::Test => {
            let player = BellPlayer::new(store.load_sound_file());
            player.unlock()?;
            player.ring()?;
            player.flush()?;
        }
    }
    Ok(())
}
