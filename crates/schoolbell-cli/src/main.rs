use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "schoolbell", version, about = "Classroom bell scheduler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Schedule management
    Schedule {
        #[command(subcommand)]
        action: commands::schedule::ScheduleAction,
    },
    /// Sound preference
    Sound {
        #[command(subcommand)]
        action: commands::sound::SoundAction,
    },
    /// Bell playback
    Bell {
        #[command(subcommand)]
        action: commands::bell::BellAction,
    },
    /// Run the live countdown until interrupted
    Run,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Schedule { action } => commands::schedule::run(action),
        Commands::Sound { action } => commands::sound::run(action),
        Commands::Bell { action } => commands::bell::run(action),
        Commands::Run => commands::run::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
