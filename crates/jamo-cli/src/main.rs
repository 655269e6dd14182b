use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "jamo-cli", version, about = "Jamo CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive review session
    Review(commands::review::ReviewArgs),
    /// List character ids due for review
    Due,
    /// Review statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Settings management
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Review(args) => commands::review::run(args).await,
        Commands::Due => commands::due::run().await,
        Commands::Stats { action } => commands::stats::run(action).await,
        Commands::Settings { action } => commands::settings::run(action).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
