use clap::Subcommand;
use jamo_core::store::{ProgressStore, SqliteStore};

#[derive(Subcommand)]
pub enum StatsAction {
    /// All-time review statistics
    Show,
}

pub async fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open()?;

    match action {
        StatsAction::Show => {
            let stats = store.stats().await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}
