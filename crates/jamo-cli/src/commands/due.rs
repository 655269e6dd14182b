use std::collections::HashMap;

use chrono::Utc;
use jamo_core::store::{ProgressStore, SqliteStore};
use jamo_core::{scheduler, Catalog};

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open()?;
    let catalog = Catalog::basic_jamo();

    let progress_index: HashMap<_, _> = store
        .load_all_progress()
        .await?
        .into_iter()
        .map(|p| (p.character_id.clone(), p))
        .collect();

    let due = scheduler::select_due(&catalog.ids(), &progress_index, Utc::now());
    println!("{}", serde_json::to_string_pretty(&due)?);
    Ok(())
}
