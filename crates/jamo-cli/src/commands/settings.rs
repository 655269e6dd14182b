use clap::Subcommand;
use jamo_core::store::{ProgressStore, SqliteStore};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Current settings
    Show,
    /// Update one or more settings fields
    Set {
        #[arg(long)]
        show_guide_lines: Option<bool>,
        #[arg(long)]
        stroke_width: Option<u32>,
        #[arg(long)]
        auto_flip: Option<bool>,
        #[arg(long)]
        auto_flip_delay_ms: Option<u64>,
    },
}

pub async fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open()?;

    match action {
        SettingsAction::Show => {
            let settings = store.settings().await?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        SettingsAction::Set {
            show_guide_lines,
            stroke_width,
            auto_flip,
            auto_flip_delay_ms,
        } => {
            let mut settings = store.settings().await?;
            if let Some(value) = show_guide_lines {
                settings.show_guide_lines = value;
            }
            if let Some(value) = stroke_width {
                settings.stroke_width = value;
            }
            if let Some(value) = auto_flip {
                settings.auto_flip = value;
            }
            if let Some(value) = auto_flip_delay_ms {
                settings.auto_flip_delay_ms = value;
            }
            store.save_settings(&settings).await?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }
    Ok(())
}
