//! Interactive review loop over stdin.

use std::io::{self, BufRead, Write};

use clap::Args;
use jamo_core::store::{MemoryStore, ProgressStore, SqliteStore};
use jamo_core::{Catalog, CoreError, ReviewSession, SessionState};

#[derive(Args)]
pub struct ReviewArgs {
    /// Use an in-memory store; nothing is persisted.
    #[arg(long)]
    pub ephemeral: bool,
}

pub async fn run(args: ReviewArgs) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::basic_jamo();
    if args.ephemeral {
        let session = ReviewSession::start(&catalog, MemoryStore::new()).await?;
        review_loop(session).await
    } else {
        let session = ReviewSession::start(&catalog, SqliteStore::open()?).await?;
        review_loop(session).await
    }
}

async fn review_loop<S: ProgressStore>(
    mut session: ReviewSession<S>,
) -> Result<(), Box<dyn std::error::Error>> {
    if session.state() == SessionState::Empty {
        println!("Catalog is empty; nothing to review.");
        return Ok(());
    }

    let progress = session.progress();
    println!(
        "Session started: {} cards ({} due).",
        progress.total,
        session.due_count()
    );

    let stdin = io::stdin();
    loop {
        print_card(&session);
        print!("[f]lip  [1-5] rate  [s]kip  [p]revious  [q]uit > ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // stdin closed
        }

        match line.trim() {
            "f" => {
                session.flip();
            }
            "s" => {
                session.skip();
            }
            "p" => {
                if session.previous().is_none() {
                    println!("Nothing to go back to.");
                }
            }
            "q" => break,
            "" => {}
            input => match input.parse::<u8>() {
                Ok(rating) => match session.rate(rating).await {
                    Ok(_) => {}
                    // Recoverable: prompt again without losing the card.
                    Err(CoreError::Validation(e)) => println!("{e}"),
                    Err(e) => return Err(e.into()),
                },
                Err(_) => println!("Unrecognized input '{input}'."),
            },
        }
    }

    let stats = session.stats();
    println!(
        "Session over: {} total reviews, average rating {:.2}, {} mastered.",
        stats.total_reviews,
        stats.average_rating,
        stats.mastered_count()
    );
    Ok(())
}

fn print_card<S: ProgressStore>(session: &ReviewSession<S>) {
    let Some(card) = session.current_card() else {
        return;
    };
    let progress = session.progress();

    println!();
    if session.is_flipped() {
        println!(
            "  {}  --  {} (romanized: {})",
            card.korean, card.english, card.romanization
        );
    } else {
        println!("  {}", card.korean);
    }
    println!(
        "  card {} of {}  |  mastered {}",
        progress.current_position, progress.total, progress.mastered_count
    );
}
