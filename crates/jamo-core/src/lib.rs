//! # Jamo Core Library
//!
//! This library provides the core business logic for Jamo, a
//! spaced-repetition trainer for Hangul characters. It implements a
//! CLI-first philosophy: all operations are available through a
//! standalone CLI binary, with any GUI expected to be a thin layer over
//! the same core library.
//!
//! ## Architecture
//!
//! - **Scheduler**: pure functions mapping ratings to review offsets and
//!   filtering the catalog down to the due subsequence
//! - **Stats**: pure incremental aggregation of the running average
//!   rating and the mastered set
//! - **Store**: async persistence contract over three collections, with
//!   SQLite and in-memory implementations
//! - **Session**: the in-memory navigation state machine driving
//!   flip/rate/skip/previous
//!
//! ## Key Components
//!
//! - [`ReviewSession`]: session state machine
//! - [`store::ProgressStore`]: persistence contract
//! - [`store::SqliteStore`]: on-disk store
//! - [`Catalog`]: ordered, read-only character catalog

pub mod catalog;
pub mod error;
pub mod events;
pub mod progress;
pub mod scheduler;
pub mod session;
pub mod stats;
pub mod store;

pub use catalog::{Catalog, Character, CharacterCategory};
pub use error::{CoreError, StorageError, ValidationError};
pub use events::Event;
pub use progress::{CharacterProgress, Settings};
pub use session::{ReviewSession, SessionProgress, SessionState};
pub use stats::SessionStats;
pub use store::{MemoryStore, ProgressStore, SqliteStore};
