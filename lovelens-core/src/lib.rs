//! # lovelens-core
//!
//! Core library for lovelens - a two-party chat transcript analyser.
//!
//! This library provides:
//! - A tolerant parser for line-oriented chat exports
//! - Message statistics, streaks, call detection and relationship insights
//! - A graded composite "love score"
//! - Configuration, keyword tables and logging infrastructure
//!
//! ## Architecture
//!
//! Data flows through two stages:
//! - **Ingest:** raw export text → [`ChatTranscript`] (sorted, typed, immutable)
//! - **Analytics:** [`ChatTranscript`] → [`AnalyticsSnapshot`] (derived, regenerable)
//!
//! ## Example
//!
//! ```rust
//! use lovelens_core::{compute_analytics, parse_transcript};
//!
//! let raw = "05/02/2021, 12:12 am - Alice: Hello!\n\
//!            05/02/2021, 12:13 am - Bob: Hi Alice ❤️\n";
//!
//! let transcript = parse_transcript(raw)?;
//! transcript.ensure_two_participants()?;
//!
//! let snapshot = compute_analytics(&transcript);
//! assert_eq!(snapshot.total_messages, 2);
//! # Ok::<(), lovelens_core::Error>(())
//! ```

// Re-export commonly used items at the crate root
pub use analytics::{compute_analytics, AnalyticsEngine, AnalyticsSnapshot, Clock, FixedClock};
pub use config::Config;
pub use error::{Error, Result};
pub use ingest::{parse_file, parse_transcript, ParseReport, ParsedTranscript, TranscriptParser};
pub use lexicon::Lexicon;
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod error;
pub mod format;
pub mod ingest;
pub mod lexicon;
pub mod logging;
pub mod types;
