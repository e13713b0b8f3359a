//! Ingestion layer for chat exports
//!
//! Converts raw export text into a [`ChatTranscript`]: an ordered, typed
//! message stream plus its participants.
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐     ┌─────────────────┐
//! │   Raw export    │ ──► │ TranscriptParser │ ──► │ ChatTranscript  │
//! │  (UTF-8 text)   │     │  + LINE_FORMATS  │     │ (sorted, typed) │
//! └─────────────────┘     └──────────────────┘     └─────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use lovelens_core::ingest::parse_transcript;
//!
//! let transcript = parse_transcript("05/02/2021, 12:12 am - Alice: Hello!\n")?;
//! assert_eq!(transcript.participants(), ["Alice"]);
//! # Ok::<(), lovelens_core::Error>(())
//! ```

pub mod format;
mod parser;

pub use parser::{ParseReport, ParsedTranscript, TranscriptParser};

use crate::error::Result;
use crate::types::ChatTranscript;
use std::path::Path;

/// Parse raw export text into a transcript.
///
/// Fails with [`Error::NoMessagesFound`](crate::Error::NoMessagesFound) when
/// no line is a recognisable message. The two-participant rule is left to
/// the caller; see [`ChatTranscript::ensure_two_participants`].
pub fn parse_transcript(raw: &str) -> Result<ChatTranscript> {
    TranscriptParser::new().parse(raw)
}

/// Read and parse an export file.
pub fn parse_file(path: &Path) -> Result<ParsedTranscript> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        crate::error::Error::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read {}: {}", path.display(), e),
        ))
    })?;
    tracing::debug!(path = %path.display(), bytes = raw.len(), "Read transcript file");
    TranscriptParser::new().parse_with_report(&raw)
}
