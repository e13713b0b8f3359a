//! Transcript parser
//!
//! Turns raw export text into a [`ChatTranscript`].
//!
//! ## Design Principles
//!
//! 1. **Resilience**: a line with an impossible date is dropped and recorded
//!    as a warning; parsing continues
//! 2. **Continuations**: any other unmatched line belongs to the message
//!    before it
//! 3. **Single failure mode**: only an input with no message at all is an error

use super::format::{self, LineFields};
use crate::error::{Error, Result};
use crate::types::{ChatTranscript, Message};
use std::collections::BTreeMap;

/// Number of raw lines echoed back when nothing parses.
const SAMPLE_LINES: usize = 5;

/// Diagnostics gathered while parsing.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParseReport {
    /// Non-empty lines read
    pub lines_read: usize,
    /// Lines accepted as new messages
    pub messages: usize,
    /// Lines appended to a previous message
    pub continuations: usize,
    /// Export notices dropped
    pub system_notices: usize,
    /// Unmatched lines seen before any message
    pub orphan_lines: usize,
    /// Timestamped lines dropped for an invalid date or time
    pub invalid_lines: usize,
    /// Accepted lines per line format name
    pub formats: BTreeMap<&'static str, usize>,
    /// Human-readable warnings (non-fatal)
    pub warnings: Vec<String>,
}

/// Result of a parse: the transcript plus its diagnostics.
#[derive(Debug, Clone)]
pub struct ParsedTranscript {
    pub transcript: ChatTranscript,
    pub report: ParseReport,
}

/// Parser for line-oriented chat exports.
#[derive(Debug, Default, Clone, Copy)]
pub struct TranscriptParser;

impl TranscriptParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse raw export text.
    pub fn parse(&self, raw: &str) -> Result<ChatTranscript> {
        self.parse_with_report(raw).map(|parsed| parsed.transcript)
    }

    /// Parse raw export text, keeping the diagnostics.
    pub fn parse_with_report(&self, raw: &str) -> Result<ParsedTranscript> {
        let mut report = ParseReport::default();
        let mut messages: Vec<Message> = Vec::new();
        let mut sample: Vec<String> = Vec::new();

        let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
        // \n, \r\n and bare \r all end a line
        let lines = raw
            .split(['\r', '\n'])
            .filter(|line| !line.trim().is_empty());

        for (index, line) in lines.enumerate() {
            let line_number = index + 1;
            report.lines_read += 1;
            if sample.len() < SAMPLE_LINES {
                sample.push(line.to_string());
            }

            if format::is_system_notice(line) {
                report.system_notices += 1;
                continue;
            }

            match format::match_line(line) {
                Some((format_name, fields)) => match build_message(&fields) {
                    Some(message) => {
                        report.messages += 1;
                        *report.formats.entry(format_name).or_insert(0) += 1;
                        messages.push(message);
                    }
                    None => {
                        report.invalid_lines += 1;
                        let warning = format!(
                            "Line {}: invalid date or time '{}, {}' ({} format), line skipped",
                            line_number, fields.date, fields.time, format_name
                        );
                        tracing::debug!(line = line_number, "{}", warning);
                        report.warnings.push(warning);
                    }
                },
                None => match messages.last_mut() {
                    Some(previous) => {
                        report.continuations += 1;
                        previous.content.push('\n');
                        previous.content.push_str(line);
                    }
                    None => {
                        report.orphan_lines += 1;
                        tracing::debug!(line = line_number, "Dropping text before first message");
                    }
                },
            }
        }

        if messages.is_empty() {
            tracing::warn!(
                lines_read = report.lines_read,
                "No messages recognised in transcript"
            );
            return Err(Error::NoMessagesFound { sample });
        }

        let transcript = ChatTranscript::from_messages(messages)?;

        tracing::info!(
            messages = transcript.total_messages(),
            participants = transcript.participants().len(),
            continuations = report.continuations,
            skipped = report.invalid_lines + report.system_notices,
            "Parsed transcript"
        );

        Ok(ParsedTranscript { transcript, report })
    }
}

fn build_message(fields: &LineFields<'_>) -> Option<Message> {
    let timestamp = format::parse_timestamp(fields.date, fields.time)?;
    let content = fields.content.trim();
    Some(Message {
        timestamp,
        sender: fields.sender.trim().to_string(),
        content: content.to_string(),
        is_media: format::is_media(content),
    })
}
