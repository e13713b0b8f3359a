//! Export line grammar
//!
//! A message line carries `(date, time, sender, content)`. Exports differ in
//! date order markers, 12/24-hour clocks, brackets and dash style, so each
//! variant is one entry in [`LINE_FORMATS`], tried in order; the first match
//! wins.
//!
//! Dates are always day-first (`dd/mm/yyyy`, `dd/mm/yy`, `dd-mm-yyyy`).
//! Two-digit years are read as `20yy`. Seconds are accepted but not kept.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// A named timestamp-line pattern.
///
/// Every pattern has exactly four capture groups: date, time, sender, content.
pub struct LineFormat {
    pub name: &'static str,
    pattern: Regex,
}

impl LineFormat {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).unwrap(),
        }
    }
}

/// Recognised line formats in priority order.
pub static LINE_FORMATS: Lazy<Vec<LineFormat>> = Lazy::new(|| {
    vec![
        // 05/02/2021, 12:12 am - Name: Message
        LineFormat::new(
            "12h-lowercase",
            r"(?i)^([0-9]{1,2}/[0-9]{1,2}/[0-9]{4}),\s+([0-9]{1,2}:[0-9]{2}\s+[ap]m)\s+-\s+(.+?):\s*(.*)$",
        ),
        // 05/02/2021, 12:12 AM - Name: Message
        LineFormat::new(
            "12h-uppercase",
            r"^([0-9]{1,2}/[0-9]{1,2}/[0-9]{4}),\s+([0-9]{1,2}:[0-9]{2}\s+[AP]M)\s+-\s+(.+?):\s*(.*)$",
        ),
        // 05/02/21, 12:12 am - Name: Message
        LineFormat::new(
            "12h-short-year",
            r"(?i)^([0-9]{1,2}/[0-9]{1,2}/[0-9]{2}),\s+([0-9]{1,2}:[0-9]{2}\s+[ap]m)\s+-\s+(.+?):\s*(.*)$",
        ),
        // 05/02/2021, 12:12 - Name: Message
        LineFormat::new(
            "24h",
            r"^([0-9]{1,2}/[0-9]{1,2}/[0-9]{4}),\s+([0-9]{1,2}:[0-9]{2})\s+-\s+(.+?):\s*(.*)$",
        ),
        // [05/02/2021, 12:12:33 PM] Name: Message
        LineFormat::new(
            "bracketed",
            r"^\[([0-9]{1,2}/[0-9]{1,2}/[0-9]{2,4}),?\s+([0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?\s*(?:[AP]M)?)\]\s*(.+?):\s*(.*)$",
        ),
        // 05-02-2021, 12:12 - Name: Message
        LineFormat::new(
            "dashed-date",
            r"^([0-9]{1,2}-[0-9]{1,2}-[0-9]{2,4}),?\s+([0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?\s*(?:[AP]M)?)\s*[-–]\s*(.+?):\s*(.*)$",
        ),
        // 05/02/2021 12:12:33 – Name: Message
        LineFormat::new(
            "en-dash",
            r"^([0-9]{1,2}/[0-9]{1,2}/[0-9]{2,4}),?\s+([0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?\s*(?:[AP]M)?)\s*[-–]\s*(.+?):\s*(.*)$",
        ),
    ]
});

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([0-9]{1,2}):([0-9]{2})(?::[0-9]{2})?\s*([ap]m)?").unwrap());

/// Substrings marking export-generated notices rather than messages.
pub const SYSTEM_NOTICES: &[&str] = &[
    "Messages and calls are end-to-end encrypted",
    "This business uses a secure service",
    "created group",
    "added",
    "left",
    "changed the subject",
    "changed this group's icon",
    "You're now an admin",
    "became admin",
    "security code changed",
];

/// Substrings marking a message as a media placeholder.
pub const MEDIA_MARKERS: &[&str] = &[
    "<Media omitted>",
    "image omitted",
    "video omitted",
    "audio omitted",
    "document omitted",
    "\u{200e}",
];

/// The four captured fields of a message line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineFields<'a> {
    pub date: &'a str,
    pub time: &'a str,
    pub sender: &'a str,
    pub content: &'a str,
}

/// Match a line against [`LINE_FORMATS`], returning the winning format's
/// name and its captures.
pub fn match_line(line: &str) -> Option<(&'static str, LineFields<'_>)> {
    LINE_FORMATS.iter().find_map(|format| {
        let caps = format.pattern.captures(line)?;
        let fields = LineFields {
            date: caps.get(1)?.as_str(),
            time: caps.get(2)?.as_str(),
            sender: caps.get(3)?.as_str(),
            content: caps.get(4).map_or("", |m| m.as_str()),
        };
        Some((format.name, fields))
    })
}

/// True if the line is an export notice that must be dropped outright.
pub fn is_system_notice(line: &str) -> bool {
    SYSTEM_NOTICES.iter().any(|notice| line.contains(notice))
}

/// True if the content is a media placeholder or empty.
pub fn is_media(content: &str) -> bool {
    content.trim().is_empty() || MEDIA_MARKERS.iter().any(|marker| content.contains(marker))
}

/// Parse a day-first date with `/` or `-` separators.
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    let separator = if date.contains('/') {
        '/'
    } else if date.contains('-') {
        '-'
    } else {
        return None;
    };

    let parts: Vec<&str> = date.split(separator).collect();
    if parts.len() != 3 {
        return None;
    }

    let day: u32 = parts[0].parse().ok()?;
    let month: u32 = parts[1].parse().ok()?;
    let year: i32 = if parts[2].len() == 2 {
        2000 + parts[2].parse::<i32>().ok()?
    } else {
        parts[2].parse().ok()?
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse `h:mm[:ss][ am|pm]` into 24-hour `(hour, minute)`.
///
/// Text with no recognisable time yields midnight.
pub fn parse_time(time: &str) -> (u32, u32) {
    let Some(caps) = TIME_RE.captures(time) else {
        return (0, 0);
    };

    let mut hour: u32 = caps[1].parse().unwrap_or(0);
    let minute: u32 = caps[2].parse().unwrap_or(0);

    match caps.get(3).map(|m| m.as_str().to_ascii_lowercase()) {
        Some(period) if period == "pm" && hour != 12 => hour += 12,
        Some(period) if period == "am" && hour == 12 => hour = 0,
        _ => {}
    }

    (hour, minute)
}

/// Combine captured date and time text into a timestamp.
///
/// Returns `None` for impossible calendar dates or clock times.
pub fn parse_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = parse_date(date)?;
    let (hour, minute) = parse_time(time);
    date.and_hms_opt(hour, minute, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_lowercase_12h_line() {
        let (name, fields) = match_line("05/02/2021, 12:12 am - Alice: Hello!").unwrap();
        assert_eq!(name, "12h-lowercase");
        assert_eq!(fields.date, "05/02/2021");
        assert_eq!(fields.time, "12:12 am");
        assert_eq!(fields.sender, "Alice");
        assert_eq!(fields.content, "Hello!");
    }

    #[test]
    fn test_uppercase_is_caught_by_first_case_insensitive_format() {
        let (name, _) = match_line("05/02/2021, 1:05 PM - Bob: hey").unwrap();
        assert_eq!(name, "12h-lowercase");
    }

    #[test]
    fn test_short_year_and_24h_lines() {
        let (name, fields) = match_line("05/02/21, 9:00 pm - Bob: ok").unwrap();
        assert_eq!(name, "12h-short-year");
        assert_eq!(fields.date, "05/02/21");

        let (name, fields) = match_line("05/02/2021, 21:30 - Bob: late").unwrap();
        assert_eq!(name, "24h");
        assert_eq!(fields.time, "21:30");
    }

    #[test]
    fn test_bracketed_line() {
        let (name, fields) = match_line("[05/02/2021, 12:12:33 PM] Alice: hi there").unwrap();
        assert_eq!(name, "bracketed");
        assert_eq!(fields.time, "12:12:33 PM");
        assert_eq!(fields.sender, "Alice");
        assert_eq!(fields.content, "hi there");
    }

    #[test]
    fn test_dashed_date_and_en_dash_lines() {
        let (name, fields) = match_line("05-02-2021, 08:15 - Alice: morning").unwrap();
        assert_eq!(name, "dashed-date");
        assert_eq!(fields.date, "05-02-2021");

        let (name, fields) = match_line("05/02/2021 08:15 – Alice: morning").unwrap();
        assert_eq!(name, "en-dash");
        assert_eq!(fields.content, "morning");
    }

    #[test]
    fn test_sender_stops_at_first_colon() {
        let (_, fields) = match_line("05/02/2021, 10:00 - Bob: note: see you at 5:30").unwrap();
        assert_eq!(fields.sender, "Bob");
        assert_eq!(fields.content, "note: see you at 5:30");
    }

    #[test]
    fn test_plain_text_does_not_match() {
        assert!(match_line("note: continuation line").is_none());
        assert!(match_line("").is_none());
    }

    #[test]
    fn test_parse_time_conversions() {
        assert_eq!(parse_time("12:12 am"), (0, 12));
        assert_eq!(parse_time("12:30 PM"), (12, 30));
        assert_eq!(parse_time("1:05 pm"), (13, 5));
        assert_eq!(parse_time("23:59"), (23, 59));
        assert_eq!(parse_time("7:08:45 AM"), (7, 8));
        assert_eq!(parse_time("noon"), (0, 0));
    }

    #[test]
    fn test_parse_date_day_first_and_short_year() {
        assert_eq!(parse_date("05/02/2021"), NaiveDate::from_ymd_opt(2021, 2, 5));
        assert_eq!(parse_date("5-2-21"), NaiveDate::from_ymd_opt(2021, 2, 5));
        assert_eq!(parse_date("31/04/2021"), None);
        assert_eq!(parse_date("05/02"), None);
        assert_eq!(parse_date("05.02.2021"), None);
    }

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(
            parse_timestamp("05/02/2021", "12:13 am"),
            Some(ts(2021, 2, 5, 0, 13))
        );
        assert_eq!(parse_timestamp("29/02/2021", "10:00"), None);
        assert_eq!(parse_timestamp("01/01/2021", "25:00"), None);
    }

    #[test]
    fn test_system_notices() {
        assert!(is_system_notice(
            "05/02/2021, 12:00 am - Messages and calls are end-to-end encrypted."
        ));
        assert!(is_system_notice("05/02/2021, 12:00 am - Alice added Bob"));
        assert!(is_system_notice("Bob's security code changed. Tap to learn more."));
        assert!(!is_system_notice("05/02/2021, 12:00 am - Alice: Hello!"));
    }

    #[test]
    fn test_media_detection() {
        assert!(is_media("<Media omitted>"));
        assert!(is_media("IMG-001.jpg image omitted"));
        assert!(is_media("\u{200e}sticker"));
        assert!(is_media("   "));
        assert!(!is_media("a real message"));
    }
}
