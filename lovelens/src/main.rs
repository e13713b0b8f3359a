//! lovelens - relationship report card for chat exports
//!
//! Reads a two-party chat export and prints the love score, streaks and
//! conversation insights.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use lovelens_core::analytics::{AnalyticsEngine, AnalyticsSnapshot, FixedClock};
use lovelens_core::format::{day_name, format_minutes, hour_display, percentage, truncate};
use lovelens_core::{parse_file, Config, Lexicon, ParseReport};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lovelens")]
#[command(about = "Love score and insights for a two-person chat export")]
#[command(version)]
struct Args {
    /// Chat export to analyze (UTF-8 text)
    file: PathBuf,

    /// Export format (md = markdown, json = JSON)
    #[arg(long)]
    export: Option<String>,

    /// Evaluate the current streak as of this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    now: Option<NaiveDate>,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of entries in the top emoji and word lists
    #[arg(long, default_value_t = 5)]
    top: usize,
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", value))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;
    let _log_guard = lovelens_core::logging::init(&config.logging).ok();

    let parsed = parse_file(&args.file)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;
    parsed.transcript.ensure_two_participants()?;

    let mut engine =
        AnalyticsEngine::from_config(&config).context("failed to build analytics engine")?;
    if let Some(today) = args.now {
        engine = engine.with_clock(FixedClock::on(today));
    }

    let snapshot = engine.compute(&parsed.transcript);
    tracing::debug!(file = %args.file.display(), "Rendering report");

    match args.export.as_deref() {
        Some("json") => println!("{}", snapshot.to_json()?),
        Some("md") => print_markdown(&snapshot, engine.lexicon(), args.top),
        Some(other) => anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", other),
        None => {
            print_terminal(&snapshot, engine.lexicon(), args.top);
            print_parse_notes(&parsed.report);
        }
    }

    Ok(())
}

fn print_terminal(snapshot: &AnalyticsSnapshot, lexicon: &Lexicon, top: usize) {
    let stats = &snapshot.stats;
    let score = &snapshot.love_score;
    let title = format!("💞 {} 💞", snapshot.participants.join(" & "));

    // Header
    println!();
    println!("╭{}╮", "─".repeat(60));
    println!("│{:^60}│", title);
    println!("╰{}╯", "─".repeat(60));
    println!();

    // The Numbers
    println!("📊 THE NUMBERS");
    println!(
        "   Messages: {:<12} Days: {}",
        snapshot.total_messages, snapshot.total_days
    );
    match snapshot.messages_per_day {
        Some(per_day) => println!("   Per day:  {}", per_day),
        None => println!("   Per day:  all in one sitting"),
    }
    for (name, count) in &stats.messages_by_participant {
        println!(
            "   {:<20} {:>6}  ({})",
            name,
            count,
            percentage(*count, snapshot.total_messages)
        );
    }
    println!();

    // Love score
    println!(
        "❤️  LOVE SCORE: {}/100  [{}]",
        score.total_score,
        score.grade.label()
    );
    println!("   {}", score.description);
    for (name, value, cap) in score.factors.rows() {
        println!("   {:<14} {:>5.1} / {}", name, value, cap);
    }
    println!();

    // Streaks
    println!("🔥 STREAKS");
    println!(
        "   Current: {} days    Longest: {} days",
        snapshot.streak.current, snapshot.streak.longest
    );
    println!();

    // Time patterns
    println!("⏰ TIME PATTERNS");
    if let Some((hour, _)) = stats.busiest_hour() {
        println!("   Busiest hour: {}", hour_display(hour as u32));
    }
    if let Some((day, _)) = stats.busiest_weekday() {
        println!("   Busiest day:  {}", day_name(day));
    }
    let tod = &stats.time_of_day;
    println!(
        "   Morning {} · Afternoon {} · Evening {} · Night {}",
        tod.morning, tod.afternoon, tod.evening, tod.night
    );
    if let Some(longest) = &stats.longest_conversation {
        println!(
            "   Longest chat: {} ({} messages)",
            longest.date, longest.messages
        );
    }
    println!();

    // Responses
    if !stats.average_response_time.is_empty() {
        println!("💬 AVERAGE REPLY TIME");
        for (name, minutes) in &stats.average_response_time {
            println!("   {:<20} {}", name, format_minutes(*minutes));
        }
        println!();
    }

    // Top lists
    let emojis = stats.top_emojis(top);
    if !emojis.is_empty() {
        println!("😍 TOP EMOJIS");
        let line: Vec<String> = emojis.iter().map(|(e, c)| format!("{} ×{}", e, c)).collect();
        println!("   {}", line.join("   "));
        println!();
    }

    let love_words = stats.top_love_words(top);
    if !love_words.is_empty() {
        println!("💌 TOP LOVE WORDS");
        for (i, (word, count)) in love_words.iter().enumerate() {
            println!("   {}. {} ({})", i + 1, word, count);
        }
        println!();
    }

    let words = stats.top_words(top, &lexicon.common_words);
    if !words.is_empty() {
        println!("🔤 FAVORITE WORDS");
        let line: Vec<String> = words.iter().map(|(w, c)| format!("{} ({})", w, c)).collect();
        println!("   {}", line.join(", "));
        println!();
    }

    // Calls
    let calls = &snapshot.call_stats;
    if calls.total_calls > 0 {
        println!("📞 CALLS");
        println!(
            "   Calls: {:<10} Missed: {:<8} Talk time: {}",
            calls.total_calls,
            calls.missed_calls,
            format_minutes(calls.total_duration)
        );
        println!();
    }

    // Insights
    let insights = &snapshot.insights;
    println!("✨ INSIGHTS");
    if insights.sweetest_hour.love_words > 0 {
        println!(
            "   Sweetest hour:    {}",
            hour_display(insights.sweetest_hour.hour)
        );
    }
    if let Some(day) = &insights.favorite_day {
        println!("   Favorite day:     {}", day.day);
    }
    println!(
        "   Good mornings:    {:<8} Good nights: {}",
        insights.good_morning_count, insights.good_night_count
    );
    println!(
        "   Laughs together:  {:<8} Compliments: {}",
        insights.laughing_together,
        insights.total_compliments()
    );
    println!(
        "   Support:          {:<8} Thoughtfulness: {}/100",
        insights.supportive_messages + insights.encouragement_count,
        insights.thoughtfulness_score
    );
    println!();

    let moments: Vec<_> = insights.active_memory_moments().collect();
    if !moments.is_empty() {
        println!("📸 MEMORY MOMENTS");
        for moment in moments {
            println!("   {} ({})", moment.label, moment.messages);
            if let Some(example) = &moment.example {
                println!("      \"{}\"", truncate(&example.replace('\n', " "), 60));
            }
        }
        println!();
    }
}

fn print_markdown(snapshot: &AnalyticsSnapshot, lexicon: &Lexicon, top: usize) {
    let stats = &snapshot.stats;
    let score = &snapshot.love_score;

    println!("# {}", snapshot.participants.join(" & "));
    println!();
    println!(
        "*{} to {}*",
        snapshot.date_range.start.format("%Y-%m-%d"),
        snapshot.date_range.end.format("%Y-%m-%d")
    );
    println!();

    println!(
        "## Love Score: {}/100 ({})",
        score.total_score,
        score.grade.label()
    );
    println!();
    println!("*{}*", score.description);
    println!();
    println!("| Factor | Score | Max |");
    println!("|--------|-------|-----|");
    for (name, value, cap) in score.factors.rows() {
        println!("| {} | {:.1} | {} |", name, value, cap);
    }
    println!();

    println!("## The Numbers");
    println!();
    println!("| Metric | Value |");
    println!("|--------|-------|");
    println!("| Messages | {} |", snapshot.total_messages);
    println!("| Days | {} |", snapshot.total_days);
    if let Some(per_day) = snapshot.messages_per_day {
        println!("| Messages per day | {} |", per_day);
    }
    for (name, count) in &stats.messages_by_participant {
        println!(
            "| {} | {} ({}) |",
            name,
            count,
            percentage(*count, snapshot.total_messages)
        );
    }
    println!("| Current streak | {} days |", snapshot.streak.current);
    println!("| Longest streak | {} days |", snapshot.streak.longest);
    println!("| Calls | {} |", snapshot.call_stats.total_calls);
    println!();

    println!("## Time Patterns");
    println!();
    if let Some((hour, _)) = stats.busiest_hour() {
        println!("- **Busiest hour:** {}", hour_display(hour as u32));
    }
    if let Some((day, _)) = stats.busiest_weekday() {
        println!("- **Busiest day:** {}", day_name(day));
    }
    for (name, minutes) in &stats.average_response_time {
        println!("- **{} replies in:** {}", name, format_minutes(*minutes));
    }
    println!();

    let love_words = stats.love_words.by_category(&lexicon.love_words);
    if !love_words.is_empty() {
        println!("## Love Words");
        println!();
        for (category, words) in love_words.iter() {
            let listed: Vec<String> = words
                .iter()
                .take(top)
                .map(|(w, c)| format!("{} ({})", w, c))
                .collect();
            println!("- **{}:** {}", category.label(), listed.join(", "));
        }
        println!();
    }

    let emojis = stats.top_emojis(top);
    if !emojis.is_empty() {
        println!("## Top Emojis");
        println!();
        for (i, (emoji, count)) in emojis.iter().enumerate() {
            println!("{}. {} - {}", i + 1, emoji, count);
        }
        println!();
    }

    let insights = &snapshot.insights;
    println!("## Insights");
    println!();
    println!("- **Good mornings:** {}", insights.good_morning_count);
    println!("- **Good nights:** {}", insights.good_night_count);
    println!("- **Laughing together:** {}", insights.laughing_together);
    println!("- **Compliments:** {}", insights.total_compliments());
    println!(
        "- **Thoughtfulness:** {}/100",
        insights.thoughtfulness_score
    );
    for moment in insights.active_memory_moments() {
        match &moment.example {
            Some(example) => println!(
                "- **{}:** {} *\"{}\"*",
                moment.label,
                moment.messages,
                example.replace('\n', " ")
            ),
            None => println!("- **{}:** {}", moment.label, moment.messages),
        }
    }
    println!();

    println!("---");
    println!("*Generated by lovelens*");
}

fn print_parse_notes(report: &ParseReport) {
    let skipped = report.orphan_lines + report.invalid_lines;
    if skipped == 0 {
        return;
    }
    eprintln!(
        "note: skipped {} of {} lines ({} system notices)",
        skipped, report.lines_read, report.system_notices
    );
}
