//! Final results report.
//!
//! One line per competitor, in ranked order:
//!
//! ```text
//! [<outcome>] <id> [{<lap time>, <speed>}, {,}] {<penalty time>, <speed>} <hits>/<shots>
//! ```
//!
//! Laps the competitor never completed render as `{,}` so every line has
//! exactly as many lap entries as the race has laps.

use std::fmt::Write;

use crate::clock::{format_duration, format_speed};
use crate::competitor::{CompetitorResult, LapSplit};
use crate::config::RaceConfig;

fn format_split(split: &LapSplit) -> String {
    format!(
        "{{{}, {}}}",
        format_duration(split.duration),
        format_speed(split.speed)
    )
}

/// Renders one competitor's report line, without a trailing newline.
pub fn format_result_line(result: &CompetitorResult, config: &RaceConfig) -> String {
    let laps: Vec<String> = (0..config.laps as usize)
        .map(|i| result.laps.get(i).map_or_else(|| "{,}".to_string(), format_split))
        .collect();
    let penalty = result.penalty_summary(config.penalty_len);

    format!(
        "[{}] {} [{}] {} {}/{}",
        result.outcome,
        result.id,
        laps.join(", "),
        format_split(&penalty),
        result.hits,
        result.shots
    )
}

/// Renders the full report, one newline-terminated line per result.
pub fn format_report(results: &[CompetitorResult], config: &RaceConfig) -> String {
    let mut output = String::new();
    for result in results {
        writeln!(output, "{}", format_result_line(result, config)).unwrap();
    }
    output
}
