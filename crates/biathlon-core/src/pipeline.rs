//! End-to-end processing of one race log.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::config::RaceConfig;
use crate::event::Event;
use crate::race::Race;
use crate::ranking::rank;
use crate::report::format_report;

/// Failure while reading the log or writing the output.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to read line {line} of the race log")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("failed to write output")]
    Write(#[from] io::Error),
}

/// Counts from a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub events_applied: usize,
    pub lines_rejected: usize,
    pub competitors: usize,
}

/// Reads every log line, writes its decoded line (or an `ERROR:` line), then
/// writes the ranked report.
///
/// The log is read as bytes and each line decoded lossily, so invalid UTF-8
/// never stops the run. Empty lines are skipped silently. A line that fails
/// to parse produces an `ERROR:<reason>` line and does not touch any
/// competitor. The output is flushed before returning.
pub fn process_log<R: BufRead, W: Write>(
    config: &RaceConfig,
    mut input: R,
    mut output: W,
) -> Result<RunSummary, ProcessError> {
    let mut race = Race::new(config);
    let mut events_applied = 0;
    let mut lines_rejected = 0;
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .map_err(|source| ProcessError::Read {
                line: line_no + 1,
                source,
            })?;
        if read == 0 {
            break;
        }
        line_no += 1;

        let line = String::from_utf8_lossy(trim_line_ending(&buf));
        if line.is_empty() {
            continue;
        }

        match Event::parse(&line) {
            Ok(event) => {
                writeln!(output, "{}", race.apply(&event))?;
                events_applied += 1;
            }
            Err(err) => {
                tracing::warn!(line = line_no, error = %err, "skipping malformed log line");
                writeln!(output, "ERROR:{err}")?;
                lines_rejected += 1;
            }
        }
    }

    let competitors = race.len();
    let standings = rank(race.into_results());
    output.write_all(format_report(&standings, config).as_bytes())?;
    output.flush()?;

    tracing::info!(events_applied, lines_rejected, competitors, "race processed");
    Ok(RunSummary {
        events_applied,
        lines_rejected,
        competitors,
    })
}

/// Drops a trailing `\n` or `\r\n`.
fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
