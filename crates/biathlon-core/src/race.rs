//! Per-competitor event state machine.
//!
//! [`Race`] owns the table of [`CompetitorResult`]s and applies log events to
//! it one at a time, in log order.
//!
//! # Effects by event kind
//!
//! | kind | effect |
//! |------|--------|
//! | 1  | mark registered |
//! | 2  | record the drawn start time |
//! | 4  | record start; `NotStarted` if later than the drawn time plus the start window |
//! | 5  | five more shots |
//! | 6  | one more hit |
//! | 8  | record penalty loop entry |
//! | 9  | close a penalty loop split |
//! | 10 | close a main lap split; finish after the last lap |
//! | 11 | `NotFinished` |
//!
//! Every event, whatever its kind, becomes the competitor's `status`.

use std::collections::BTreeMap;

use chrono::Duration;

use crate::clock::{self, TimeOfDay, within_threshold};
use crate::competitor::{CompetitorResult, LapSplit, Outcome};
use crate::config::RaceConfig;
use crate::event::Event;
use crate::event_kind::EventKind;
use crate::types::CompetitorId;

/// Results of a race in progress.
#[derive(Debug)]
pub struct Race<'a> {
    config: &'a RaceConfig,
    competitors: BTreeMap<CompetitorId, CompetitorResult>,
}

impl<'a> Race<'a> {
    pub const fn new(config: &'a RaceConfig) -> Self {
        Self {
            config,
            competitors: BTreeMap::new(),
        }
    }

    pub const fn config(&self) -> &RaceConfig {
        self.config
    }

    /// Looks up a competitor's current result.
    pub fn competitor(&self, id: CompetitorId) -> Option<&CompetitorResult> {
        self.competitors.get(&id)
    }

    pub fn len(&self) -> usize {
        self.competitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.competitors.is_empty()
    }

    /// Applies one event and returns its decoded log line.
    pub fn apply(&mut self, event: &Event) -> String {
        let config = self.config;
        let result = self
            .competitors
            .entry(event.competitor)
            .or_insert_with(|| CompetitorResult::new(event.competitor));

        match event.kind {
            EventKind::Registered => result.registered = true,
            EventKind::StartTimeDrawn => {
                // A draw without a time clears the previous one.
                result.scheduled_start = event
                    .extra
                    .as_deref()
                    .and_then(|drawn| TimeOfDay::parse(drawn).ok());
            }
            EventKind::Started => {
                result.start_time = Some(event.time);
                result.lap_start_time = Some(event.time);
                let delay = elapsed(result.scheduled_start, event.time);
                if !within_threshold(delay, config.start_window()).unwrap_or(false) {
                    tracing::debug!(competitor = %event.competitor, "started outside start window");
                    result.outcome = Outcome::NotStarted;
                }
            }
            EventKind::OnFiringRange => result.shots += 5,
            EventKind::TargetHit => result.hits += 1,
            EventKind::EnteredPenaltyLaps => result.penalty_start_time = Some(event.time),
            EventKind::LeftPenaltyLaps => {
                let duration = elapsed(result.penalty_start_time, event.time);
                result
                    .penalty_laps
                    .push(LapSplit::over(config.penalty_len, duration));
            }
            EventKind::EndedMainLap => complete_lap(result, config, event.time),
            EventKind::CannotContinue => result.outcome = Outcome::NotFinished,
            EventKind::OnStartLine | EventKind::LeftFiringRange | EventKind::Unknown(_) => {}
        }
        result.status = Some(event.kind);

        tracing::debug!(
            competitor = %event.competitor,
            kind = %event.kind,
            time = %event.time,
            "applied event"
        );
        event.log_line()
    }

    /// Consumes the race, yielding results in ascending competitor order.
    pub fn into_results(self) -> Vec<CompetitorResult> {
        self.competitors.into_values().collect()
    }
}

/// Closes the current main lap. Laps past the configured count are ignored.
fn complete_lap(result: &mut CompetitorResult, config: &RaceConfig, now: TimeOfDay) {
    let total_laps = config.laps as usize;
    if result.laps.len() >= total_laps {
        tracing::warn!(competitor = %result.id, "lap reported after the final lap");
        return;
    }

    let duration = elapsed(result.lap_start_time, now);
    result.laps.push(LapSplit::over(config.lap_len, duration));
    result.lap_start_time = Some(now);

    if result.laps.len() == total_laps {
        result.finish_time = Some(now);
        result.outcome = Outcome::Finished(elapsed(result.start_time, now));
    }
}

/// Time from `since` to `now`; zero when `since` was never recorded.
fn elapsed(since: Option<TimeOfDay>, now: TimeOfDay) -> Duration {
    since.map_or_else(Duration::zero, |since| clock::subtract(since, now))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RaceConfig {
        RaceConfig {
            laps: 2,
            lap_len: 3500,
            penalty_len: 150,
            firing_lines: 1,
            start: TimeOfDay::parse("10:00:00.000").unwrap(),
            start_delta: TimeOfDay::parse("00:01:00.000").unwrap(),
        }
    }

    fn feed(race: &mut Race<'_>, lines: &[&str]) -> Vec<String> {
        lines
            .iter()
            .map(|line| race.apply(&Event::parse(line).unwrap()))
            .collect()
    }

    fn one() -> CompetitorId {
        CompetitorId::new(1)
    }

    #[test]
    fn finishing_all_laps_sets_elapsed_outcome() {
        let config = config();
        let mut race = Race::new(&config);
        feed(
            &mut race,
            &[
                "[09:00:00.000] 1 1",
                "[09:10:00.000] 2 1 10:00:05.000",
                "[10:00:05.000] 4 1",
                "[10:10:00.000] 10 1",
                "[10:20:00.000] 10 1",
            ],
        );

        let result = race.competitor(one()).unwrap();
        assert!(result.registered);
        assert_eq!(result.outcome.to_string(), "00:19:55.000");
        assert_eq!(result.laps.len(), 2);
        assert_eq!(result.laps[0].duration, Duration::milliseconds(595_000));
        assert_eq!(result.laps[1].duration, Duration::minutes(10));
        assert_eq!(result.finish_time.unwrap().to_string(), "10:20:00.000");
        assert_eq!(result.status, Some(EventKind::EndedMainLap));
    }

    #[test]
    fn late_start_is_not_started() {
        let config = config();
        let mut race = Race::new(&config);
        feed(
            &mut race,
            &["[09:10:00.000] 2 1 10:00:05.000", "[10:05:00.000] 4 1"],
        );
        assert_eq!(race.competitor(one()).unwrap().outcome, Outcome::NotStarted);
    }

    #[test]
    fn start_exactly_at_window_edge_is_allowed() {
        let config = config();
        let mut race = Race::new(&config);
        feed(
            &mut race,
            &["[09:10:00.000] 2 1 10:00:00.000", "[10:01:00.000] 4 1"],
        );
        assert_eq!(race.competitor(one()).unwrap().outcome, Outcome::Unset);
    }

    #[test]
    fn early_start_is_not_started() {
        // A negative delay does not read back as a clock time.
        let config = config();
        let mut race = Race::new(&config);
        feed(
            &mut race,
            &["[09:10:00.000] 2 1 10:00:05.000", "[10:00:00.000] 4 1"],
        );
        assert_eq!(race.competitor(one()).unwrap().outcome, Outcome::NotStarted);
    }

    #[test]
    fn start_without_draw_counts_as_on_time() {
        let config = config();
        let mut race = Race::new(&config);
        feed(&mut race, &["[10:30:00.000] 4 1"]);
        assert_eq!(race.competitor(one()).unwrap().outcome, Outcome::Unset);
    }

    #[test]
    fn redraw_without_time_clears_previous_draw() {
        let config = config();
        let mut race = Race::new(&config);
        feed(
            &mut race,
            &["[09:00:00.000] 2 1 10:00:00.000", "[09:05:00.000] 2 1", "[10:30:00.000] 4 1"],
        );
        let result = race.competitor(one()).unwrap();
        assert_eq!(result.scheduled_start, None);
        assert_eq!(result.outcome, Outcome::Unset);
    }

    #[test]
    fn cannot_continue_sets_not_finished() {
        let config = config();
        let mut race = Race::new(&config);
        let lines = feed(&mut race, &["[10:15:00.000] 11 1 Lost ski"]);
        assert_eq!(lines, vec!["[10:15:00.000] The competitor(1) can't continue: Lost ski"]);
        assert_eq!(race.competitor(one()).unwrap().outcome, Outcome::NotFinished);
    }

    #[test]
    fn cannot_continue_overwrites_finish() {
        let config = config();
        let mut race = Race::new(&config);
        feed(
            &mut race,
            &[
                "[10:00:00.000] 4 1",
                "[10:10:00.000] 10 1",
                "[10:20:00.000] 10 1",
                "[10:21:00.000] 11 1 Protest",
            ],
        );
        assert_eq!(race.competitor(one()).unwrap().outcome, Outcome::NotFinished);
    }

    #[test]
    fn shooting_counts_five_shots_per_bout() {
        let config = config();
        let mut race = Race::new(&config);
        feed(
            &mut race,
            &[
                "[10:05:00.000] 5 1 1",
                "[10:05:01.000] 6 1 1",
                "[10:05:02.000] 6 1 2",
                "[10:05:10.000] 7 1",
                "[10:15:00.000] 5 1 1",
                "[10:15:01.000] 6 1 5",
            ],
        );
        let result = race.competitor(one()).unwrap();
        assert_eq!(result.shots, 10);
        assert_eq!(result.hits, 3);
        assert_eq!(result.status, Some(EventKind::TargetHit));
    }

    #[test]
    fn penalty_loop_records_split() {
        let config = config();
        let mut race = Race::new(&config);
        feed(&mut race, &["[10:06:00.000] 8 1", "[10:07:00.000] 9 1"]);
        let result = race.competitor(one()).unwrap();
        assert_eq!(result.penalty_laps.len(), 1);
        assert_eq!(result.penalty_laps[0].duration, Duration::minutes(1));
        assert!((result.penalty_laps[0].speed - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_length_penalty_loop_is_infinite_speed() {
        let config = config();
        let mut race = Race::new(&config);
        feed(&mut race, &["[10:06:00.000] 8 1", "[10:06:00.000] 9 1"]);
        let result = race.competitor(one()).unwrap();
        assert!(result.penalty_laps[0].speed.is_infinite());
    }

    #[test]
    fn laps_never_exceed_configured_count() {
        let config = config();
        let mut race = Race::new(&config);
        let lines = feed(
            &mut race,
            &[
                "[10:00:00.000] 4 1",
                "[10:10:00.000] 10 1",
                "[10:20:00.000] 10 1",
                "[10:30:00.000] 10 1",
            ],
        );
        let result = race.competitor(one()).unwrap();
        assert_eq!(result.laps.len(), 2);
        assert_eq!(result.outcome.to_string(), "00:20:00.000");
        assert_eq!(lines[3], "[10:30:00.000] The competitor(1) ended the main lap");
    }

    #[test]
    fn unknown_kind_only_updates_status() {
        let config = config();
        let mut race = Race::new(&config);
        let lines = feed(&mut race, &["[10:00:00.000] 99 1"]);
        assert_eq!(lines, vec!["[10:00:00.000] "]);
        let result = race.competitor(one()).unwrap();
        assert_eq!(result.status, Some(EventKind::Unknown(99)));
        assert_eq!(result.outcome, Outcome::Unset);
    }

    #[test]
    fn results_come_out_in_id_order() {
        let config = config();
        let mut race = Race::new(&config);
        feed(
            &mut race,
            &["[09:00:00.000] 1 3", "[09:00:01.000] 1 1", "[09:00:02.000] 1 2"],
        );
        let ids: Vec<u64> = race.into_results().iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
