//! Final standings order.

use crate::clock::within_threshold;
use crate::competitor::{CompetitorResult, Outcome};

/// Whether `a` ranks ahead of `b`.
///
/// A `NotStarted` or `NotFinished` left operand never ranks ahead. A
/// `NotFinished` right operand always ranks behind. A `NotStarted` right
/// operand gets no special treatment and falls through to the finish-time
/// comparison, which cannot read it as a clock time and answers false.
/// Finish times compare through [`within_threshold`], so ties rank ahead.
pub fn ranks_before(a: &CompetitorResult, b: &CompetitorResult) -> bool {
    match (a.outcome, b.outcome) {
        (Outcome::NotStarted | Outcome::NotFinished, _) => false,
        (_, Outcome::NotFinished) => true,
        (Outcome::Finished(a_time), Outcome::Finished(b_time)) => {
            within_threshold(a_time, b_time).unwrap_or(false)
        }
        _ => false,
    }
}

/// Orders results for the final report.
///
/// [`ranks_before`] is not a total order, so this is a plain insertion sort:
/// each result moves ahead only past results it ranks before. Equal finish
/// times rank before each other, so the later of two ties ends up first.
/// The output depends only on the input order.
pub fn rank(mut results: Vec<CompetitorResult>) -> Vec<CompetitorResult> {
    for i in 1..results.len() {
        let mut j = i;
        while j > 0 && ranks_before(&results[j], &results[j - 1]) {
            results.swap(j, j - 1);
            j -= 1;
        }
    }
    results
}
