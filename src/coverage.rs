use chrono::{Duration, NaiveDate};

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// A contiguous span of activity. After merging, no two periods for the same
/// account are within `expected_frequency` days of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A span longer than the expected frequency with no activity. `days` is the
/// full theoretical length of the gap, even when `end` has been clamped to
/// the as-of date for display — severity reflects true elapsed days, not the
/// visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageReport {
    pub account: String,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub periods: Vec<Period>,
    pub gaps: Vec<Gap>,
    pub complete: bool,
    pub expected_frequency: u32,
}

// ---------------------------------------------------------------------------
// Analyzer
// ---------------------------------------------------------------------------

/// Analyze one account's activity dates for coverage gaps.
///
/// `expected_frequency` is the maximum number of days of inactivity
/// considered normal; `None` means the account has opted out of tracking.
/// `as_of` is the reference "today", injected by the caller so the result is
/// deterministic. Returns `None` when the account opted out or has no
/// activity — both are ordinary outcomes, not errors.
pub fn analyze(
    account: &str,
    dates: &[NaiveDate],
    expected_frequency: Option<u32>,
    as_of: NaiveDate,
) -> Option<CoverageReport> {
    let frequency = expected_frequency?;
    let threshold = i64::from(frequency);

    let mut sorted: Vec<NaiveDate> = dates.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    if sorted.is_empty() {
        return None;
    }

    let periods = merge_periods(&sorted, threshold);
    let mut gaps = interior_gaps(&periods, threshold, as_of);

    // Trailing staleness: nothing since the last period, for too long.
    let last = periods[periods.len() - 1];
    let stale_days = (as_of - last.end).num_days();
    if stale_days > threshold {
        gaps.push(Gap {
            start: last.end + Duration::days(1),
            end: as_of,
            days: stale_days,
        });
    }

    Some(CoverageReport {
        account: account.to_string(),
        first_date: periods[0].start,
        last_date: last.end,
        complete: gaps.is_empty(),
        periods,
        gaps,
        expected_frequency: frequency,
    })
}

/// Single left-to-right merge pass over sorted, deduplicated dates. Each date
/// seeds a one-day period; adjacent periods separated by at most `threshold`
/// days are folded into the running open period. `threshold` days apart still
/// merges; `threshold + 1` does not.
fn merge_periods(sorted: &[NaiveDate], threshold: i64) -> Vec<Period> {
    let mut periods = Vec::new();
    let mut open = Period {
        start: sorted[0],
        end: sorted[0],
    };
    for &date in &sorted[1..] {
        let between = (date - open.end).num_days() - 1;
        if between <= threshold {
            open.end = open.end.max(date);
        } else {
            periods.push(open);
            open = Period {
                start: date,
                end: date,
            };
        }
    }
    periods.push(open);
    periods
}

/// Gaps between consecutive merged periods. Gaps lying entirely in the
/// future relative to `as_of` are not reported; a gap that straddles `as_of`
/// is clamped to it but keeps its full day count.
fn interior_gaps(periods: &[Period], threshold: i64, as_of: NaiveDate) -> Vec<Gap> {
    let mut gaps = Vec::new();
    for pair in periods.windows(2) {
        let start = pair[0].end + Duration::days(1);
        let end = pair[1].start - Duration::days(1);
        let days = (end - start).num_days() + 1;
        // The merge pass already absorbed anything within threshold; this
        // re-check keeps the invariant holding even if the merge changes.
        if days <= threshold {
            continue;
        }
        if start > as_of {
            continue;
        }
        gaps.push(Gap {
            start,
            end: end.min(as_of),
            days,
        });
    }
    gaps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_split_into_two_periods_with_gap() {
        let dates = [d(2024, 1, 1), d(2024, 1, 2), d(2024, 1, 10)];
        let report = analyze("Checking", &dates, Some(5), d(2024, 1, 10)).unwrap();
        assert_eq!(
            report.periods,
            vec![
                Period { start: d(2024, 1, 1), end: d(2024, 1, 2) },
                Period { start: d(2024, 1, 10), end: d(2024, 1, 10) },
            ]
        );
        assert_eq!(
            report.gaps,
            vec![Gap { start: d(2024, 1, 3), end: d(2024, 1, 9), days: 7 }]
        );
        assert!(!report.complete);
        assert_eq!(report.first_date, d(2024, 1, 1));
        assert_eq!(report.last_date, d(2024, 1, 10));
    }

    #[test]
    fn test_close_dates_merge_into_one_period() {
        let dates = [d(2024, 1, 1), d(2024, 1, 3)];
        let report = analyze("Checking", &dates, Some(5), d(2024, 1, 5)).unwrap();
        assert_eq!(
            report.periods,
            vec![Period { start: d(2024, 1, 1), end: d(2024, 1, 3) }]
        );
        assert!(report.gaps.is_empty());
        assert!(report.complete);
    }

    #[test]
    fn test_empty_dates_yield_no_report() {
        assert!(analyze("Checking", &[], Some(5), d(2024, 1, 1)).is_none());
    }

    #[test]
    fn test_opt_out_yields_no_report() {
        assert!(analyze("Checking", &[d(2024, 1, 1)], None, d(2024, 1, 1)).is_none());
    }

    #[test]
    fn test_single_date_zero_frequency_trailing_gap() {
        let report = analyze("Checking", &[d(2024, 1, 1)], Some(0), d(2024, 1, 10)).unwrap();
        assert_eq!(
            report.periods,
            vec![Period { start: d(2024, 1, 1), end: d(2024, 1, 1) }]
        );
        assert_eq!(
            report.gaps,
            vec![Gap { start: d(2024, 1, 2), end: d(2024, 1, 10), days: 9 }]
        );
        assert!(!report.complete);
    }

    #[test]
    fn test_duplicate_dates_are_deduplicated() {
        let dates = [d(2024, 2, 1), d(2024, 2, 1), d(2024, 2, 3)];
        let report = analyze("Checking", &dates, Some(1), d(2024, 2, 3)).unwrap();
        assert_eq!(
            report.periods,
            vec![Period { start: d(2024, 2, 1), end: d(2024, 2, 3) }]
        );
        assert!(report.complete);
    }

    #[test]
    fn test_unsorted_input_is_normalized() {
        let dates = [d(2024, 1, 10), d(2024, 1, 1), d(2024, 1, 2)];
        let report = analyze("Checking", &dates, Some(5), d(2024, 1, 10)).unwrap();
        assert_eq!(report.first_date, d(2024, 1, 1));
        assert_eq!(report.last_date, d(2024, 1, 10));
        assert_eq!(report.periods.len(), 2);
    }

    #[test]
    fn test_exactly_threshold_apart_still_merges() {
        // Jan 1 and Jan 7 have 5 clear days between them.
        let dates = [d(2024, 1, 1), d(2024, 1, 7)];
        let report = analyze("Checking", &dates, Some(5), d(2024, 1, 7)).unwrap();
        assert_eq!(
            report.periods,
            vec![Period { start: d(2024, 1, 1), end: d(2024, 1, 7) }]
        );
        assert!(report.complete);
    }

    #[test]
    fn test_one_past_threshold_splits() {
        // Jan 1 and Jan 8 have 6 clear days between them.
        let dates = [d(2024, 1, 1), d(2024, 1, 8)];
        let report = analyze("Checking", &dates, Some(5), d(2024, 1, 8)).unwrap();
        assert_eq!(report.periods.len(), 2);
        assert_eq!(
            report.gaps,
            vec![Gap { start: d(2024, 1, 2), end: d(2024, 1, 7), days: 6 }]
        );
    }

    #[test]
    fn test_exactly_threshold_stale_is_still_complete() {
        let report = analyze("Checking", &[d(2024, 1, 1)], Some(5), d(2024, 1, 6)).unwrap();
        assert!(report.complete, "5 days stale at threshold 5 is not a gap");
    }

    #[test]
    fn test_one_day_past_threshold_stale_is_a_gap() {
        let report = analyze("Checking", &[d(2024, 1, 1)], Some(5), d(2024, 1, 7)).unwrap();
        assert_eq!(
            report.gaps,
            vec![Gap { start: d(2024, 1, 2), end: d(2024, 1, 7), days: 6 }]
        );
    }

    #[test]
    fn test_interior_gap_clamped_to_as_of_keeps_full_days() {
        // Two periods with a 10-day gap, analyzed from inside the gap.
        let dates = [d(2024, 1, 1), d(2024, 1, 12)];
        let report = analyze("Checking", &dates, Some(3), d(2024, 1, 5)).unwrap();
        assert_eq!(report.gaps.len(), 1);
        let gap = report.gaps[0];
        assert_eq!(gap.start, d(2024, 1, 2));
        assert_eq!(gap.end, d(2024, 1, 5), "gap end is clamped to as-of");
        assert_eq!(gap.days, 10, "day count stays unclamped");
    }

    #[test]
    fn test_gap_entirely_in_future_not_reported() {
        // Both the interior gap and any staleness lie after the as-of date.
        let dates = [d(2024, 3, 1), d(2024, 3, 20)];
        let report = analyze("Checking", &dates, Some(3), d(2024, 3, 1)).unwrap();
        assert_eq!(report.periods.len(), 2);
        assert!(report.gaps.is_empty());
        assert!(report.complete);
    }

    #[test]
    fn test_no_gap_starts_after_as_of() {
        let dates = [d(2024, 1, 1), d(2024, 1, 20), d(2024, 2, 15)];
        let as_of = d(2024, 1, 25);
        let report = analyze("Checking", &dates, Some(2), as_of).unwrap();
        assert!(!report.gaps.is_empty());
        assert!(report.gaps.iter().all(|g| g.start <= as_of));
        assert!(report.gaps.iter().all(|g| g.end <= as_of));
    }

    #[test]
    fn test_every_gap_exceeds_threshold() {
        let dates = [
            d(2024, 1, 1),
            d(2024, 1, 5),
            d(2024, 1, 20),
            d(2024, 2, 14),
            d(2024, 2, 15),
        ];
        let report = analyze("Checking", &dates, Some(4), d(2024, 3, 1)).unwrap();
        assert!(!report.gaps.is_empty());
        assert!(report.gaps.iter().all(|g| g.days > 4));
    }

    #[test]
    fn test_merged_periods_are_maximal() {
        let dates = [
            d(2024, 1, 1),
            d(2024, 1, 4),
            d(2024, 1, 9),
            d(2024, 2, 1),
            d(2024, 2, 2),
        ];
        let report = analyze("Checking", &dates, Some(4), d(2024, 2, 2)).unwrap();
        for pair in report.periods.windows(2) {
            let between = (pair[1].start - pair[0].end).num_days() - 1;
            assert!(between > 4, "adjacent periods should not be mergeable");
        }
        // Periods stay sorted and non-overlapping.
        for pair in report.periods.windows(2) {
            assert!(pair[0].end < pair[1].start);
        }
    }

    #[test]
    fn test_complete_iff_no_gaps() {
        let complete = analyze("A", &[d(2024, 1, 1)], Some(5), d(2024, 1, 3)).unwrap();
        assert!(complete.complete);
        assert!(complete.gaps.is_empty());

        let gappy = analyze("A", &[d(2024, 1, 1)], Some(5), d(2024, 3, 1)).unwrap();
        assert!(!gappy.complete);
        assert!(!gappy.gaps.is_empty());
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let dates = [d(2024, 1, 1), d(2024, 1, 9), d(2024, 2, 1)];
        let first = analyze("Checking", &dates, Some(3), d(2024, 2, 10)).unwrap();
        let second = analyze("Checking", &dates, Some(3), d(2024, 2, 10)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_span_endpoints_match_periods() {
        let dates = [d(2023, 12, 28), d(2024, 1, 15), d(2024, 1, 16)];
        let report = analyze("Checking", &dates, Some(7), d(2024, 1, 16)).unwrap();
        assert_eq!(report.first_date, report.periods[0].start);
        assert_eq!(report.last_date, report.periods[report.periods.len() - 1].end);
    }
}
