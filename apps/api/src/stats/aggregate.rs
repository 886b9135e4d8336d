#![allow(dead_code)]

//! Dashboard statistics: one pure pass over a user's application records.
//!
//! Every invocation re-scans the full record set; there is no cache and no
//! incremental update, so the summary can never be stale relative to the
//! records the caller just fetched. The clock is an explicit parameter:
//! handlers read `Utc::now()` once and pass the date down, nothing in here
//! touches wall-clock time.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::application::{
    parse_record_date, ApplicationRow, STATUS_APPLIED, STATUS_INTERVIEW, STATUS_NOT_APPLIED,
    STATUS_OFFER, STATUS_REJECTED,
};

/// Sentinel returned when no record carries a non-empty source.
pub const NO_SOURCE: &str = "N/A";

/// Per-tag record counts. A record whose status is absent or does not exactly
/// match a known tag increments none of these, so `sum()` can be less than
/// the record total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub not_applied: u32,
    pub applied: u32,
    pub interview: u32,
    pub offer: u32,
    pub rejected: u32,
}

impl StatusCounts {
    /// Exact, case-sensitive bucket lookup. No trimming, no lowercasing:
    /// `"applied"` and `"Applied "` are unrecognized on purpose.
    fn record(&mut self, status: &str) {
        match status {
            STATUS_NOT_APPLIED => self.not_applied += 1,
            STATUS_APPLIED => self.applied += 1,
            STATUS_INTERVIEW => self.interview += 1,
            STATUS_OFFER => self.offer += 1,
            STATUS_REJECTED => self.rejected += 1,
            _ => {}
        }
    }

    pub fn sum(&self) -> u32 {
        self.not_applied + self.applied + self.interview + self.offer + self.rejected
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    /// Count of all input records, valid or not.
    pub total: u32,
    pub status_counts: StatusCounts,
    /// Percent of records that reached Interview or Offer, rounded.
    pub response_rate: u32,
    /// Percent of records marked Rejected, rounded. The denominator is the
    /// full record total, not interviews+offers+rejected.
    pub rejection_rate: u32,
    /// Most frequent non-empty source; ties go to the source seen first.
    pub top_source: String,
    /// Records per calendar month (Jan..Dec) of `today`'s year. Other years
    /// are excluded entirely, not carried over.
    pub monthly_counts: [u32; 12],
    /// `monthly_counts` entry for `today`'s month, duplicated for the
    /// dashboard's headline card.
    pub current_month_count: u32,
    /// Mean days from application date to `today` across Interview/Offer
    /// records, rounded; `None` when no record qualifies. Future-dated
    /// records subtract from the mean rather than being clamped.
    pub avg_response_time_days: Option<i64>,
}

/// Folds a set of application records into the dashboard summary.
///
/// Order-independent except for the top-source tie-break, which is pinned to
/// first-encountered-in-iteration-order. Malformed records never fail the
/// pass: an unparseable `application_date` drops the record from the monthly
/// and response-time figures only, and it still counts toward `total` and
/// whatever fields it does carry.
pub fn aggregate(records: &[ApplicationRow], today: NaiveDate) -> StatsSummary {
    let total = records.len() as u32;
    let mut status_counts = StatusCounts::default();
    let mut monthly_counts = [0u32; 12];
    // Source tallies in first-seen order; the index map keeps the pass O(n).
    let mut source_tallies: Vec<(String, u32)> = Vec::new();
    let mut source_index: HashMap<String, usize> = HashMap::new();
    let mut total_response_days: i64 = 0;
    let mut response_count: u32 = 0;

    for record in records {
        if let Some(status) = record.job_status.as_deref() {
            status_counts.record(status);
        }

        if let Some(source) = record.job_source.as_deref() {
            if !source.is_empty() {
                match source_index.get(source) {
                    Some(&i) => source_tallies[i].1 += 1,
                    None => {
                        source_index.insert(source.to_string(), source_tallies.len());
                        source_tallies.push((source.to_string(), 1));
                    }
                }
            }
        }

        let Some(date) = record.application_date.as_deref().and_then(parse_record_date) else {
            continue;
        };

        if date.year() == today.year() {
            monthly_counts[date.month0() as usize] += 1;
        }

        if matches!(
            record.job_status.as_deref(),
            Some(STATUS_INTERVIEW) | Some(STATUS_OFFER)
        ) {
            total_response_days += (today - date).num_days();
            response_count += 1;
        }
    }

    let top_source = source_tallies
        .iter()
        .fold(None::<&(String, u32)>, |best, candidate| match best {
            Some(b) if candidate.1 > b.1 => Some(candidate),
            None => Some(candidate),
            _ => best,
        })
        .map(|(name, _)| name.clone())
        .unwrap_or_else(|| NO_SOURCE.to_string());

    let avg_response_time_days = if response_count > 0 {
        Some((total_response_days as f64 / f64::from(response_count)).round() as i64)
    } else {
        None
    };

    StatsSummary {
        total,
        response_rate: percentage(status_counts.interview + status_counts.offer, total),
        rejection_rate: percentage(status_counts.rejected, total),
        top_source,
        current_month_count: monthly_counts[today.month0() as usize],
        monthly_counts,
        avg_response_time_days,
        status_counts,
    }
}

fn percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((f64::from(part) / f64::from(whole)) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use crate::models::application::KNOWN_STATUSES;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn record(status: Option<&str>, source: Option<&str>, date: Option<&str>) -> ApplicationRow {
        ApplicationRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            job_title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            job_status: status.map(str::to_string),
            job_source: source.map(str::to_string),
            application_date: date.map(str::to_string),
            job_link: None,
            location: None,
            notes: None,
            follow_up_date: None,
            follow_up_completed: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn days_before(reference: NaiveDate, days: i64) -> String {
        (reference - Duration::days(days)).format("%Y-%m-%d").to_string()
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let summary = aggregate(&[], today());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.status_counts, StatusCounts::default());
        assert_eq!(summary.response_rate, 0);
        assert_eq!(summary.rejection_rate, 0);
        assert_eq!(summary.top_source, NO_SOURCE);
        assert_eq!(summary.monthly_counts, [0; 12]);
        assert_eq!(summary.current_month_count, 0);
        assert_eq!(summary.avg_response_time_days, None);
    }

    #[test]
    fn test_total_counts_every_record_regardless_of_validity() {
        let records = vec![
            record(None, None, None),
            record(Some("garbage status"), None, Some("not-a-date")),
            record(Some("Applied"), Some("LinkedIn"), Some("2025-01-10")),
        ];
        assert_eq!(aggregate(&records, today()).total, 3);
    }

    #[test]
    fn test_each_known_tag_lands_in_its_bucket() {
        let records: Vec<_> = KNOWN_STATUSES
            .iter()
            .copied()
            .map(|s| record(Some(s), None, None))
            .collect();
        let summary = aggregate(&records, today());
        assert_eq!(summary.status_counts.not_applied, 1);
        assert_eq!(summary.status_counts.applied, 1);
        assert_eq!(summary.status_counts.interview, 1);
        assert_eq!(summary.status_counts.offer, 1);
        assert_eq!(summary.status_counts.rejected, 1);
        assert_eq!(summary.status_counts.sum(), summary.total);
    }

    #[test]
    fn test_unrecognized_status_excluded_from_buckets_but_not_total() {
        let records = vec![
            record(Some("Ghosted"), None, None),
            record(Some("Applied"), None, None),
        ];
        let summary = aggregate(&records, today());
        assert_eq!(summary.total, 2);
        assert_eq!(summary.status_counts.sum(), 1);
    }

    #[test]
    fn test_status_matching_is_case_sensitive() {
        // No normalization before lookup: lowercase and padded variants are
        // excluded from buckets, only exact tags count.
        let records = vec![
            record(Some("applied"), None, None),
            record(Some("Applied "), None, None),
            record(Some("Applied"), None, None),
        ];
        let summary = aggregate(&records, today());
        assert_eq!(summary.total, 3);
        assert_eq!(summary.status_counts.applied, 1);
        assert_eq!(summary.status_counts.sum(), 1);
    }

    #[test]
    fn test_response_rate_counts_interviews_and_offers_over_total() {
        let mut records = Vec::new();
        for _ in 0..3 {
            records.push(record(Some("Interview"), None, None));
        }
        for _ in 0..2 {
            records.push(record(Some("Offer"), None, None));
        }
        for _ in 0..5 {
            records.push(record(Some("Applied"), None, None));
        }
        let summary = aggregate(&records, today());
        assert_eq!(summary.response_rate, 50);
    }

    #[test]
    fn test_rejection_rate_uses_total_denominator() {
        let mut records = Vec::new();
        for _ in 0..4 {
            records.push(record(Some("Rejected"), None, None));
        }
        for _ in 0..6 {
            records.push(record(Some("Applied"), None, None));
        }
        let summary = aggregate(&records, today());
        assert_eq!(summary.rejection_rate, 40);
    }

    #[test]
    fn test_rates_round_to_nearest_integer() {
        let records = vec![
            record(Some("Interview"), None, None),
            record(Some("Applied"), None, None),
            record(Some("Applied"), None, None),
        ];
        // 1/3 -> 33.33 -> 33
        assert_eq!(aggregate(&records, today()).response_rate, 33);
    }

    #[test]
    fn test_top_source_tie_goes_to_first_encountered() {
        let records = vec![
            record(None, Some("A"), None),
            record(None, Some("B"), None),
            record(None, Some("A"), None),
            record(None, Some("B"), None),
        ];
        assert_eq!(aggregate(&records, today()).top_source, "A");

        let reversed = vec![
            record(None, Some("B"), None),
            record(None, Some("A"), None),
            record(None, Some("B"), None),
            record(None, Some("A"), None),
        ];
        assert_eq!(aggregate(&reversed, today()).top_source, "B");
    }

    #[test]
    fn test_top_source_strict_majority_wins_regardless_of_order() {
        let records = vec![
            record(None, Some("Referral"), None),
            record(None, Some("LinkedIn"), None),
            record(None, Some("LinkedIn"), None),
        ];
        assert_eq!(aggregate(&records, today()).top_source, "LinkedIn");
    }

    #[test]
    fn test_empty_string_source_is_ignored() {
        let records = vec![record(None, Some(""), None), record(None, Some(""), None)];
        assert_eq!(aggregate(&records, today()).top_source, NO_SOURCE);
    }

    #[test]
    fn test_monthly_buckets_cover_current_year_only() {
        let records = vec![
            record(Some("Applied"), None, Some("2025-01-05")),
            record(Some("Applied"), None, Some("2025-06-01")),
            record(Some("Applied"), None, Some("2024-06-01")),
        ];
        let summary = aggregate(&records, today());
        assert_eq!(summary.total, 3);
        assert_eq!(summary.monthly_counts[0], 1);
        assert_eq!(summary.monthly_counts[5], 1);
        assert_eq!(summary.monthly_counts.iter().sum::<u32>(), 2);
    }

    #[test]
    fn test_current_month_count_matches_its_bucket() {
        let records = vec![
            record(Some("Applied"), None, Some("2025-06-01")),
            record(Some("Applied"), None, Some("2025-06-20")),
            record(Some("Applied"), None, Some("2025-05-30")),
        ];
        let summary = aggregate(&records, today());
        assert_eq!(summary.current_month_count, 2);
        assert_eq!(
            summary.current_month_count,
            summary.monthly_counts[today().month0() as usize]
        );
    }

    #[test]
    fn test_malformed_date_skips_date_buckets_only() {
        let records = vec![record(Some("Offer"), Some("LinkedIn"), Some("not-a-date"))];
        let summary = aggregate(&records, today());
        assert_eq!(summary.total, 1);
        assert_eq!(summary.status_counts.offer, 1);
        assert_eq!(summary.top_source, "LinkedIn");
        assert_eq!(summary.monthly_counts, [0; 12]);
        assert_eq!(summary.avg_response_time_days, None);
    }

    #[test]
    fn test_avg_response_time_is_rounded_mean_of_day_gaps() {
        let records = vec![
            record(Some("Offer"), None, Some(&days_before(today(), 10))),
            record(Some("Offer"), None, Some(&days_before(today(), 20))),
        ];
        assert_eq!(aggregate(&records, today()).avg_response_time_days, Some(15));
    }

    #[test]
    fn test_avg_response_time_ignores_other_statuses() {
        let records = vec![
            record(Some("Rejected"), None, Some(&days_before(today(), 40))),
            record(Some("Applied"), None, Some(&days_before(today(), 40))),
            record(Some("Interview"), None, Some(&days_before(today(), 8))),
        ];
        assert_eq!(aggregate(&records, today()).avg_response_time_days, Some(8));
    }

    #[test]
    fn test_future_dated_offer_pulls_average_negative() {
        // A future application date yields a negative gap and is accumulated
        // as-is rather than clamped.
        let records = vec![record(Some("Offer"), None, Some(&days_before(today(), -6)))];
        assert_eq!(aggregate(&records, today()).avg_response_time_days, Some(-6));
    }

    #[test]
    fn test_aggregate_is_deterministic() {
        let records = vec![
            record(Some("Applied"), Some("LinkedIn"), Some("2025-03-04")),
            record(Some("Offer"), Some("Referral"), Some("2025-02-11")),
            record(Some("weird"), None, Some("never")),
        ];
        assert_eq!(aggregate(&records, today()), aggregate(&records, today()));
    }
}
