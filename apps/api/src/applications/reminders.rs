use chrono::NaiveDate;

use crate::models::application::{parse_record_date, ApplicationRow};

/// Filters the records whose follow-up is due: a parseable `follow_up_date`
/// on or before `today` that has not been marked completed. Sorted soonest
/// first. Malformed or absent dates drop the record from the result, never
/// fail the call.
pub fn due_follow_ups(records: &[ApplicationRow], today: NaiveDate) -> Vec<ApplicationRow> {
    let mut due: Vec<(NaiveDate, ApplicationRow)> = records
        .iter()
        .filter(|record| !record.follow_up_completed)
        .filter_map(|record| {
            let date = record.follow_up_date.as_deref().and_then(parse_record_date)?;
            (date <= today).then(|| (date, record.clone()))
        })
        .collect();
    due.sort_by_key(|(date, _)| *date);
    due.into_iter().map(|(_, record)| record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn record(follow_up_date: Option<&str>, completed: bool) -> ApplicationRow {
        ApplicationRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            job_title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            job_status: Some("Applied".to_string()),
            job_source: None,
            application_date: None,
            job_link: None,
            location: None,
            notes: None,
            follow_up_date: follow_up_date.map(str::to_string),
            follow_up_completed: completed,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_due_includes_today_and_overdue_only() {
        let records = vec![
            record(Some("2025-06-15"), false),
            record(Some("2025-06-10"), false),
            record(Some("2025-06-16"), false),
        ];
        let due = due_follow_ups(&records, today());
        assert_eq!(due.len(), 2);
    }

    #[test]
    fn test_completed_follow_ups_are_excluded() {
        let records = vec![
            record(Some("2025-06-01"), true),
            record(Some("2025-06-01"), false),
        ];
        assert_eq!(due_follow_ups(&records, today()).len(), 1);
    }

    #[test]
    fn test_malformed_or_missing_dates_are_skipped() {
        let records = vec![
            record(Some("soonish"), false),
            record(None, false),
            record(Some("2025-06-14"), false),
        ];
        let due = due_follow_ups(&records, today());
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].follow_up_date.as_deref(), Some("2025-06-14"));
    }

    #[test]
    fn test_sorted_soonest_first() {
        let records = vec![
            record(Some("2025-06-14"), false),
            record(Some("2025-05-01"), false),
            record(Some("2025-06-02"), false),
        ];
        let due = due_follow_ups(&records, today());
        let dates: Vec<_> = due
            .iter()
            .map(|r| r.follow_up_date.as_deref().unwrap())
            .collect();
        assert_eq!(dates, vec!["2025-05-01", "2025-06-02", "2025-06-14"]);
    }
}
