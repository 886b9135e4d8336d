use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle tags the dashboard knows how to bucket. Matching is exact and
/// case-sensitive everywhere; anything else is stored verbatim and simply
/// never lands in a named bucket.
pub const STATUS_NOT_APPLIED: &str = "Not Applied";
pub const STATUS_APPLIED: &str = "Applied";
pub const STATUS_INTERVIEW: &str = "Interview";
pub const STATUS_OFFER: &str = "Offer";
pub const STATUS_REJECTED: &str = "Rejected";

pub const KNOWN_STATUSES: [&str; 5] = [
    STATUS_NOT_APPLIED,
    STATUS_APPLIED,
    STATUS_INTERVIEW,
    STATUS_OFFER,
    STATUS_REJECTED,
];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_title: String,
    pub company: String,
    pub job_status: Option<String>,
    pub job_source: Option<String>,
    pub application_date: Option<String>,
    pub job_link: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub follow_up_date: Option<String>,
    pub follow_up_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Record dates arrive as client-supplied `YYYY-MM-DD` strings and are stored
/// verbatim. Anything that does not parse is treated as unset by consumers.
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
