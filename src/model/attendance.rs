use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    sqlx::Type,
    strum::Display,
    strum::EnumString,
    ToSchema,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
#[sqlx(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    HalfDay,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = 1)]
    pub worker_id: i64,

    #[schema(example = "2024-01-15", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "09:00:00", value_type = Option<String>)]
    pub check_in_time: Option<NaiveTime>,

    #[schema(example = "17:00:00", value_type = Option<String>)]
    pub check_out_time: Option<NaiveTime>,

    #[schema(example = 8.0)]
    pub hours_worked: f64,

    pub status: AttendanceStatus,

    pub notes: Option<String>,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,

    #[schema(value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,
}

/// Full contents of a record for one worker and day. Writing it replaces
/// whatever that worker already has for the day.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewAttendance {
    #[schema(example = 1)]
    pub worker_id: i64,
    #[schema(example = "2024-01-15", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "09:00:00", value_type = Option<String>)]
    pub check_in_time: Option<NaiveTime>,
    #[schema(value_type = Option<String>)]
    pub check_out_time: Option<NaiveTime>,
    #[serde(default)]
    pub hours_worked: f64,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
}

impl NewAttendance {
    pub fn new(worker_id: i64, date: NaiveDate, status: AttendanceStatus) -> Self {
        Self {
            worker_id,
            date,
            check_in_time: None,
            check_out_time: None,
            hours_worked: 0.0,
            status,
            notes: None,
        }
    }
}

/// A record joined with the owning worker's name and role.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceWithWorker {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub record: AttendanceRecord,
    pub worker_name: String,
    pub worker_role: String,
}

/// Fractional hours from `check_in` to `check_out` on the same day.
/// `None` when the check-out comes first; shifts never cross midnight.
pub fn hours_between(check_in: NaiveTime, check_out: NaiveTime) -> Option<f64> {
    let elapsed = check_out.signed_duration_since(check_in);
    if elapsed < chrono::Duration::zero() {
        return None;
    }
    Some(elapsed.num_milliseconds() as f64 / 3_600_000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn t(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn full_shift_is_eight_hours() {
        assert_eq!(hours_between(t(9, 0, 0), t(17, 0, 0)), Some(8.0));
    }

    #[test]
    fn partial_hours_are_fractional() {
        assert_eq!(hours_between(t(8, 15, 0), t(12, 45, 0)), Some(4.5));
        assert_eq!(hours_between(t(9, 0, 0), t(9, 0, 0)), Some(0.0));
    }

    #[test]
    fn check_out_before_check_in_has_no_duration() {
        assert_eq!(hours_between(t(17, 0, 0), t(9, 0, 0)), None);
    }

    #[test]
    fn status_text_is_kebab_case() {
        assert_eq!(AttendanceStatus::HalfDay.to_string(), "half-day");
        assert_eq!(
            AttendanceStatus::from_str("late").unwrap(),
            AttendanceStatus::Late
        );
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::HalfDay).unwrap(),
            r#""half-day""#
        );
        assert!(AttendanceStatus::from_str("on-leave").is_err());
    }
}
