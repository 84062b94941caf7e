use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};

/// Record counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub present: i64,
    pub absent: i64,
    pub late: i64,
    pub half_day: i64,
}

impl StatusCounts {
    pub fn add(&mut self, status: AttendanceStatus, count: i64) {
        match status {
            AttendanceStatus::Present => self.present += count,
            AttendanceStatus::Absent => self.absent += count,
            AttendanceStatus::Late => self.late += count,
            AttendanceStatus::HalfDay => self.half_day += count,
        }
    }

    pub fn total(&self) -> i64 {
        self.present + self.absent + self.late + self.half_day
    }
}

impl FromIterator<(AttendanceStatus, i64)> for StatusCounts {
    fn from_iter<I: IntoIterator<Item = (AttendanceStatus, i64)>>(iter: I) -> Self {
        let mut counts = StatusCounts::default();
        for (status, count) in iter {
            counts.add(status, count);
        }
        counts
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodayStats {
    #[schema(example = 10)]
    pub total_workers: i64,
    #[schema(example = 8)]
    pub present_today: i64,
    #[schema(example = 2)]
    pub absent_today: i64,
    #[schema(example = 0)]
    pub late_today: i64,
}

impl TodayStats {
    pub fn new(total_workers: i64, counts: StatusCounts) -> Self {
        Self {
            total_workers,
            present_today: counts.present,
            absent_today: counts.absent,
            late_today: counts.late,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStats {
    /// Records in the month, half days included.
    #[schema(example = 26)]
    pub total_days: i64,
    #[schema(example = 20)]
    pub present_days: i64,
    #[schema(example = 5)]
    pub absent_days: i64,
    #[schema(example = 1)]
    pub late_days: i64,
    #[schema(example = 0)]
    pub half_day_days: i64,
    /// Share of records marked present or late, in percent.
    #[schema(example = 80.77)]
    pub attendance_rate: f64,
}

impl From<StatusCounts> for MonthlyStats {
    fn from(counts: StatusCounts) -> Self {
        let total = counts.total();
        let attendance_rate = if total == 0 {
            0.0
        } else {
            (counts.present + counts.late) as f64 * 100.0 / total as f64
        };

        Self {
            total_days: total,
            present_days: counts.present,
            absent_days: counts.absent,
            late_days: counts.late,
            half_day_days: counts.half_day,
            attendance_rate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum WeekRating {
    Perfect,
    Good,
    Poor,
}

impl WeekRating {
    pub fn from_days(days_present: usize, days_recorded: usize) -> Self {
        if days_present >= days_recorded {
            WeekRating::Perfect
        } else if days_present as f64 >= days_recorded as f64 * 0.8 {
            WeekRating::Good
        } else {
            WeekRating::Poor
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkerWeek {
    pub worker_id: i64,
    pub worker_name: String,
    pub worker_role: String,
    pub days_present: usize,
    pub days_recorded: usize,
    pub total_hours: f64,
    pub rating: WeekRating,
}

impl WorkerWeek {
    pub fn from_records(
        worker_id: i64,
        worker_name: String,
        worker_role: String,
        records: &[AttendanceRecord],
    ) -> Self {
        let days_present = records
            .iter()
            .filter(|r| r.status == AttendanceStatus::Present)
            .count();
        let total_hours = records.iter().map(|r| r.hours_worked).sum();

        Self {
            worker_id,
            worker_name,
            worker_role,
            days_present,
            days_recorded: records.len(),
            total_hours,
            rating: WeekRating::from_days(days_present, records.len()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    #[schema(example = "2024-01-15", value_type = String, format = "date")]
    pub week_start: NaiveDate,
    #[schema(example = "2024-01-21", value_type = String, format = "date")]
    pub week_end: NaiveDate,
    pub workers: Vec<WorkerWeek>,
}

/// Monday and Sunday of the week containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let week = date.week(Weekday::Mon);
    (week.first_day(), week.last_day())
}

/// First and last day of a calendar month, `None` for an invalid month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next.pred_opt()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn month_bounds_follow_calendar() {
        assert_eq!(month_bounds(2024, 1), Some((d(2024, 1, 1), d(2024, 1, 31))));
        assert_eq!(month_bounds(2024, 2), Some((d(2024, 2, 1), d(2024, 2, 29))));
        assert_eq!(month_bounds(2023, 2), Some((d(2023, 2, 1), d(2023, 2, 28))));
        assert_eq!(
            month_bounds(2024, 12),
            Some((d(2024, 12, 1), d(2024, 12, 31)))
        );
        assert_eq!(month_bounds(2024, 13), None);
        assert_eq!(month_bounds(2024, 0), None);
    }

    #[test]
    fn week_runs_monday_to_sunday() {
        // 2024-01-17 is a Wednesday
        assert_eq!(week_bounds(d(2024, 1, 17)), (d(2024, 1, 15), d(2024, 1, 21)));
        // a Sunday belongs to the week that started six days earlier
        assert_eq!(week_bounds(d(2024, 1, 21)), (d(2024, 1, 15), d(2024, 1, 21)));
        assert_eq!(week_bounds(d(2024, 1, 15)), (d(2024, 1, 15), d(2024, 1, 21)));
    }

    #[test]
    fn half_days_only_count_toward_total() {
        let counts: StatusCounts = [
            (AttendanceStatus::Present, 3),
            (AttendanceStatus::HalfDay, 1),
        ]
        .into_iter()
        .collect();
        let stats = MonthlyStats::from(counts);

        assert_eq!(stats.total_days, 4);
        assert_eq!(stats.present_days, 3);
        assert_eq!(stats.half_day_days, 1);
        assert_eq!(stats.attendance_rate, 75.0);
    }

    #[test]
    fn empty_month_has_zero_rate() {
        let stats = MonthlyStats::from(StatusCounts::default());
        assert_eq!(stats.total_days, 0);
        assert_eq!(stats.attendance_rate, 0.0);
    }

    #[test]
    fn week_rating_thresholds() {
        assert_eq!(WeekRating::from_days(5, 5), WeekRating::Perfect);
        assert_eq!(WeekRating::from_days(0, 0), WeekRating::Perfect);
        assert_eq!(WeekRating::from_days(4, 5), WeekRating::Good);
        assert_eq!(WeekRating::from_days(3, 5), WeekRating::Poor);
    }
}
