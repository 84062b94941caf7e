use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use tracing::{debug, info};

use crate::db::Store;
use crate::error::{Result, StoreError};
use crate::model::attendance::{
    AttendanceRecord, AttendanceStatus, AttendanceWithWorker, NewAttendance, hours_between,
};
use crate::model::stats::{
    MonthlyStats, TodayStats, WeeklySummary, WorkerWeek, month_bounds, week_bounds,
};

/// Source of the current local date and time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// Time of day, truncated to whole seconds.
    fn time(&self) -> NaiveTime {
        let time = self.now().time();
        time.with_nanosecond(0).unwrap_or(time)
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Attendance statistics and the daily check-in/check-out flow, on top of
/// a [`Store`].
pub struct AttendanceService {
    store: Store,
    clock: Box<dyn Clock>,
}

impl AttendanceService {
    pub fn new(store: Store) -> Self {
        Self::with_clock(store, SystemClock)
    }

    pub fn with_clock(store: Store, clock: impl Clock + 'static) -> Self {
        Self {
            store,
            clock: Box::new(clock),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Worker total plus today's present/absent/late record counts. Workers
    /// without a record today are in none of the three.
    pub async fn get_today_attendance_stats(&self) -> Result<TodayStats> {
        let today = self.today();
        let total_workers = self.store.count_workers().await?;
        let counts = self.store.count_by_status(today).await?;

        Ok(TodayStats::new(total_workers, counts))
    }

    /// Status breakdown of one worker's records in a calendar month.
    pub async fn get_monthly_attendance_stats(
        &self,
        worker_id: i64,
        year: i32,
        month: u32,
    ) -> Result<MonthlyStats> {
        let (start, end) = month_bounds(year, month)
            .ok_or_else(|| StoreError::Validation(format!("invalid month {year}-{month}")))?;

        let counts = self
            .store
            .count_worker_status_between(worker_id, start, end)
            .await?;

        Ok(MonthlyStats::from(counts))
    }

    /// Opens today's shift for the worker, at `time` or now.
    ///
    /// Any earlier check-out and hours for today are cleared so the record is
    /// open again; notes are kept.
    pub async fn check_in(&self, worker_id: i64, time: Option<NaiveTime>) -> Result<i64> {
        let today = self.today();
        let check_in_time = time.unwrap_or_else(|| self.clock.time());

        let notes = self
            .store
            .get_attendance(worker_id, today)
            .await?
            .and_then(|existing| existing.notes);

        let id = self
            .store
            .record_attendance(NewAttendance {
                check_in_time: Some(check_in_time),
                notes,
                ..NewAttendance::new(worker_id, today, AttendanceStatus::Present)
            })
            .await?;

        info!(worker_id, date = %today, time = %check_in_time, "Checked in");
        Ok(id)
    }

    /// Closes today's open shift and returns the updated record.
    ///
    /// Returns `Ok(None)` without writing when the worker has no record
    /// today, never checked in, or already checked out.
    pub async fn check_out(
        &self,
        worker_id: i64,
        time: Option<NaiveTime>,
    ) -> Result<Option<AttendanceRecord>> {
        let today = self.today();
        let check_out_time = time.unwrap_or_else(|| self.clock.time());

        let check_in_time = match self.store.get_attendance(worker_id, today).await? {
            Some(AttendanceRecord {
                check_in_time: Some(check_in_time),
                check_out_time: None,
                ..
            }) => check_in_time,
            _ => {
                debug!(worker_id, date = %today, "No open check-in, check-out skipped");
                return Ok(None);
            }
        };

        let hours_worked = hours_between(check_in_time, check_out_time).ok_or_else(|| {
            StoreError::Validation(format!(
                "check-out {check_out_time} is before check-in {check_in_time}"
            ))
        })?;

        self.store
            .close_attendance(worker_id, today, check_out_time, hours_worked)
            .await?;

        info!(worker_id, date = %today, hours_worked, "Checked out");
        self.store.get_attendance(worker_id, today).await
    }

    /// Records an explicit absence, today unless `date` is given.
    pub async fn mark_absent(
        &self,
        worker_id: i64,
        date: Option<NaiveDate>,
        notes: Option<String>,
    ) -> Result<i64> {
        let date = date.unwrap_or_else(|| self.today());

        self.store
            .record_attendance(NewAttendance {
                notes,
                ..NewAttendance::new(worker_id, date, AttendanceStatus::Absent)
            })
            .await
    }

    pub async fn get_worker_attendance(
        &self,
        worker_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>> {
        self.store.get_worker_attendance(worker_id, start, end).await
    }

    pub async fn get_attendance_by_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceWithWorker>> {
        self.store.get_attendance_by_date(date).await
    }

    /// Per-worker totals for the Monday-to-Sunday week containing `date`.
    pub async fn get_weekly_summary(&self, date: NaiveDate) -> Result<WeeklySummary> {
        let (week_start, week_end) = week_bounds(date);
        let workers = self.store.get_all_workers().await?;

        let mut summaries = Vec::with_capacity(workers.len());
        for worker in workers {
            let records = self
                .store
                .get_worker_attendance(worker.id, week_start, week_end)
                .await?;
            summaries.push(WorkerWeek::from_records(
                worker.id,
                worker.name,
                worker.role,
                &records,
            ));
        }

        Ok(WeeklySummary {
            week_start,
            week_end,
            workers: summaries,
        })
    }
}
