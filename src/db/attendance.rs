use chrono::{NaiveDate, NaiveTime, Utc};
use tracing::debug;

use super::Store;
use crate::error::{Result, StoreError, non_negative};
use crate::model::attendance::{
    AttendanceRecord, AttendanceStatus, AttendanceWithWorker, NewAttendance,
};
use crate::model::stats::StatusCounts;
use crate::utils::db_utils::{SqlUpdate, SqlValue};

impl Store {
    /// Writes the worker's record for `record.date`, replacing every field of
    /// an existing one. The existing row keeps its id and `created_at`.
    pub async fn record_attendance(&self, record: NewAttendance) -> Result<i64> {
        let pool = self.pool()?;
        let hours_worked = non_negative("hoursWorked", record.hours_worked)?;
        let now = Utc::now();

        let mut tx = pool.begin().await?;

        let worker = sqlx::query_scalar::<_, i64>("SELECT id FROM workers WHERE id = ?")
            .bind(record.worker_id)
            .fetch_optional(&mut *tx)
            .await?;
        if worker.is_none() {
            return Err(StoreError::NotFound(format!("worker {}", record.worker_id)));
        }

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO attendance_records
                (worker_id, date, check_in_time, check_out_time, hours_worked,
                 status, notes, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (worker_id, date) DO UPDATE SET
                check_in_time = excluded.check_in_time,
                check_out_time = excluded.check_out_time,
                hours_worked = excluded.hours_worked,
                status = excluded.status,
                notes = excluded.notes,
                updated_at = excluded.updated_at
            RETURNING id
            "#,
        )
        .bind(record.worker_id)
        .bind(record.date)
        .bind(record.check_in_time)
        .bind(record.check_out_time)
        .bind(hours_worked)
        .bind(record.status)
        .bind(record.notes)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(
            id,
            worker_id = record.worker_id,
            date = %record.date,
            status = %record.status,
            "Attendance recorded"
        );
        Ok(id)
    }

    /// The worker's record for one day, if any.
    pub async fn get_attendance(
        &self,
        worker_id: i64,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>> {
        let pool = self.pool()?;

        let record = sqlx::query_as::<_, AttendanceRecord>(
            "SELECT * FROM attendance_records WHERE worker_id = ? AND date = ?",
        )
        .bind(worker_id)
        .bind(date)
        .fetch_optional(&pool)
        .await?;

        Ok(record)
    }

    /// Sets the check-out time and hours of an existing record without
    /// touching its other fields. Returns whether a record was updated.
    pub async fn close_attendance(
        &self,
        worker_id: i64,
        date: NaiveDate,
        check_out_time: NaiveTime,
        hours_worked: f64,
    ) -> Result<bool> {
        let pool = self.pool()?;
        let hours_worked = non_negative("hoursWorked", hours_worked)?;

        let affected = SqlUpdate::new("attendance_records")
            .set("check_out_time", check_out_time)
            .set("hours_worked", hours_worked)
            .set("updated_at", Utc::now())
            .execute(
                &pool,
                "worker_id = ? AND date = ?",
                vec![SqlValue::Integer(worker_id), SqlValue::Date(date)],
            )
            .await?;

        debug!(worker_id, date = %date, hours_worked, affected, "Attendance closed");
        Ok(affected > 0)
    }

    /// Every record for `date` with its worker's name and role, by worker name.
    pub async fn get_attendance_by_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceWithWorker>> {
        let pool = self.pool()?;

        let records = sqlx::query_as::<_, AttendanceWithWorker>(
            r#"
            SELECT ar.*, w.name AS worker_name, w.role AS worker_role
            FROM attendance_records ar
            JOIN workers w ON ar.worker_id = w.id
            WHERE ar.date = ?
            ORDER BY w.name ASC, w.id ASC
            "#,
        )
        .bind(date)
        .fetch_all(&pool)
        .await?;

        Ok(records)
    }

    /// The worker's records with `start <= date <= end`, newest first.
    pub async fn get_worker_attendance(
        &self,
        worker_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>> {
        let pool = self.pool()?;

        let records = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            SELECT * FROM attendance_records
            WHERE worker_id = ? AND date BETWEEN ? AND ?
            ORDER BY date DESC
            "#,
        )
        .bind(worker_id)
        .bind(start)
        .bind(end)
        .fetch_all(&pool)
        .await?;

        Ok(records)
    }

    /// Records per status for one day, across all workers.
    pub async fn count_by_status(&self, date: NaiveDate) -> Result<StatusCounts> {
        let pool = self.pool()?;

        let rows = sqlx::query_as::<_, (AttendanceStatus, i64)>(
            r#"
            SELECT status, COUNT(*) FROM attendance_records
            WHERE date = ?
            GROUP BY status
            "#,
        )
        .bind(date)
        .fetch_all(&pool)
        .await?;

        Ok(rows.into_iter().collect())
    }

    /// Records per status for one worker between two dates, inclusive.
    pub async fn count_worker_status_between(
        &self,
        worker_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<StatusCounts> {
        let pool = self.pool()?;

        let rows = sqlx::query_as::<_, (AttendanceStatus, i64)>(
            r#"
            SELECT status, COUNT(*) FROM attendance_records
            WHERE worker_id = ? AND date BETWEEN ? AND ?
            GROUP BY status
            "#,
        )
        .bind(worker_id)
        .bind(start)
        .bind(end)
        .fetch_all(&pool)
        .await?;

        Ok(rows.into_iter().collect())
    }
}
