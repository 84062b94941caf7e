use chrono::Utc;
use tracing::debug;

use super::Store;
use crate::error::{Result, StoreError, non_negative, required_text};
use crate::model::worker::{NewWorker, Worker, WorkerPatch};
use crate::utils::db_utils::{SqlUpdate, SqlValue};

impl Store {
    /// Inserts a worker and returns the id the database assigned.
    pub async fn add_worker(&self, worker: NewWorker) -> Result<i64> {
        let pool = self.pool()?;

        let name = required_text("name", &worker.name)?;
        let role = required_text("role", &worker.role)?;
        let hourly_rate = worker
            .hourly_rate
            .map(|rate| non_negative("hourlyRate", rate))
            .transpose()?;
        let now = Utc::now();

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO workers (name, role, email, phone, hourly_rate, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&name)
        .bind(&role)
        .bind(worker.email)
        .bind(worker.phone)
        .bind(hourly_rate)
        .bind(now)
        .bind(now)
        .fetch_one(&pool)
        .await?;

        debug!(id, name = %name, role = %role, "Worker added");
        Ok(id)
    }

    /// All workers by name (byte order, so upper case sorts first), then id.
    pub async fn get_all_workers(&self) -> Result<Vec<Worker>> {
        let pool = self.pool()?;

        let workers =
            sqlx::query_as::<_, Worker>("SELECT * FROM workers ORDER BY name ASC, id ASC")
                .fetch_all(&pool)
                .await?;

        Ok(workers)
    }

    pub async fn get_worker_by_id(&self, id: i64) -> Result<Option<Worker>> {
        let pool = self.pool()?;

        let worker = sqlx::query_as::<_, Worker>("SELECT * FROM workers WHERE id = ?")
            .bind(id)
            .fetch_optional(&pool)
            .await?;

        Ok(worker)
    }

    /// Applies only the fields set on `patch` and refreshes `updated_at`.
    pub async fn update_worker(&self, id: i64, patch: WorkerPatch) -> Result<()> {
        let pool = self.pool()?;

        if patch.is_empty() {
            return Err(StoreError::Validation(
                "no fields provided for update".to_string(),
            ));
        }

        let mut update = SqlUpdate::new("workers");
        if let Some(name) = &patch.name {
            update = update.set("name", required_text("name", name)?);
        }
        if let Some(role) = &patch.role {
            update = update.set("role", required_text("role", role)?);
        }
        if let Some(email) = patch.email {
            update = update.set("email", email);
        }
        if let Some(phone) = patch.phone {
            update = update.set("phone", phone);
        }
        if let Some(rate) = patch.hourly_rate {
            let rate = rate.map(|r| non_negative("hourlyRate", r)).transpose()?;
            update = update.set("hourly_rate", rate);
        }
        update = update.set("updated_at", Utc::now());

        let affected = update
            .execute(&pool, "id = ?", vec![SqlValue::Integer(id)])
            .await?;

        if affected == 0 {
            return Err(StoreError::NotFound(format!("worker {id}")));
        }

        debug!(id, "Worker updated");
        Ok(())
    }

    /// Removes the worker together with its attendance records. Deleting a
    /// missing worker succeeds without doing anything.
    pub async fn delete_worker(&self, id: i64) -> Result<()> {
        let pool = self.pool()?;
        let mut tx = pool.begin().await?;

        let records = sqlx::query("DELETE FROM attendance_records WHERE worker_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let workers = sqlx::query("DELETE FROM workers WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        if workers == 0 {
            debug!(id, "Delete skipped, no such worker");
        } else {
            debug!(id, records, "Worker deleted");
        }
        Ok(())
    }

    /// Workers whose name or role contains `query`, ignoring ASCII case.
    pub async fn search_workers(&self, query: &str) -> Result<Vec<Worker>> {
        let pool = self.pool()?;
        let pattern = like_pattern(query);

        let workers = sqlx::query_as::<_, Worker>(
            r#"
            SELECT * FROM workers
            WHERE name LIKE ? ESCAPE '\' OR role LIKE ? ESCAPE '\'
            ORDER BY name ASC, id ASC
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&pool)
        .await?;

        Ok(workers)
    }

    pub async fn count_workers(&self) -> Result<i64> {
        let pool = self.pool()?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM workers")
            .fetch_one(&pool)
            .await?;

        Ok(total)
    }
}

// `%` and `_` in the query are matched literally.
fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
