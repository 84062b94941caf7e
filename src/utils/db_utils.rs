use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::{Executor, Sqlite};

/// ===============================
/// SQL bindable value enum
/// ===============================
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Integer(i64),
    Real(f64),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(DateTime<Utc>),
    Null,
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Real(v)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(v: NaiveDate) -> Self {
        SqlValue::Date(v)
    }
}

impl From<NaiveTime> for SqlValue {
    fn from(v: NaiveTime) -> Self {
        SqlValue::Time(v)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(v: DateTime<Utc>) -> Self {
        SqlValue::Timestamp(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(SqlValue::Null, Into::into)
    }
}

/// ===============================
/// Dynamic UPDATE builder
/// ===============================
/// Collects `column = ?` assignments for one table; the filter and its keys
/// are supplied when the statement runs.
#[derive(Debug)]
pub struct SqlUpdate {
    table: &'static str,
    assignments: Vec<(&'static str, SqlValue)>,
}

impl SqlUpdate {
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            assignments: Vec::new(),
        }
    }

    pub fn set(mut self, column: &'static str, value: impl Into<SqlValue>) -> Self {
        self.assignments.push((column, value.into()));
        self
    }

    pub fn to_sql(&self, filter: &str) -> String {
        let set_clause = self
            .assignments
            .iter()
            .map(|(column, _)| format!("{} = ?", column))
            .collect::<Vec<_>>()
            .join(", ");

        format!("UPDATE {} SET {} WHERE {}", self.table, set_clause, filter)
    }

    /// ===============================
    /// Execute the update
    /// ===============================
    /// Returns the number of rows the filter matched.
    pub async fn execute<'c, E>(
        self,
        executor: E,
        filter: &str,
        keys: Vec<SqlValue>,
    ) -> Result<u64, sqlx::Error>
    where
        E: Executor<'c, Database = Sqlite>,
    {
        let sql = self.to_sql(filter);
        let mut query = sqlx::query(&sql);

        let values = self.assignments.into_iter().map(|(_, v)| v).chain(keys);
        for value in values {
            query = match value {
                SqlValue::Text(v) => query.bind(v),
                SqlValue::Integer(v) => query.bind(v),
                SqlValue::Real(v) => query.bind(v),
                SqlValue::Date(v) => query.bind(v),
                SqlValue::Time(v) => query.bind(v),
                SqlValue::Timestamp(v) => query.bind(v),
                SqlValue::Null => query.bind(None::<String>),
            };
        }

        let result = query.execute(executor).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_set_clause_in_insertion_order() {
        let update = SqlUpdate::new("workers")
            .set("name", "Ada".to_string())
            .set("email", None::<String>)
            .set("hourly_rate", 30.0);

        assert_eq!(
            update.to_sql("id = ?"),
            "UPDATE workers SET name = ?, email = ?, hourly_rate = ? WHERE id = ?"
        );
    }

    #[test]
    fn optional_values_become_null() {
        assert_eq!(SqlValue::from(None::<f64>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some(2.5)), SqlValue::Real(2.5));
    }
}
