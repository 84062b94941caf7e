use derive_more::Display;

/// Failures surfaced by the store and the attendance service.
#[derive(Debug, Display)]
pub enum StoreError {
    /// The store was used before `open()` or after `close()`.
    #[display(fmt = "store is not initialized")]
    NotInitialized,

    /// A required field was missing or out of range. Nothing was written.
    #[display(fmt = "validation failed: {}", _0)]
    Validation(String),

    /// The targeted row does not exist.
    #[display(fmt = "{} not found", _0)]
    NotFound(String),

    #[display(fmt = "storage error: {}", _0)]
    Storage(sqlx::Error),
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            // the pool is only closed through Store::close
            sqlx::Error::PoolClosed => StoreError::NotInitialized,
            other => StoreError::Storage(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Trims `value` and rejects it when nothing is left.
pub fn required_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Rejects negative, NaN and infinite amounts.
pub fn non_negative(field: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(StoreError::Validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(value)
}
