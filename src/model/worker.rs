use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": 1,
        "name": "John Doe",
        "role": "Engineer",
        "email": "john@example.com",
        "phone": "+1234567890",
        "hourlyRate": 25.0,
        "createdAt": "2024-01-15T08:00:00Z",
        "updatedAt": "2024-01-15T08:00:00Z"
    })
)]
pub struct Worker {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "John Doe")]
    pub name: String,

    #[schema(example = "Engineer")]
    pub role: String,

    #[schema(example = "john@example.com", nullable = true)]
    pub email: Option<String>,

    #[schema(example = "+1234567890", nullable = true)]
    pub phone: Option<String>,

    #[schema(example = 25.0, nullable = true)]
    pub hourly_rate: Option<f64>,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,

    #[schema(value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewWorker {
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "Engineer")]
    pub role: String,
    #[schema(example = "john@example.com")]
    pub email: Option<String>,
    #[schema(example = "+1234567890")]
    pub phone: Option<String>,
    #[schema(example = 25.0)]
    pub hourly_rate: Option<f64>,
}

/// Partial update. Absent fields are left alone; `null` clears the optional ones.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkerPatch {
    pub name: Option<String>,
    pub role: Option<String>,

    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,

    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub phone: Option<Option<String>>,

    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<f64>)]
    pub hourly_rate: Option<Option<f64>>,
}

impl WorkerPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.role.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.hourly_rate.is_none()
    }
}

// A key that is present (even as null) becomes Some(..).
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_distinguishes_missing_from_null() {
        let patch: WorkerPatch =
            serde_json::from_str(r#"{"role": "Welder", "email": null}"#).unwrap();

        assert_eq!(patch.role.as_deref(), Some("Welder"));
        assert_eq!(patch.email, Some(None));
        assert_eq!(patch.phone, None);
        assert!(!patch.is_empty());
    }

    #[test]
    fn empty_patch_is_empty() {
        let patch: WorkerPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());
    }
}
