use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::sqlite::SqliteArguments;
use sqlx::{Arguments, FromRow};

use super::{Merge, Model};
use crate::database::manager::DatabaseError;
use crate::database::schema::Entity;

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct AssignmentFields {
    pub device_id: Option<i64>,
    pub user_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub assigned_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub returned_at: Option<DateTime<Utc>>,
}

/// RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS` (taken as UTC) or a bare date
/// (midnight UTC).
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|text| parse_timestamp(&text).map_err(serde::de::Error::custom))
        .transpose()
}

pub(crate) fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, String> {
    let text = text.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Ok(at.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid timestamp: {}", text))
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Assignment {
    pub id: i64,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: AssignmentFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An assignment with its device and user embedded, as returned by the
/// assignment read endpoints. A dangling reference embeds as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentDetail {
    #[serde(flatten)]
    pub assignment: Assignment,
    #[serde(rename = "Device")]
    pub device: Option<Value>,
    #[serde(rename = "User")]
    pub user: Option<Value>,
}

/// Row shape of the joined assignment query; the embedded records arrive
/// as `json_object(...)` text.
#[derive(Debug, FromRow)]
pub(crate) struct AssignmentDetailRow {
    #[sqlx(flatten)]
    pub assignment: Assignment,
    #[sqlx(rename = "deviceJson")]
    pub device_json: Option<String>,
    #[sqlx(rename = "userJson")]
    pub user_json: Option<String>,
}

impl TryFrom<AssignmentDetailRow> for AssignmentDetail {
    type Error = DatabaseError;

    fn try_from(row: AssignmentDetailRow) -> Result<Self, Self::Error> {
        Ok(Self {
            assignment: row.assignment,
            device: parse_embedded(row.device_json)?,
            user: parse_embedded(row.user_json)?,
        })
    }
}

fn parse_embedded(raw: Option<String>) -> Result<Option<Value>, DatabaseError> {
    raw.map(|text| serde_json::from_str(&text))
        .transpose()
        .map_err(|e| DatabaseError::Decode(e.to_string()))
}

impl Merge for AssignmentFields {
    fn merge(&self, patch: Self) -> Self {
        Self {
            device_id: patch.device_id.or(self.device_id),
            user_id: patch.user_id.or(self.user_id),
            assigned_at: patch.assigned_at.or(self.assigned_at),
            returned_at: patch.returned_at.or(self.returned_at),
        }
    }
}

impl Model for Assignment {
    type Fields = AssignmentFields;

    const ENTITY: Entity = Entity::Assignments;

    const FIELDS: &'static [&'static str] = &["deviceId", "userId", "assignedAt", "returnedAt"];

    fn bind_fields<'q>(fields: &AssignmentFields, args: &mut SqliteArguments<'q>) {
        args.add(fields.device_id);
        args.add(fields.user_id);
        args.add(fields.assigned_at);
        args.add(fields.returned_at);
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn fields(&self) -> &AssignmentFields {
        &self.fields
    }

    fn check_new(fields: &AssignmentFields) -> Result<(), DatabaseError> {
        if fields.device_id.is_none() {
            return Err(DatabaseError::MissingField("deviceId"));
        }
        if fields.user_id.is_none() {
            return Err(DatabaseError::MissingField("userId"));
        }
        if fields.assigned_at.is_none() {
            return Err(DatabaseError::MissingField("assignedAt"));
        }
        Ok(())
    }
}
