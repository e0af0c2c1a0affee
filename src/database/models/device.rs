use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteArguments;
use sqlx::{Arguments, FromRow};

use super::{Merge, Model};
use crate::database::schema::Entity;

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct DeviceFields {
    pub name: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub device_type: Option<String>,
    pub serial_number: Option<String>,
    pub status: Option<String>,
    pub location: Option<String>,
    pub purchase_date: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Device {
    pub id: i64,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: DeviceFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Merge for DeviceFields {
    fn merge(&self, patch: Self) -> Self {
        Self {
            name: patch.name.or_else(|| self.name.clone()),
            device_type: patch.device_type.or_else(|| self.device_type.clone()),
            serial_number: patch.serial_number.or_else(|| self.serial_number.clone()),
            status: patch.status.or_else(|| self.status.clone()),
            location: patch.location.or_else(|| self.location.clone()),
            purchase_date: patch.purchase_date.or_else(|| self.purchase_date.clone()),
            notes: patch.notes.or_else(|| self.notes.clone()),
        }
    }
}

impl Model for Device {
    type Fields = DeviceFields;

    const ENTITY: Entity = Entity::Devices;

    const FIELDS: &'static [&'static str] = &[
        "name",
        "type",
        "serialNumber",
        "status",
        "location",
        "purchaseDate",
        "notes",
    ];

    fn bind_fields<'q>(fields: &DeviceFields, args: &mut SqliteArguments<'q>) {
        args.add(fields.name.clone());
        args.add(fields.device_type.clone());
        args.add(fields.serial_number.clone());
        args.add(fields.status.clone());
        args.add(fields.location.clone());
        args.add(fields.purchase_date.clone());
        args.add(fields.notes.clone());
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn fields(&self) -> &DeviceFields {
        &self.fields
    }
}
