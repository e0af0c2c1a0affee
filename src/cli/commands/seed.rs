use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::auth::PasswordHasher;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::models::assignment::parse_timestamp;
use crate::database::models::{AssignmentFields, DeviceFields, UserFields};
use crate::database::{DatabaseError, Store};

/// (name, email, department, role)
const USERS: &[(&str, &str, &str, &str)] = &[
    ("Alice Johnson", "alice.johnson@example.com", "Engineering", "engineer"),
    ("Bob Martinez", "bob.martinez@example.com", "IT", "technician"),
    ("Carol Lee", "carol.lee@example.com", "Administration", "manager"),
];

/// (name, type, serialNumber, status, location, purchaseDate, notes)
const DEVICES: &[(&str, &str, &str, &str, &str, &str, &str)] = &[
    ("Oscilloscope A", "Oscilloscope", "SN-OSC-1001", "available", "Lab 1", "2023-06-12", "Calibrated 2024-01-05"),
    ("Data Logger X", "Logger", "SN-DL-2002", "in-use", "Lab 2", "2022-11-03", "Requires new battery"),
    ("Biopac Amp", "Amplifier", "SN-BA-3003", "maintenance", "Storage", "2021-09-20", "Under maintenance"),
];

/// (device serial, user email, assignedAt, returnedAt)
const ASSIGNMENTS: &[(&str, &str, &str, Option<&str>)] = &[
    ("SN-DL-2002", "alice.johnson@example.com", "2025-11-20T09:30:00Z", None),
    ("SN-OSC-1001", "carol.lee@example.com", "2025-10-05T14:00:00Z", Some("2025-10-10T16:00:00Z")),
];

/// Rows inserted by one seeding run
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct SeedReport {
    pub users: usize,
    pub devices: usize,
    pub assignments: usize,
}

pub async fn handle(
    store: &Store,
    config: &AppConfig,
    password: &str,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    store.migrate(false).await?;
    let hasher = PasswordHasher::new(config.security.bcrypt_cost);
    let report = seed(store, &hasher, password).await?;

    let text = format!(
        "Inserted {} users, {} devices, {} assignments",
        report.users, report.devices, report.assignments
    );
    output_format.print(&text, &report)
}

/// Insert the sample rows. Users and devices whose email or serial number
/// already exists are skipped; assignments are only added to an empty table.
pub async fn seed(store: &Store, hasher: &PasswordHasher, password: &str) -> anyhow::Result<SeedReport> {
    let mut report = SeedReport::default();
    let hash = hasher.hash(password).await.context("failed to hash seed password")?;

    for (name, email, department, role) in USERS {
        let fields = UserFields {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            password: Some(hash.clone()),
            department: Some(department.to_string()),
            role: Some(role.to_string()),
        };
        if inserted(store.users().insert(&fields).await)? {
            report.users += 1;
        }
    }

    for (name, kind, serial, status, location, purchased, notes) in DEVICES {
        let fields = DeviceFields {
            name: Some(name.to_string()),
            device_type: Some(kind.to_string()),
            serial_number: Some(serial.to_string()),
            status: Some(status.to_string()),
            location: Some(location.to_string()),
            purchase_date: Some(purchased.to_string()),
            notes: Some(notes.to_string()),
        };
        if inserted(store.devices().insert(&fields).await)? {
            report.devices += 1;
        }
    }

    if store.assignments().list().await?.is_empty() {
        let devices = store.devices().list().await?;
        for (serial, email, assigned_at, returned_at) in ASSIGNMENTS {
            let device = devices
                .iter()
                .find(|d| d.fields.serial_number.as_deref() == Some(*serial))
                .with_context(|| format!("sample device {} missing", serial))?;
            let user = store
                .find_user_by_email(email)
                .await?
                .with_context(|| format!("sample user {} missing", email))?;

            let fields = AssignmentFields {
                device_id: Some(device.id),
                user_id: Some(user.id),
                assigned_at: Some(timestamp(assigned_at)?),
                returned_at: returned_at.map(timestamp).transpose()?,
            };
            store.assignments().insert(&fields).await?;
            report.assignments += 1;
        }
    }

    tracing::info!("Seeded {:?}", report);
    Ok(report)
}

/// `Ok(false)` for a row that already exists
fn inserted<T>(result: Result<T, DatabaseError>) -> Result<bool, DatabaseError> {
    match result {
        Ok(_) => Ok(true),
        Err(DatabaseError::UniqueViolation(_)) => Ok(false),
        Err(e) => Err(e),
    }
}

fn timestamp(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    parse_timestamp(raw).map_err(anyhow::Error::msg)
}
