//! Table definitions and the attribute lists derived from them.
//!
//! The attribute lists double as the search allow-list: a caller-supplied
//! table or column name is only ever used to look up one of these statics.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Devices,
    Users,
    Assignments,
}

const DEVICE_COLUMNS: &[&str] = &[
    "id",
    "name",
    "type",
    "serialNumber",
    "status",
    "location",
    "purchaseDate",
    "notes",
    "createdAt",
    "updatedAt",
];

const USER_COLUMNS: &[&str] = &[
    "id",
    "name",
    "email",
    "password",
    "department",
    "role",
    "createdAt",
    "updatedAt",
];

const ASSIGNMENT_COLUMNS: &[&str] = &[
    "id",
    "deviceId",
    "userId",
    "assignedAt",
    "returnedAt",
    "createdAt",
    "updatedAt",
];

/// Attributes that exist in storage but must never be matched against
const HIDDEN_COLUMNS: &[&str] = &["password"];

impl Entity {
    pub const ALL: [Entity; 3] = [Entity::Devices, Entity::Users, Entity::Assignments];

    pub fn from_table_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|entity| entity.table() == name)
    }

    pub fn table(&self) -> &'static str {
        match self {
            Entity::Devices => "devices",
            Entity::Users => "users",
            Entity::Assignments => "assignments",
        }
    }

    /// Display name used in client messages ("Device not found")
    pub fn singular(&self) -> &'static str {
        match self {
            Entity::Devices => "Device",
            Entity::Users => "User",
            Entity::Assignments => "Assignment",
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Entity::Devices => DEVICE_COLUMNS,
            Entity::Users => USER_COLUMNS,
            Entity::Assignments => ASSIGNMENT_COLUMNS,
        }
    }

    pub fn searchable_column(&self, name: &str) -> Option<&'static str> {
        self.columns()
            .iter()
            .copied()
            .filter(|column| !HIDDEN_COLUMNS.contains(column))
            .find(|column| *column == name)
    }

    pub fn create_table_sql(&self) -> &'static str {
        match self {
            Entity::Devices => {
                r#"CREATE TABLE IF NOT EXISTS "devices" (
                    "id" INTEGER PRIMARY KEY AUTOINCREMENT,
                    "name" TEXT,
                    "type" TEXT,
                    "serialNumber" TEXT UNIQUE,
                    "status" TEXT,
                    "location" TEXT,
                    "purchaseDate" TEXT,
                    "notes" TEXT,
                    "createdAt" TEXT NOT NULL,
                    "updatedAt" TEXT NOT NULL
                )"#
            }
            Entity::Users => {
                r#"CREATE TABLE IF NOT EXISTS "users" (
                    "id" INTEGER PRIMARY KEY AUTOINCREMENT,
                    "name" TEXT,
                    "email" TEXT NOT NULL UNIQUE,
                    "password" TEXT NOT NULL,
                    "department" TEXT,
                    "role" TEXT,
                    "createdAt" TEXT NOT NULL,
                    "updatedAt" TEXT NOT NULL
                )"#
            }
            Entity::Assignments => {
                r#"CREATE TABLE IF NOT EXISTS "assignments" (
                    "id" INTEGER PRIMARY KEY AUTOINCREMENT,
                    "deviceId" INTEGER NOT NULL REFERENCES "devices" ("id") ON DELETE CASCADE,
                    "userId" INTEGER NOT NULL REFERENCES "users" ("id") ON DELETE CASCADE,
                    "assignedAt" TEXT NOT NULL,
                    "returnedAt" TEXT,
                    "createdAt" TEXT NOT NULL,
                    "updatedAt" TEXT NOT NULL
                )"#
            }
        }
    }
}
