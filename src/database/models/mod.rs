use serde::Serialize;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::FromRow;

use crate::database::manager::DatabaseError;
use crate::database::schema::Entity;

pub mod assignment;
pub mod device;
pub mod user;

pub use assignment::{Assignment, AssignmentDetail, AssignmentFields};
pub use device::{Device, DeviceFields};
pub use user::{User, UserFields};

/// A stored record type: an `id`, a set of writable fields, and the
/// `createdAt`/`updatedAt` timestamps maintained by the repository.
pub trait Model: for<'r> FromRow<'r, SqliteRow> + Serialize + Send + Unpin + 'static {
    /// Writable part of the record, also used as the request body
    type Fields: Merge + Send + Sync;

    const ENTITY: Entity;

    /// Writable columns, in the order `bind_fields` adds them
    const FIELDS: &'static [&'static str];

    fn bind_fields<'q>(fields: &Self::Fields, args: &mut SqliteArguments<'q>);

    fn id(&self) -> i64;

    fn fields(&self) -> &Self::Fields;

    /// Reject field sets the table cannot store.
    fn check_new(_fields: &Self::Fields) -> Result<(), DatabaseError> {
        Ok(())
    }
}

/// Partial update: fields present in `patch` replace the current values,
/// absent ones are kept.
pub trait Merge: Clone {
    fn merge(&self, patch: Self) -> Self;
}
