use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteArguments;
use sqlx::{Arguments, FromRow};

use super::{Merge, Model};
use crate::auth::Role;
use crate::database::manager::DatabaseError;
use crate::database::schema::Entity;

/// Writable user attributes. `password` holds the bcrypt hash once stored
/// and is never serialized back out.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct UserFields {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: UserFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn email(&self) -> &str {
        self.fields.email.as_deref().unwrap_or_default()
    }

    pub fn password_hash(&self) -> &str {
        self.fields.password.as_deref().unwrap_or_default()
    }

    pub fn role(&self) -> Role {
        Role::from(self.fields.role.as_deref())
    }
}

impl Merge for UserFields {
    fn merge(&self, patch: Self) -> Self {
        Self {
            name: patch.name.or_else(|| self.name.clone()),
            email: patch.email.or_else(|| self.email.clone()),
            password: patch.password.or_else(|| self.password.clone()),
            department: patch.department.or_else(|| self.department.clone()),
            role: patch.role.or_else(|| self.role.clone()),
        }
    }
}

impl Model for User {
    type Fields = UserFields;

    const ENTITY: Entity = Entity::Users;

    const FIELDS: &'static [&'static str] = &["name", "email", "password", "department", "role"];

    fn bind_fields<'q>(fields: &UserFields, args: &mut SqliteArguments<'q>) {
        args.add(fields.name.clone());
        args.add(fields.email.clone());
        args.add(fields.password.clone());
        args.add(fields.department.clone());
        args.add(fields.role.clone());
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn fields(&self) -> &UserFields {
        &self.fields
    }

    fn check_new(fields: &UserFields) -> Result<(), DatabaseError> {
        if fields.email.as_deref().map_or(true, str::is_empty) {
            return Err(DatabaseError::MissingField("email"));
        }
        if fields.password.as_deref().map_or(true, str::is_empty) {
            return Err(DatabaseError::MissingField("password"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stored() -> User {
        User {
            id: 7,
            fields: UserFields {
                name: Some("Carol".into()),
                email: Some("carol@example.com".into()),
                password: Some("$2b$04$hash".into()),
                department: Some("Neuro".into()),
                role: Some("manager".into()),
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn serialized_user_has_no_password() {
        let value = serde_json::to_value(stored()).unwrap();
        assert_eq!(value["email"], "carol@example.com");
        assert_eq!(value["role"], "manager");
        assert!(value.get("password").is_none());
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn role_is_read_from_stored_string() {
        assert_eq!(stored().role(), Role::Manager);
    }

    #[test]
    fn new_user_needs_email_and_password() {
        let fields: UserFields = serde_json::from_value(json!({"email": "x@y.z"})).unwrap();
        assert!(matches!(User::check_new(&fields), Err(DatabaseError::MissingField("password"))));

        let fields: UserFields = serde_json::from_value(json!({"password": "pw"})).unwrap();
        assert!(matches!(User::check_new(&fields), Err(DatabaseError::MissingField("email"))));
    }
}
