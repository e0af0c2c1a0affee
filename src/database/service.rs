use serde_json::Value;

use crate::database::manager::{DatabaseError, Store};
use crate::database::models::{Assignment, AssignmentDetail, Device, User};
use crate::database::models::assignment::AssignmentDetailRow;
use crate::database::query_builder::QueryBuilder;
use crate::database::repository::Repository;
use crate::database::schema::Entity;
use crate::search::SearchQuery;

impl Store {
    /// Look up a user by exact email, password hash included
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM \"users\" WHERE \"email\" = ?")
            .bind(email)
            .fetch_optional(self.pool())
            .await?;
        Ok(user)
    }

    pub async fn list_assignments_detailed(&self) -> Result<Vec<AssignmentDetail>, DatabaseError> {
        let sql = format!("{} ORDER BY a.\"id\"", assignment_detail_select());
        let rows = sqlx::query_as::<_, AssignmentDetailRow>(&sql)
            .fetch_all(self.pool())
            .await?;
        rows.into_iter().map(AssignmentDetail::try_from).collect()
    }

    pub async fn get_assignment_detailed(&self, id: i64) -> Result<Option<AssignmentDetail>, DatabaseError> {
        let sql = format!("{} WHERE a.\"id\" = ?", assignment_detail_select());
        let row = sqlx::query_as::<_, AssignmentDetailRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        row.map(AssignmentDetail::try_from).transpose()
    }

    /// Run a validated search against whichever table it names. Rows come
    /// back serialized so the caller need not know the record type.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Value>, DatabaseError> {
        match query.entity {
            Entity::Devices => to_values(Repository::<Device>::new(self.pool().clone()).find(query).await?),
            Entity::Users => to_values(Repository::<User>::new(self.pool().clone()).find(query).await?),
            Entity::Assignments => {
                to_values(Repository::<Assignment>::new(self.pool().clone()).find(query).await?)
            }
        }
    }
}

fn assignment_detail_select() -> String {
    format!(
        "SELECT a.*, {} AS \"deviceJson\", {} AS \"userJson\" \
         FROM \"assignments\" a \
         LEFT JOIN \"devices\" d ON d.\"id\" = a.\"deviceId\" \
         LEFT JOIN \"users\" u ON u.\"id\" = a.\"userId\"",
        QueryBuilder::new(Entity::Devices).json_object("d"),
        QueryBuilder::new(Entity::Users).json_object("u"),
    )
}

fn to_values<T: serde::Serialize>(rows: Vec<T>) -> Result<Vec<Value>, DatabaseError> {
    rows.into_iter()
        .map(|row| serde_json::to_value(row).map_err(|e| DatabaseError::Decode(e.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::config::DatabaseConfig;
    use crate::database::manager::Store;
    use crate::database::models::{AssignmentFields, DeviceFields, UserFields};
    use crate::search::SearchParams;

    async fn seeded() -> (Store, i64) {
        let store = Store::connect(&DatabaseConfig::in_memory()).await.unwrap();
        store.migrate(false).await.unwrap();
        let device = store
            .devices()
            .insert(&DeviceFields {
                name: Some("Biopac Amp".into()),
                serial_number: Some("SN-BIO-3003".into()),
                status: Some("in-use".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        let user = store
            .users()
            .insert(&UserFields {
                name: Some("Bob".into()),
                email: Some("bob@example.com".into()),
                password: Some("$2b$04$notarealhash".into()),
                role: Some("technician".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        let assignment = store
            .assignments()
            .insert(&AssignmentFields {
                device_id: Some(device.id),
                user_id: Some(user.id),
                assigned_at: Some(Utc::now()),
                ..Default::default()
            })
            .await
            .unwrap();
        (store, assignment.id)
    }

    #[tokio::test]
    async fn finds_user_by_exact_email() {
        let (store, _) = seeded().await;
        let user = store.find_user_by_email("bob@example.com").await.unwrap().unwrap();
        assert_eq!(user.password_hash(), "$2b$04$notarealhash");
        assert!(store.find_user_by_email("BOB@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn assignment_detail_embeds_records_without_password() {
        let (store, id) = seeded().await;
        let detail = store.get_assignment_detailed(id).await.unwrap().unwrap();
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["Device"]["name"], "Biopac Amp");
        assert_eq!(value["User"]["email"], "bob@example.com");
        assert!(value["User"].get("password").is_none());

        assert_eq!(store.list_assignments_detailed().await.unwrap().len(), 1);
        assert!(store.get_assignment_detailed(id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deleting_a_device_cascades_to_its_assignments() {
        let (store, id) = seeded().await;
        let detail = store.get_assignment_detailed(id).await.unwrap().unwrap();
        let device_id = detail.assignment.fields.device_id.unwrap();
        assert!(store.devices().delete(device_id).await.unwrap());
        assert!(store.get_assignment_detailed(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn search_serializes_users_without_password() {
        let (store, _) = seeded().await;
        let params = SearchParams {
            table: Some("users".into()),
            column: Some("email".into()),
            search_type: Some("starts".into()),
            query: Some("bob".into()),
        };
        let rows = store.search(&params.validate().unwrap()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].get("password").is_none());
    }
}
