use crate::database::schema::Entity;
use crate::search::Predicate;

/// SQL text for one table. Identifiers only ever come from the static
/// column lists in `schema`; values are always `?` placeholders.
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder {
    entity: Entity,
}

impl QueryBuilder {
    pub fn new(entity: Entity) -> Self {
        Self { entity }
    }

    pub fn select_all(&self) -> String {
        format!("SELECT * FROM \"{}\" ORDER BY \"id\"", self.entity.table())
    }

    pub fn select_by_id(&self) -> String {
        format!("SELECT * FROM \"{}\" WHERE \"id\" = ?", self.entity.table())
    }

    pub fn select_where(&self, predicate: &Predicate) -> String {
        format!(
            "SELECT * FROM \"{}\" WHERE {} ORDER BY \"id\"",
            self.entity.table(),
            predicate.condition
        )
    }

    /// Insert `fields`, then `createdAt` and `updatedAt`
    pub fn insert(&self, fields: &[&str]) -> String {
        let columns: Vec<String> = fields
            .iter()
            .chain(["createdAt", "updatedAt"].iter())
            .map(|c| quote(c))
            .collect();
        let placeholders = vec!["?"; columns.len()].join(", ");
        format!(
            "INSERT INTO \"{}\" ({}) VALUES ({}) RETURNING *",
            self.entity.table(),
            columns.join(", "),
            placeholders
        )
    }

    /// Set `fields`, then `updatedAt`; the id is the last parameter
    pub fn update(&self, fields: &[&str]) -> String {
        let assignments: Vec<String> = fields
            .iter()
            .chain(["updatedAt"].iter())
            .map(|c| format!("{} = ?", quote(c)))
            .collect();
        format!(
            "UPDATE \"{}\" SET {} WHERE \"id\" = ? RETURNING *",
            self.entity.table(),
            assignments.join(", ")
        )
    }

    pub fn delete(&self) -> String {
        format!("DELETE FROM \"{}\" WHERE \"id\" = ?", self.entity.table())
    }

    /// `json_object(...)` over every visible column of this table, read
    /// through `alias`. NULL when the joined row is missing.
    pub fn json_object(&self, alias: &str) -> String {
        let pairs: Vec<String> = self
            .entity
            .columns()
            .iter()
            .filter(|c| self.entity.searchable_column(c).is_some())
            .map(|c| format!("'{}', {}.{}", c, alias, quote(c)))
            .collect();
        format!(
            "CASE WHEN {alias}.\"id\" IS NULL THEN NULL ELSE json_object({}) END",
            pairs.join(", "),
            alias = alias
        )
    }
}

fn quote(identifier: &str) -> String {
    format!("\"{}\"", identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_crud_statements() {
        let qb = QueryBuilder::new(Entity::Devices);
        assert_eq!(qb.select_all(), "SELECT * FROM \"devices\" ORDER BY \"id\"");
        assert_eq!(qb.select_by_id(), "SELECT * FROM \"devices\" WHERE \"id\" = ?");
        assert_eq!(qb.delete(), "DELETE FROM \"devices\" WHERE \"id\" = ?");
        assert_eq!(
            qb.insert(&["name", "type"]),
            "INSERT INTO \"devices\" (\"name\", \"type\", \"createdAt\", \"updatedAt\") VALUES (?, ?, ?, ?) RETURNING *"
        );
        assert_eq!(
            qb.update(&["name"]),
            "UPDATE \"devices\" SET \"name\" = ?, \"updatedAt\" = ? WHERE \"id\" = ? RETURNING *"
        );
    }

    #[test]
    fn select_where_uses_predicate_condition() {
        let predicate = Predicate {
            condition: "\"status\" = ?".to_string(),
            param: "available".to_string(),
        };
        assert_eq!(
            QueryBuilder::new(Entity::Devices).select_where(&predicate),
            "SELECT * FROM \"devices\" WHERE \"status\" = ? ORDER BY \"id\""
        );
    }

    #[test]
    fn user_json_object_leaves_out_password() {
        let sql = QueryBuilder::new(Entity::Users).json_object("u");
        assert!(sql.contains("'email', u.\"email\""));
        assert!(!sql.contains("password"));
        assert!(sql.starts_with("CASE WHEN u.\"id\" IS NULL"));
    }
}
