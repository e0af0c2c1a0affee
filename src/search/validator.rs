use super::error::SearchError;
use super::types::{MatchOp, SearchParams, SearchQuery};
use crate::database::schema::Entity;

impl SearchParams {
    /// Resolve the raw parameters against the known schema.
    ///
    /// Order: presence, table, column, search type. The table name is only
    /// ever used as a lookup key.
    pub fn validate(&self) -> Result<SearchQuery, SearchError> {
        let (table, column, search_type, query) = match (
            non_empty(&self.table),
            non_empty(&self.column),
            non_empty(&self.search_type),
            non_empty(&self.query),
        ) {
            (Some(t), Some(c), Some(s), Some(q)) => (t, c, s, q),
            _ => return Err(SearchError::MissingParameters),
        };

        let entity = Entity::from_table_name(table)
            .ok_or_else(|| SearchError::InvalidTableName(table.to_string()))?;

        let column = entity
            .searchable_column(column)
            .ok_or_else(|| SearchError::InvalidColumn(column.to_string()))?;

        let op = MatchOp::parse(search_type)
            .ok_or_else(|| SearchError::InvalidSearchType(search_type.to_string()))?;

        Ok(SearchQuery {
            entity,
            column,
            op,
            value: query.to_string(),
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
