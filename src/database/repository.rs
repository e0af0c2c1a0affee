use std::marker::PhantomData;

use chrono::Utc;
use sqlx::sqlite::{SqliteArguments, SqlitePool};
use sqlx::Arguments;

use crate::database::manager::DatabaseError;
use crate::database::models::{Merge, Model};
use crate::database::query_builder::QueryBuilder;
use crate::search::SearchQuery;

/// CRUD and search over one table
pub struct Repository<T> {
    pool: SqlitePool,
    builder: QueryBuilder,
    _phantom: PhantomData<T>,
}

impl<T: Model> Repository<T> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            builder: QueryBuilder::new(T::ENTITY),
            _phantom: PhantomData,
        }
    }

    pub async fn list(&self) -> Result<Vec<T>, DatabaseError> {
        let rows = sqlx::query_as::<_, T>(&self.builder.select_all())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: i64) -> Result<Option<T>, DatabaseError> {
        let row = sqlx::query_as::<_, T>(&self.builder.select_by_id())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn insert(&self, fields: &T::Fields) -> Result<T, DatabaseError> {
        T::check_new(fields)?;
        let now = Utc::now();
        let mut args = SqliteArguments::default();
        T::bind_fields(fields, &mut args);
        args.add(now);
        args.add(now);

        let row = sqlx::query_as_with::<_, T, _>(&self.builder.insert(T::FIELDS), args)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Merge `patch` into the stored record. `None` when the id is unknown.
    pub async fn update(&self, id: i64, patch: T::Fields) -> Result<Option<T>, DatabaseError> {
        let Some(current) = self.get(id).await? else {
            return Ok(None);
        };
        let merged = current.fields().merge(patch);

        let mut args = SqliteArguments::default();
        T::bind_fields(&merged, &mut args);
        args.add(Utc::now());
        args.add(id);

        let row = sqlx::query_as_with::<_, T, _>(&self.builder.update(T::FIELDS), args)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Returns whether a row was removed
    pub async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query(&self.builder.delete())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find(&self, query: &SearchQuery) -> Result<Vec<T>, DatabaseError> {
        debug_assert_eq!(query.entity, T::ENTITY);
        let predicate = query.predicate();
        let rows = sqlx::query_as::<_, T>(&self.builder.select_where(&predicate))
            .bind(predicate.param)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
