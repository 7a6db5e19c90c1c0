//! User storage
//!
//! Handlers talk to [`UserRepository`]; production wires in
//! [`PgUserRepository`], one parameterized statement per operation.

use crate::db::queries;
use crate::error::AppError;
use crate::models::User;
use async_trait::async_trait;
use deadpool_postgres::Pool;
use tracing::debug;

/// Storage operations for user records
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a row and return it with its assigned id
    async fn create(
        &self,
        name: Option<&str>,
        profession: Option<&str>,
    ) -> Result<User, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError>;

    /// All rows ordered by id
    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Overwrite both fields; `None` when no row has this id
    async fn update(
        &self,
        id: i32,
        name: Option<&str>,
        profession: Option<&str>,
    ) -> Result<Option<User>, AppError>;

    /// Remove the row and return what was deleted
    async fn delete(&self, id: i32) -> Result<Option<User>, AppError>;
}

/// PostgreSQL-backed repository
pub struct PgUserRepository {
    pool: Pool,
}

impl PgUserRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(
        &self,
        name: Option<&str>,
        profession: Option<&str>,
    ) -> Result<User, AppError> {
        let client = self.pool.get().await?;
        let row = client
            .query_one(queries::INSERT_USER, &[&name, &profession])
            .await?;
        Ok(User::try_from(&row)?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let client = self.pool.get().await?;
        let row = client.query_opt(queries::SELECT_USER_BY_ID, &[&id]).await?;
        Ok(row.as_ref().map(User::try_from).transpose()?)
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let client = self.pool.get().await?;
        let rows = client.query(queries::SELECT_ALL_USERS, &[]).await?;
        debug!("Fetched {} user rows", rows.len());
        Ok(rows.iter().map(User::try_from).collect::<Result<_, _>>()?)
    }

    async fn update(
        &self,
        id: i32,
        name: Option<&str>,
        profession: Option<&str>,
    ) -> Result<Option<User>, AppError> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(queries::UPDATE_USER, &[&name, &profession, &id])
            .await?;
        Ok(row.as_ref().map(User::try_from).transpose()?)
    }

    async fn delete(&self, id: i32) -> Result<Option<User>, AppError> {
        let client = self.pool.get().await?;
        let row = client.query_opt(queries::DELETE_USER, &[&id]).await?;
        Ok(row.as_ref().map(User::try_from).transpose()?)
    }
}
