//! Data models and DTOs (Data Transfer Objects)
//!
//! Contains the user record and the request body shared by create and update.

use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

/// A single row of the `users` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: Option<String>,
    pub profession: Option<String>,
}

impl TryFrom<&Row> for User {
    type Error = tokio_postgres::Error;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            profession: row.try_get("profession")?,
        })
    }
}

/// Body of `POST /users` and `PUT /users/{id}`
///
/// Absent fields are written as NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profession: Option<String>,
}
