//! SQL query constants
//!
//! Contains all SQL statements used by the application.

/// Bootstrap the users table on a fresh database
pub const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        name TEXT,
        profession TEXT
    )
"#;

/// Connectivity probe run once at startup
pub const PING: &str = "SELECT 1";

pub const INSERT_USER: &str = r#"
    INSERT INTO users (name, profession)
    VALUES ($1, $2)
    RETURNING id, name, profession
"#;

pub const SELECT_USER_BY_ID: &str = r#"
    SELECT id, name, profession
    FROM users
    WHERE id = $1
"#;

pub const SELECT_ALL_USERS: &str = r#"
    SELECT id, name, profession
    FROM users
    ORDER BY id
"#;

pub const UPDATE_USER: &str = r#"
    UPDATE users
    SET name = $1, profession = $2
    WHERE id = $3
    RETURNING id, name, profession
"#;

pub const DELETE_USER: &str = r#"
    DELETE FROM users
    WHERE id = $1
    RETURNING id, name, profession
"#;
