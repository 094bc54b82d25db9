//! # Domain Models
//!
//! These structs represent the core entities of commons.
//! IDs are numeric auto-increment values assigned by the relational store,
//! matching the `[0-9]+` identifiers exposed in URLs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Argon2 PHC string; the plaintext password is never stored
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A named grouping that contains posts (e.g., "rust", "cooking").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Community {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A content item belonging to exactly one community.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub community_id: i64,
    pub author_id: i64,
    /// Author display name, denormalized for rendering
    pub author_name: String,
    pub title: String,
    /// Body HTML, escaped and marked up at submission time
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Fields required to insert a post; the ID comes back from the store.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub community_id: i64,
    pub author_id: i64,
    pub title: String,
    pub body: String,
}

/// A login session backing the session cookie.
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque random token, also the cookie value
    pub token: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}
