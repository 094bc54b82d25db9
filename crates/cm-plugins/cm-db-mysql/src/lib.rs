//! # cm-db-mysql Implementation
//!
//! This module implements the data mapping between the MySQL relational
//! model and the `cm-core` domain models.

use async_trait::async_trait;
use cm_core::error::{AppError, Result};
use cm_core::models::{Community, NewPost, Post, Session, User};
use cm_core::traits::ForumRepo;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::Row;

/// Schema bootstrap, executed statement-by-statement on connect.
/// MySQL runs one statement per round trip, hence the split.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id BIGINT PRIMARY KEY AUTO_INCREMENT,
        username VARCHAR(32) NOT NULL UNIQUE,
        password_hash VARCHAR(255) NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS communities (
        id BIGINT PRIMARY KEY AUTO_INCREMENT,
        name VARCHAR(64) NOT NULL UNIQUE,
        description TEXT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS posts (
        id BIGINT PRIMARY KEY AUTO_INCREMENT,
        community_id BIGINT NOT NULL,
        author_id BIGINT NOT NULL,
        title VARCHAR(255) NOT NULL,
        body TEXT NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (community_id) REFERENCES communities(id),
        FOREIGN KEY (author_id) REFERENCES users(id)
    )",
    "CREATE TABLE IF NOT EXISTS sessions (
        token VARCHAR(64) PRIMARY KEY,
        user_id BIGINT NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (user_id) REFERENCES users(id)
    )",
];

pub struct MysqlForumRepo {
    pool: MySqlPool,
}

/// Maps driver failures to the domain taxonomy.
/// Unique-key violations become `Conflict` so the API layer can answer 409.
fn into_app(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db) if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) => {
            AppError::Conflict(db.message().to_string())
        }
        _ => AppError::Internal(err.to_string()),
    }
}

fn row_to_user(row: &MySqlRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        password_hash: row.get("password_hash"),
        created_at: row.get("created_at"),
    }
}

fn row_to_community(row: &MySqlRow) -> Community {
    Community {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        created_at: row.get("created_at"),
    }
}

fn row_to_post(row: &MySqlRow) -> Post {
    Post {
        id: row.get("id"),
        community_id: row.get("community_id"),
        author_id: row.get("author_id"),
        author_name: row.get("author_name"),
        title: row.get("title"),
        body: row.get("body"),
        created_at: row.get("created_at"),
    }
}

impl MysqlForumRepo {
    /// Opens the pool, pings the server once, and bootstraps the schema.
    /// Any failure here is fatal to the caller; there is no retry path.
    pub async fn connect(dsn: &str) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(10)
            .connect(dsn)
            .await
            .map_err(into_app)?;

        // single liveness check before the server starts taking requests
        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .map_err(into_app)?;

        let repo = Self { pool };
        repo.ensure_schema().await?;
        Ok(repo)
    }

    async fn ensure_schema(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(into_app)?;
        }
        log::debug!("schema bootstrap complete ({} tables)", SCHEMA.len());
        Ok(())
    }
}

#[async_trait]
impl ForumRepo for MysqlForumRepo {
    async fn list_communities(&self) -> Result<Vec<Community>> {
        let rows = sqlx::query("SELECT * FROM communities ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(into_app)?;

        Ok(rows.iter().map(row_to_community).collect())
    }

    async fn get_community(&self, id: i64) -> Result<Option<Community>> {
        let row = sqlx::query("SELECT * FROM communities WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(into_app)?;

        Ok(row.as_ref().map(row_to_community))
    }

    async fn list_posts(&self, community_id: i64) -> Result<Vec<Post>> {
        let rows = sqlx::query(
            "SELECT p.id, p.community_id, p.author_id, u.username AS author_name,
                    p.title, p.body, p.created_at
             FROM posts p
             JOIN users u ON u.id = p.author_id
             WHERE p.community_id = ?
             ORDER BY p.created_at DESC, p.id DESC",
        )
        .bind(community_id)
        .fetch_all(&self.pool)
        .await
        .map_err(into_app)?;

        Ok(rows.iter().map(row_to_post).collect())
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>> {
        let row = sqlx::query(
            "SELECT p.id, p.community_id, p.author_id, u.username AS author_name,
                    p.title, p.body, p.created_at
             FROM posts p
             JOIN users u ON u.id = p.author_id
             WHERE p.id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(into_app)?;

        Ok(row.as_ref().map(row_to_post))
    }

    async fn create_post(&self, post: NewPost) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO posts (community_id, author_id, title, body) VALUES (?, ?, ?, ?)",
        )
        .bind(post.community_id)
        .bind(post.author_id)
        .bind(post.title)
        .bind(post.body)
        .execute(&self.pool)
        .await
        .map_err(into_app)?;

        Ok(result.last_insert_id() as i64)
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User> {
        let result = sqlx::query("INSERT INTO users (username, password_hash) VALUES (?, ?)")
            .bind(username)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(into_app)?;

        let id = result.last_insert_id() as i64;
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(into_app)?;

        Ok(row_to_user(&row))
    }

    async fn get_user_by_name(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(into_app)?;

        Ok(row.as_ref().map(row_to_user))
    }

    async fn create_session(&self, session: Session) -> Result<()> {
        sqlx::query("INSERT INTO sessions (token, user_id, created_at) VALUES (?, ?, ?)")
            .bind(session.token)
            .bind(session.user_id)
            .bind(session.created_at)
            .execute(&self.pool)
            .await
            .map_err(into_app)?;
        Ok(())
    }

    async fn get_session_user(&self, token: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT u.id, u.username, u.password_hash, u.created_at
             FROM sessions s
             JOIN users u ON u.id = s.user_id
             WHERE s.token = ?",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(into_app)?;

        Ok(row.as_ref().map(row_to_user))
    }

    async fn delete_session(&self, token: &str) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(into_app)?;
        Ok(())
    }
}
