//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Community, NewPost, Post, Session, User};

/// Data persistence contract for users, communities, posts, and sessions.
#[async_trait]
pub trait ForumRepo: Send + Sync {
    // Community Operations
    async fn list_communities(&self) -> Result<Vec<Community>>;
    async fn get_community(&self, id: i64) -> Result<Option<Community>>;
    /// Posts of one community, newest first.
    async fn list_posts(&self, community_id: i64) -> Result<Vec<Post>>;

    // Post Operations
    async fn get_post(&self, id: i64) -> Result<Option<Post>>;
    /// Inserts a post and returns the ID assigned by the store.
    async fn create_post(&self, post: NewPost) -> Result<i64>;

    // User Operations
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User>;
    async fn get_user_by_name(&self, username: &str) -> Result<Option<User>>;

    // Session Operations
    async fn create_session(&self, session: Session) -> Result<()>;
    /// Resolves a session token to its user, or None for unknown tokens.
    async fn get_session_user(&self, token: &str) -> Result<Option<User>>;
    async fn delete_session(&self, token: &str) -> Result<()>;
}

/// Credential hashing and session-token issuance contract.
pub trait AuthProvider: Send + Sync {
    /// Hashes a plaintext password into a storable PHC string.
    fn hash_password(&self, password: &str) -> Result<String>;

    /// Verifies a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> bool;

    /// Generates an opaque token for the session cookie.
    fn generate_session_token(&self) -> String;
}
