//! commons/crates/cm-core/src/lib.rs
//!
//! The central domain logic and interface definitions for commons.

pub mod error;
pub mod models;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::models::*;

    #[test]
    fn test_post_belongs_to_community() {
        let post = Post {
            id: 42,
            community_id: 7,
            author_id: 1,
            author_name: "alice".to_string(),
            title: "Hello commons".to_string(),
            body: "First post".to_string(),
            created_at: chrono::Utc::now(),
        };
        assert_eq!(post.id, 42);
        assert_eq!(post.community_id, 7);
    }

    #[test]
    fn test_error_display() {
        use super::error::AppError;
        let err = AppError::NotFound("post".to_string(), "99".to_string());
        assert_eq!(err.to_string(), "post not found with ID 99");
    }
}
