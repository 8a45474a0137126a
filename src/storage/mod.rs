// Storage interface - the full set of operations the rest of the system
// may perform against persisted entities. The in-memory and PostgreSQL
// implementations are interchangeable behind this trait.

mod memory;
mod postgres;

pub use memory::MemoryStorage;
pub use postgres::PostgresStorage;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{
    Comment, Friend, Like, NewComment, NewFriend, NewLike, NewPost, NewShare, NewUser, Post,
    Share, User,
};

/// Storage contract shared by every backend.
///
/// Absence is a normal `Ok(None)` outcome, never an error; implementations
/// fail only when the backing medium does, and that failure is fatal to the
/// request that issued it. Identifier assignment belongs to the store.
#[async_trait]
pub trait Storage: Send + Sync {
    // User operations
    async fn get_user(&self, id: i64) -> AppResult<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>>;
    async fn get_all_users(&self) -> AppResult<Vec<User>>;
    /// Assigns a new id. Username uniqueness is the caller's check.
    async fn create_user(&self, user: NewUser) -> AppResult<User>;

    // Friend operations
    /// Edges where this user is the recipient and the status is pending.
    async fn get_friend_requests(&self, user_id: i64) -> AppResult<Vec<Friend>>;
    /// Edges where this user is either endpoint and the status is accepted.
    async fn get_friends(&self, user_id: i64) -> AppResult<Vec<Friend>>;
    /// Creates an edge with whatever status the caller supplies.
    async fn send_friend_request(&self, request: NewFriend) -> AppResult<Friend>;
    /// Sets the status on an existing edge; absent when the id is unknown.
    /// Repeat transitions are permitted.
    async fn update_friend_request(&self, id: i64, status: &str) -> AppResult<Option<Friend>>;

    // Post operations
    async fn get_post(&self, id: i64) -> AppResult<Option<Post>>;
    /// All posts, newest first.
    async fn get_all_posts(&self) -> AppResult<Vec<Post>>;
    /// One author's posts, newest first.
    async fn get_user_posts(&self, user_id: i64) -> AppResult<Vec<Post>>;
    /// Assigns the id and the creation timestamp.
    async fn create_post(&self, post: NewPost) -> AppResult<Post>;

    // Like operations
    async fn get_likes(&self, post_id: i64) -> AppResult<Vec<Like>>;
    async fn get_like(&self, user_id: i64, post_id: i64) -> AppResult<Option<Like>>;
    /// Idempotent per (user_id, post_id): returns the existing like when
    /// the pair is already present.
    async fn create_like(&self, like: NewLike) -> AppResult<Like>;
    /// No-op when the id does not exist.
    async fn delete_like(&self, id: i64) -> AppResult<()>;

    // Comment operations
    /// One post's comments, oldest first.
    async fn get_comments(&self, post_id: i64) -> AppResult<Vec<Comment>>;
    async fn create_comment(&self, comment: NewComment) -> AppResult<Comment>;

    // Share operations
    /// One post's shares, newest first.
    async fn get_shares(&self, post_id: i64) -> AppResult<Vec<Share>>;
    /// One user's shares, newest first.
    async fn get_user_shares(&self, user_id: i64) -> AppResult<Vec<Share>>;
    async fn create_share(&self, share: NewShare) -> AppResult<Share>;
}
