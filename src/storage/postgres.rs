use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::error::{AppError, AppResult};
use crate::models::{
    Comment, Friend, FriendStatus, Like, NewComment, NewFriend, NewLike, NewPost, NewShare,
    NewUser, Post, Share, User,
};
use crate::storage::Storage;

/// PostgreSQL implementation of the storage interface.
///
/// Every operation is a single parameterized query against one of six
/// tables with server-generated identifiers. Like idempotency rests on a
/// `UNIQUE (user_id, post_id)` constraint rather than a check-then-act,
/// so the invariant holds under concurrent identical requests.
pub struct PostgresStorage {
    pool: PgPool,
}

impl PostgresStorage {
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| {
                AppError::Database(format!("Failed to connect to PostgreSQL: {}", e))
            })?;
        Ok(Self { pool })
    }

    /// Creates the entity tables and indexes when they do not exist yet.
    pub async fn initialize(&self) -> AppResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id BIGSERIAL PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                full_name TEXT NOT NULL,
                profile_picture TEXT,
                cover_picture TEXT,
                bio TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create users table: {}", e)))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS friends (
                id BIGSERIAL PRIMARY KEY,
                user_id BIGINT NOT NULL,
                friend_id BIGINT NOT NULL,
                status TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create friends table: {}", e)))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS posts (
                id BIGSERIAL PRIMARY KEY,
                user_id BIGINT NOT NULL,
                content TEXT NOT NULL,
                image_url TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create posts table: {}", e)))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS likes (
                id BIGSERIAL PRIMARY KEY,
                user_id BIGINT NOT NULL,
                post_id BIGINT NOT NULL,
                type TEXT NOT NULL DEFAULT 'like',
                UNIQUE (user_id, post_id)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create likes table: {}", e)))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS comments (
                id BIGSERIAL PRIMARY KEY,
                user_id BIGINT NOT NULL,
                post_id BIGINT NOT NULL,
                content TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create comments table: {}", e)))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS shares (
                id BIGSERIAL PRIMARY KEY,
                user_id BIGINT NOT NULL,
                post_id BIGINT NOT NULL,
                comment TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create shares table: {}", e)))?;

        // Indexes for the filtered scans
        for statement in [
            "CREATE INDEX IF NOT EXISTS idx_friends_user_id ON friends(user_id)",
            "CREATE INDEX IF NOT EXISTS idx_friends_friend_id ON friends(friend_id)",
            "CREATE INDEX IF NOT EXISTS idx_posts_user_id ON posts(user_id)",
            "CREATE INDEX IF NOT EXISTS idx_likes_post_id ON likes(post_id)",
            "CREATE INDEX IF NOT EXISTS idx_comments_post_id ON comments(post_id)",
            "CREATE INDEX IF NOT EXISTS idx_shares_post_id ON shares(post_id)",
            "CREATE INDEX IF NOT EXISTS idx_shares_user_id ON shares(user_id)",
        ] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::Database(format!("Failed to create index: {}", e)))?;
        }

        Ok(())
    }
}

#[async_trait]
impl Storage for PostgresStorage {
    // User operations
    async fn get_user(&self, id: i64) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, password, full_name, profile_picture, cover_picture, bio \
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get user {}: {}", id, e)))
    }

    async fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, password, full_name, profile_picture, cover_picture, bio \
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get user by username: {}", e)))
    }

    async fn get_all_users(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, password, full_name, profile_picture, cover_picture, bio \
             FROM users",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get all users: {}", e)))
    }

    async fn create_user(&self, user: NewUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password, full_name, profile_picture, cover_picture, bio) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, username, password, full_name, profile_picture, cover_picture, bio",
        )
        .bind(&user.username)
        .bind(&user.password)
        .bind(&user.full_name)
        .bind(&user.profile_picture)
        .bind(&user.cover_picture)
        .bind(&user.bio)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create user: {}", e)))
    }

    // Friend operations
    async fn get_friend_requests(&self, user_id: i64) -> AppResult<Vec<Friend>> {
        sqlx::query_as::<_, Friend>(
            "SELECT id, user_id, friend_id, status FROM friends \
             WHERE friend_id = $1 AND status = $2",
        )
        .bind(user_id)
        .bind(FriendStatus::Pending.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to get friend requests for {}: {}", user_id, e))
        })
    }

    async fn get_friends(&self, user_id: i64) -> AppResult<Vec<Friend>> {
        sqlx::query_as::<_, Friend>(
            "SELECT id, user_id, friend_id, status FROM friends \
             WHERE (user_id = $1 OR friend_id = $1) AND status = $2",
        )
        .bind(user_id)
        .bind(FriendStatus::Accepted.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get friends for {}: {}", user_id, e)))
    }

    async fn send_friend_request(&self, request: NewFriend) -> AppResult<Friend> {
        sqlx::query_as::<_, Friend>(
            "INSERT INTO friends (user_id, friend_id, status) VALUES ($1, $2, $3) \
             RETURNING id, user_id, friend_id, status",
        )
        .bind(request.user_id)
        .bind(request.friend_id)
        .bind(&request.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to send friend request: {}", e)))
    }

    async fn update_friend_request(&self, id: i64, status: &str) -> AppResult<Option<Friend>> {
        sqlx::query_as::<_, Friend>(
            "UPDATE friends SET status = $2 WHERE id = $1 \
             RETURNING id, user_id, friend_id, status",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to update friend request {}: {}", id, e)))
    }

    // Post operations
    async fn get_post(&self, id: i64) -> AppResult<Option<Post>> {
        sqlx::query_as::<_, Post>(
            "SELECT id, user_id, content, image_url, created_at FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get post {}: {}", id, e)))
    }

    async fn get_all_posts(&self) -> AppResult<Vec<Post>> {
        sqlx::query_as::<_, Post>(
            "SELECT id, user_id, content, image_url, created_at FROM posts \
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get all posts: {}", e)))
    }

    async fn get_user_posts(&self, user_id: i64) -> AppResult<Vec<Post>> {
        sqlx::query_as::<_, Post>(
            "SELECT id, user_id, content, image_url, created_at FROM posts \
             WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get posts for user {}: {}", user_id, e)))
    }

    async fn create_post(&self, post: NewPost) -> AppResult<Post> {
        sqlx::query_as::<_, Post>(
            "INSERT INTO posts (user_id, content, image_url) VALUES ($1, $2, $3) \
             RETURNING id, user_id, content, image_url, created_at",
        )
        .bind(post.user_id)
        .bind(&post.content)
        .bind(&post.image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create post: {}", e)))
    }

    // Like operations
    async fn get_likes(&self, post_id: i64) -> AppResult<Vec<Like>> {
        sqlx::query_as::<_, Like>(
            "SELECT id, user_id, post_id, type FROM likes WHERE post_id = $1",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get likes for post {}: {}", post_id, e)))
    }

    async fn get_like(&self, user_id: i64, post_id: i64) -> AppResult<Option<Like>> {
        sqlx::query_as::<_, Like>(
            "SELECT id, user_id, post_id, type FROM likes WHERE user_id = $1 AND post_id = $2",
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to get like: {}", e)))
    }

    async fn create_like(&self, like: NewLike) -> AppResult<Like> {
        let inserted = sqlx::query_as::<_, Like>(
            "INSERT INTO likes (user_id, post_id, type) VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, post_id) DO NOTHING \
             RETURNING id, user_id, post_id, type",
        )
        .bind(like.user_id)
        .bind(like.post_id)
        .bind(&like.like_type)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create like: {}", e)))?;

        if let Some(created) = inserted {
            return Ok(created);
        }

        // Lost the conflict: hand back the row that won.
        self.get_like(like.user_id, like.post_id).await?.ok_or_else(|| {
            AppError::Database(format!(
                "Like for user {} on post {} disappeared after conflict",
                like.user_id, like.post_id
            ))
        })
    }

    async fn delete_like(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM likes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete like {}: {}", id, e)))?;
        Ok(())
    }

    // Comment operations
    async fn get_comments(&self, post_id: i64) -> AppResult<Vec<Comment>> {
        sqlx::query_as::<_, Comment>(
            "SELECT id, user_id, post_id, content, created_at FROM comments \
             WHERE post_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to get comments for post {}: {}", post_id, e))
        })
    }

    async fn create_comment(&self, comment: NewComment) -> AppResult<Comment> {
        sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (user_id, post_id, content) VALUES ($1, $2, $3) \
             RETURNING id, user_id, post_id, content, created_at",
        )
        .bind(comment.user_id)
        .bind(comment.post_id)
        .bind(&comment.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create comment: {}", e)))
    }

    // Share operations
    async fn get_shares(&self, post_id: i64) -> AppResult<Vec<Share>> {
        sqlx::query_as::<_, Share>(
            "SELECT id, user_id, post_id, comment, created_at FROM shares \
             WHERE post_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to get shares for post {}: {}", post_id, e))
        })
    }

    async fn get_user_shares(&self, user_id: i64) -> AppResult<Vec<Share>> {
        sqlx::query_as::<_, Share>(
            "SELECT id, user_id, post_id, comment, created_at FROM shares \
             WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to get shares for user {}: {}", user_id, e))
        })
    }

    async fn create_share(&self, share: NewShare) -> AppResult<Share> {
        sqlx::query_as::<_, Share>(
            "INSERT INTO shares (user_id, post_id, comment) VALUES ($1, $2, $3) \
             RETURNING id, user_id, post_id, comment, created_at",
        )
        .bind(share.user_id)
        .bind(share.post_id)
        .bind(&share.comment)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to create share: {}", e)))
    }
}
