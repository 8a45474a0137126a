use std::cmp::Reverse;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::error::AppResult;
use crate::models::{
    Comment, Friend, FriendStatus, Like, NewComment, NewFriend, NewLike, NewPost, NewShare,
    NewUser, Post, Share, User,
};
use crate::seed;
use crate::storage::Storage;

/// In-memory implementation of the storage interface.
///
/// One keyed table per entity kind, each with a monotonically increasing
/// id counter starting at 1. A single lock guards all tables, so the like
/// probe-then-insert cannot interleave with another request. Filtering and
/// sorting materialize a full scan of the table, which is fine at the
/// fixture scale this store is meant for.
pub struct MemoryStorage {
    tables: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    users: HashMap<i64, User>,
    friends: HashMap<i64, Friend>,
    posts: HashMap<i64, Post>,
    likes: HashMap<i64, Like>,
    comments: HashMap<i64, Comment>,
    shares: HashMap<i64, Share>,

    next_user_id: i64,
    next_friend_id: i64,
    next_post_id: i64,
    next_like_id: i64,
    next_comment_id: i64,
    next_share_id: i64,
}

impl Tables {
    fn insert_user(&mut self, user: NewUser) -> User {
        self.next_user_id += 1;
        let user = User {
            id: self.next_user_id,
            username: user.username,
            password: user.password,
            full_name: user.full_name,
            profile_picture: user.profile_picture,
            cover_picture: user.cover_picture,
            bio: user.bio,
        };
        self.users.insert(user.id, user.clone());
        user
    }

    fn insert_friend(&mut self, request: NewFriend) -> Friend {
        self.next_friend_id += 1;
        let friend = Friend {
            id: self.next_friend_id,
            user_id: request.user_id,
            friend_id: request.friend_id,
            status: request.status,
        };
        self.friends.insert(friend.id, friend.clone());
        friend
    }

    fn insert_post(&mut self, post: NewPost) -> Post {
        self.next_post_id += 1;
        let post = Post {
            id: self.next_post_id,
            user_id: post.user_id,
            content: post.content,
            image_url: post.image_url,
            created_at: Utc::now(),
        };
        self.posts.insert(post.id, post.clone());
        post
    }

    fn insert_like(&mut self, like: NewLike) -> Like {
        self.next_like_id += 1;
        let like = Like {
            id: self.next_like_id,
            user_id: like.user_id,
            post_id: like.post_id,
            like_type: like.like_type,
        };
        self.likes.insert(like.id, like.clone());
        like
    }

    fn insert_comment(&mut self, comment: NewComment) -> Comment {
        self.next_comment_id += 1;
        let comment = Comment {
            id: self.next_comment_id,
            user_id: comment.user_id,
            post_id: comment.post_id,
            content: comment.content,
            created_at: Utc::now(),
        };
        self.comments.insert(comment.id, comment.clone());
        comment
    }

    fn insert_share(&mut self, share: NewShare) -> Share {
        self.next_share_id += 1;
        let share = Share {
            id: self.next_share_id,
            user_id: share.user_id,
            post_id: share.post_id,
            comment: share.comment,
            created_at: Utc::now(),
        };
        self.shares.insert(share.id, share.clone());
        share
    }
}

impl MemoryStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
        }
    }

    /// Creates a store pre-populated with the demo fixture set, usable
    /// standalone for demos without an external database.
    pub async fn seeded() -> AppResult<Self> {
        let storage = Self::new();
        seed::seed_demo_data(&storage).await?;
        Ok(storage)
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    // User operations
    async fn get_user(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.tables.lock().await.users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn get_all_users(&self) -> AppResult<Vec<User>> {
        Ok(self.tables.lock().await.users.values().cloned().collect())
    }

    async fn create_user(&self, user: NewUser) -> AppResult<User> {
        Ok(self.tables.lock().await.insert_user(user))
    }

    // Friend operations
    async fn get_friend_requests(&self, user_id: i64) -> AppResult<Vec<Friend>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .friends
            .values()
            .filter(|friend| {
                friend.friend_id == user_id && friend.status == FriendStatus::Pending.as_str()
            })
            .cloned()
            .collect())
    }

    async fn get_friends(&self, user_id: i64) -> AppResult<Vec<Friend>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .friends
            .values()
            .filter(|friend| {
                (friend.user_id == user_id || friend.friend_id == user_id)
                    && friend.status == FriendStatus::Accepted.as_str()
            })
            .cloned()
            .collect())
    }

    async fn send_friend_request(&self, request: NewFriend) -> AppResult<Friend> {
        Ok(self.tables.lock().await.insert_friend(request))
    }

    async fn update_friend_request(&self, id: i64, status: &str) -> AppResult<Option<Friend>> {
        let mut tables = self.tables.lock().await;
        Ok(tables.friends.get_mut(&id).map(|friend| {
            friend.status = status.to_string();
            friend.clone()
        }))
    }

    // Post operations
    async fn get_post(&self, id: i64) -> AppResult<Option<Post>> {
        Ok(self.tables.lock().await.posts.get(&id).cloned())
    }

    async fn get_all_posts(&self) -> AppResult<Vec<Post>> {
        let tables = self.tables.lock().await;
        let mut posts: Vec<Post> = tables.posts.values().cloned().collect();
        posts.sort_by_key(|post| Reverse((post.created_at, post.id)));
        Ok(posts)
    }

    async fn get_user_posts(&self, user_id: i64) -> AppResult<Vec<Post>> {
        let tables = self.tables.lock().await;
        let mut posts: Vec<Post> = tables
            .posts
            .values()
            .filter(|post| post.user_id == user_id)
            .cloned()
            .collect();
        posts.sort_by_key(|post| Reverse((post.created_at, post.id)));
        Ok(posts)
    }

    async fn create_post(&self, post: NewPost) -> AppResult<Post> {
        Ok(self.tables.lock().await.insert_post(post))
    }

    // Like operations
    async fn get_likes(&self, post_id: i64) -> AppResult<Vec<Like>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .likes
            .values()
            .filter(|like| like.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn get_like(&self, user_id: i64, post_id: i64) -> AppResult<Option<Like>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .likes
            .values()
            .find(|like| like.user_id == user_id && like.post_id == post_id)
            .cloned())
    }

    async fn create_like(&self, like: NewLike) -> AppResult<Like> {
        // Probe and insert under the same lock, so the at-most-one
        // invariant holds across concurrent requests.
        let mut tables = self.tables.lock().await;
        if let Some(existing) = tables
            .likes
            .values()
            .find(|l| l.user_id == like.user_id && l.post_id == like.post_id)
        {
            return Ok(existing.clone());
        }
        Ok(tables.insert_like(like))
    }

    async fn delete_like(&self, id: i64) -> AppResult<()> {
        self.tables.lock().await.likes.remove(&id);
        Ok(())
    }

    // Comment operations
    async fn get_comments(&self, post_id: i64) -> AppResult<Vec<Comment>> {
        let tables = self.tables.lock().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by_key(|comment| (comment.created_at, comment.id));
        Ok(comments)
    }

    async fn create_comment(&self, comment: NewComment) -> AppResult<Comment> {
        Ok(self.tables.lock().await.insert_comment(comment))
    }

    // Share operations
    async fn get_shares(&self, post_id: i64) -> AppResult<Vec<Share>> {
        let tables = self.tables.lock().await;
        let mut shares: Vec<Share> = tables
            .shares
            .values()
            .filter(|share| share.post_id == post_id)
            .cloned()
            .collect();
        shares.sort_by_key(|share| Reverse((share.created_at, share.id)));
        Ok(shares)
    }

    async fn get_user_shares(&self, user_id: i64) -> AppResult<Vec<Share>> {
        let tables = self.tables.lock().await;
        let mut shares: Vec<Share> = tables
            .shares
            .values()
            .filter(|share| share.user_id == user_id)
            .cloned()
            .collect();
        shares.sort_by_key(|share| Reverse((share.created_at, share.id)));
        Ok(shares)
    }

    async fn create_share(&self, share: NewShare) -> AppResult<Share> {
        Ok(self.tables.lock().await.insert_share(share))
    }
}
