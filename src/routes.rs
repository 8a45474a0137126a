// HTTP request layer - maps the REST surface onto storage calls and owns
// the input validation and status mapping. The storage backend arrives as
// an injected trait object; nothing here knows which one it is.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, patch, post},
    Router,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::{
    Comment, Friend, FriendStatus, Like, NewComment, NewFriend, NewLike, NewPost, NewShare,
    NewUser, Post, Share, User,
};
use crate::storage::Storage;

type Store = Arc<dyn Storage>;

pub fn create_router(storage: Store) -> Router {
    Router::new()
        // User routes
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/{id}", get(get_user))
        .route("/api/users/{id}/posts", get(list_user_posts))
        .route("/api/users/{id}/friends", get(list_friends))
        .route("/api/users/{id}/friend-requests", get(list_friend_requests))
        .route("/api/users/{id}/shares", get(list_user_shares))
        // Post routes
        .route("/api/posts", get(list_posts).post(create_post))
        .route("/api/posts/{id}", get(get_post))
        .route("/api/posts/{id}/likes", get(list_likes))
        .route("/api/posts/{id}/comments", get(list_comments))
        .route("/api/posts/{id}/shares", get(list_shares))
        // Like routes
        .route("/api/likes", post(create_like))
        .route("/api/likes/{id}", delete(delete_like))
        // Comment routes
        .route("/api/comments", post(create_comment))
        // Friend routes
        .route("/api/friends", post(send_friend_request))
        .route("/api/friends/{id}", patch(update_friend_request))
        // Share routes
        .route("/api/shares", post(create_share))
        .with_state(storage)
}

// User handlers

async fn list_users(State(storage): State<Store>) -> AppResult<Json<Vec<User>>> {
    Ok(Json(storage.get_all_users().await?))
}

async fn get_user(
    State(storage): State<Store>,
    Path(id): Path<i64>,
) -> AppResult<Json<User>> {
    match storage.get_user(id).await? {
        Some(user) => Ok(Json(user)),
        None => Err(AppError::NotFound(format!("User {} not found", id))),
    }
}

async fn create_user(
    State(storage): State<Store>,
    Json(user): Json<NewUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    if user.username.trim().is_empty() {
        return Err(AppError::Validation("Username must not be empty".to_string()));
    }
    if storage.get_user_by_username(&user.username).await?.is_some() {
        return Err(AppError::Conflict("Username already exists".to_string()));
    }
    let user = storage.create_user(user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

// Post handlers

async fn list_posts(State(storage): State<Store>) -> AppResult<Json<Vec<Post>>> {
    Ok(Json(storage.get_all_posts().await?))
}

async fn get_post(
    State(storage): State<Store>,
    Path(id): Path<i64>,
) -> AppResult<Json<Post>> {
    match storage.get_post(id).await? {
        Some(post) => Ok(Json(post)),
        None => Err(AppError::NotFound(format!("Post {} not found", id))),
    }
}

async fn list_user_posts(
    State(storage): State<Store>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<Post>>> {
    Ok(Json(storage.get_user_posts(user_id).await?))
}

async fn create_post(
    State(storage): State<Store>,
    Json(post): Json<NewPost>,
) -> AppResult<(StatusCode, Json<Post>)> {
    if post.content.trim().is_empty() {
        return Err(AppError::Validation("Post content must not be empty".to_string()));
    }
    let post = storage.create_post(post).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

// Like handlers

async fn list_likes(
    State(storage): State<Store>,
    Path(post_id): Path<i64>,
) -> AppResult<Json<Vec<Like>>> {
    Ok(Json(storage.get_likes(post_id).await?))
}

async fn create_like(
    State(storage): State<Store>,
    Json(like): Json<NewLike>,
) -> AppResult<(StatusCode, Json<Like>)> {
    let like = storage.create_like(like).await?;
    Ok((StatusCode::CREATED, Json(like)))
}

async fn delete_like(
    State(storage): State<Store>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    storage.delete_like(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Comment handlers

async fn list_comments(
    State(storage): State<Store>,
    Path(post_id): Path<i64>,
) -> AppResult<Json<Vec<Comment>>> {
    Ok(Json(storage.get_comments(post_id).await?))
}

async fn create_comment(
    State(storage): State<Store>,
    Json(comment): Json<NewComment>,
) -> AppResult<(StatusCode, Json<Comment>)> {
    if comment.content.trim().is_empty() {
        return Err(AppError::Validation(
            "Comment content must not be empty".to_string(),
        ));
    }
    let comment = storage.create_comment(comment).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

// Friend handlers

async fn list_friends(
    State(storage): State<Store>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<Friend>>> {
    Ok(Json(storage.get_friends(user_id).await?))
}

async fn list_friend_requests(
    State(storage): State<Store>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<Friend>>> {
    Ok(Json(storage.get_friend_requests(user_id).await?))
}

async fn send_friend_request(
    State(storage): State<Store>,
    Json(request): Json<NewFriend>,
) -> AppResult<(StatusCode, Json<Friend>)> {
    if FriendStatus::parse(&request.status).is_none() {
        return Err(AppError::Validation(format!(
            "Unknown friend status '{}'",
            request.status
        )));
    }
    let request = storage.send_friend_request(request).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

#[derive(Debug, Deserialize)]
struct UpdateFriendRequest {
    status: String,
}

async fn update_friend_request(
    State(storage): State<Store>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateFriendRequest>,
) -> AppResult<Json<Friend>> {
    // Only the two terminal statuses may be set through the API.
    let status = match FriendStatus::parse(&body.status) {
        Some(status @ (FriendStatus::Accepted | FriendStatus::Rejected)) => status,
        _ => {
            return Err(AppError::BadRequest(
                "Invalid status. Must be 'accepted' or 'rejected'".to_string(),
            ))
        }
    };
    match storage.update_friend_request(id, status.as_str()).await? {
        Some(friend) => Ok(Json(friend)),
        None => Err(AppError::NotFound(format!(
            "Friend request {} not found",
            id
        ))),
    }
}

// Share handlers

async fn list_shares(
    State(storage): State<Store>,
    Path(post_id): Path<i64>,
) -> AppResult<Json<Vec<Share>>> {
    Ok(Json(storage.get_shares(post_id).await?))
}

async fn list_user_shares(
    State(storage): State<Store>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<Share>>> {
    Ok(Json(storage.get_user_shares(user_id).await?))
}

async fn create_share(
    State(storage): State<Store>,
    Json(share): Json<NewShare>,
) -> AppResult<(StatusCode, Json<Share>)> {
    let share = storage.create_share(share).await?;
    Ok((StatusCode::CREATED, Json(share)))
}
