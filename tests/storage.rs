use friendfeed::models::{
    FriendStatus, NewComment, NewFriend, NewLike, NewPost, NewShare, NewUser,
};
use friendfeed::storage::{MemoryStorage, Storage};

fn new_user(username: &str, full_name: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        password: "password123".to_string(),
        full_name: full_name.to_string(),
        profile_picture: None,
        cover_picture: None,
        bio: None,
    }
}

fn new_post(user_id: i64, content: &str) -> NewPost {
    NewPost {
        user_id,
        content: content.to_string(),
        image_url: None,
    }
}

fn new_like(user_id: i64, post_id: i64) -> NewLike {
    NewLike {
        user_id,
        post_id,
        like_type: "like".to_string(),
    }
}

fn new_comment(user_id: i64, post_id: i64, content: &str) -> NewComment {
    NewComment {
        user_id,
        post_id,
        content: content.to_string(),
    }
}

fn new_share(user_id: i64, post_id: i64, comment: Option<&str>) -> NewShare {
    NewShare {
        user_id,
        post_id,
        comment: comment.map(str::to_string),
    }
}

fn friend_edge(user_id: i64, friend_id: i64, status: FriendStatus) -> NewFriend {
    NewFriend {
        user_id,
        friend_id,
        status: status.as_str().to_string(),
    }
}

#[tokio::test]
async fn ids_are_assigned_from_one() {
    let storage = MemoryStorage::new();

    let first = storage.create_user(new_user("ann", "Ann Arbor")).await.unwrap();
    let second = storage.create_user(new_user("ben", "Ben Oak")).await.unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
}

#[tokio::test]
async fn username_lookup_is_exact() {
    let storage = MemoryStorage::new();
    storage.create_user(new_user("ann", "Ann Arbor")).await.unwrap();

    let found = storage.get_user_by_username("ann").await.unwrap();
    assert_eq!(found.unwrap().full_name, "Ann Arbor");

    assert!(storage.get_user_by_username("an").await.unwrap().is_none());
    assert!(storage.get_user_by_username("ANN").await.unwrap().is_none());
}

#[tokio::test]
async fn absent_lookups_are_not_errors() {
    let storage = MemoryStorage::new();

    assert!(storage.get_user(42).await.unwrap().is_none());
    assert!(storage.get_post(42).await.unwrap().is_none());
    assert!(storage.get_like(1, 1).await.unwrap().is_none());
    assert!(storage.update_friend_request(42, "accepted").await.unwrap().is_none());
}

#[tokio::test]
async fn create_like_is_idempotent() {
    let storage = MemoryStorage::new();

    let first = storage.create_like(new_like(1, 1)).await.unwrap();
    let second = storage.create_like(new_like(1, 1)).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(storage.get_likes(1).await.unwrap().len(), 1);

    // A different pair still creates a fresh row.
    let other = storage.create_like(new_like(2, 1)).await.unwrap();
    assert_ne!(other.id, first.id);
    assert_eq!(storage.get_likes(1).await.unwrap().len(), 2);
}

#[tokio::test]
async fn delete_like_removes_and_ignores_unknown_ids() {
    let storage = MemoryStorage::new();

    let like = storage.create_like(new_like(1, 1)).await.unwrap();
    storage.delete_like(like.id).await.unwrap();
    assert!(storage.get_likes(1).await.unwrap().is_empty());

    // Deleting an id that never existed is a no-op.
    storage.delete_like(999).await.unwrap();
}

#[tokio::test]
async fn posts_are_newest_first() {
    let storage = MemoryStorage::new();

    let oldest = storage.create_post(new_post(1, "first")).await.unwrap();
    let middle = storage.create_post(new_post(2, "second")).await.unwrap();
    let newest = storage.create_post(new_post(1, "third")).await.unwrap();

    let all: Vec<i64> = storage
        .get_all_posts()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(all, vec![newest.id, middle.id, oldest.id]);

    let mine: Vec<i64> = storage
        .get_user_posts(1)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(mine, vec![newest.id, oldest.id]);
}

#[tokio::test]
async fn comments_are_oldest_first() {
    let storage = MemoryStorage::new();

    let first = storage.create_comment(new_comment(1, 7, "first")).await.unwrap();
    let second = storage.create_comment(new_comment(2, 7, "second")).await.unwrap();
    storage.create_comment(new_comment(2, 8, "elsewhere")).await.unwrap();

    let ordered: Vec<i64> = storage
        .get_comments(7)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ordered, vec![first.id, second.id]);
}

#[tokio::test]
async fn shares_are_newest_first() {
    let storage = MemoryStorage::new();

    let oldest = storage.create_share(new_share(1, 7, None)).await.unwrap();
    let newest = storage.create_share(new_share(1, 7, Some("look at this"))).await.unwrap();
    storage.create_share(new_share(2, 8, None)).await.unwrap();

    let by_post: Vec<i64> = storage
        .get_shares(7)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(by_post, vec![newest.id, oldest.id]);

    let by_user: Vec<i64> = storage
        .get_user_shares(1)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(by_user, vec![newest.id, oldest.id]);
}

#[tokio::test]
async fn friend_requests_are_pending_edges_toward_the_recipient() {
    let storage = MemoryStorage::new();

    storage
        .send_friend_request(friend_edge(1, 2, FriendStatus::Pending))
        .await
        .unwrap();
    storage
        .send_friend_request(friend_edge(3, 2, FriendStatus::Accepted))
        .await
        .unwrap();

    // Only the recipient sees the pending edge; accepted edges are not requests.
    let requests = storage.get_friend_requests(2).await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].user_id, 1);

    assert!(storage.get_friend_requests(1).await.unwrap().is_empty());
}

#[tokio::test]
async fn accepted_friendship_is_symmetric() {
    let storage = MemoryStorage::new();

    let edge = storage
        .send_friend_request(friend_edge(1, 2, FriendStatus::Accepted))
        .await
        .unwrap();

    let of_requester: Vec<i64> = storage
        .get_friends(1)
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.id)
        .collect();
    let of_recipient: Vec<i64> = storage
        .get_friends(2)
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.id)
        .collect();

    assert_eq!(of_requester, vec![edge.id]);
    assert_eq!(of_recipient, vec![edge.id]);
    assert!(storage.get_friends(3).await.unwrap().is_empty());
}

#[tokio::test]
async fn friend_request_status_transitions() {
    let storage = MemoryStorage::new();

    let edge = storage
        .send_friend_request(friend_edge(1, 2, FriendStatus::Pending))
        .await
        .unwrap();
    assert_eq!(edge.status, "pending");

    let accepted = storage
        .update_friend_request(edge.id, "accepted")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(accepted.status, "accepted");
    assert_eq!(storage.get_friends(2).await.unwrap().len(), 1);

    // Repeat transitions are not guarded against; the second update still
    // succeeds. Pinned behavior, possibly a gap.
    let rejected = storage
        .update_friend_request(edge.id, "rejected")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(rejected.status, "rejected");
    assert!(storage.get_friends(2).await.unwrap().is_empty());
}

#[tokio::test]
async fn seeded_store_matches_the_fixture() {
    let storage = MemoryStorage::seeded().await.unwrap();

    assert_eq!(storage.get_all_users().await.unwrap().len(), 6);
    assert_eq!(storage.get_all_posts().await.unwrap().len(), 4);

    // Two comments on the sneakers post, oldest first.
    let comments = storage.get_comments(3).await.unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].user_id, 5);
    assert_eq!(comments[1].user_id, 2);

    // Six likes spread over the four posts.
    let mut like_count = 0;
    for post_id in 1..=4 {
        like_count += storage.get_likes(post_id).await.unwrap().len();
    }
    assert_eq!(like_count, 6);

    // John has four accepted friends and one pending request from James.
    assert_eq!(storage.get_friends(1).await.unwrap().len(), 4);
    let requests = storage.get_friend_requests(1).await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].user_id, 6);

    // Seeding a non-empty store is a no-op.
    assert!(!friendfeed::seed::seed_demo_data(&storage).await.unwrap());
    assert_eq!(storage.get_all_users().await.unwrap().len(), 6);
}

#[tokio::test]
async fn end_to_end_scenario() {
    let storage = MemoryStorage::new();

    let user = storage.create_user(new_user("a", "A")).await.unwrap();
    assert_eq!(user.id, 1);

    let post = storage.create_post(new_post(user.id, "hello")).await.unwrap();
    assert_eq!(post.id, 1);

    let like = storage.create_like(new_like(user.id, post.id)).await.unwrap();
    assert_eq!(like.id, 1);
    assert_eq!(like.like_type, "like");

    let again = storage.create_like(new_like(user.id, post.id)).await.unwrap();
    assert_eq!(again.id, like.id);

    storage.delete_like(like.id).await.unwrap();
    assert!(storage.get_likes(post.id).await.unwrap().is_empty());
}
