//! Demo fixture set: six users, four posts, two comments, six likes, and
//! five friend edges. Seeding goes through the storage trait so both
//! backends share it, and is skipped when the store already holds users.

use crate::error::AppResult;
use crate::models::{FriendStatus, NewComment, NewFriend, NewLike, NewPost, NewUser};
use crate::storage::Storage;

fn demo_user(username: &str, full_name: &str, profile_picture: &str, bio: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        password: "password123".to_string(),
        full_name: full_name.to_string(),
        profile_picture: Some(profile_picture.to_string()),
        cover_picture: None,
        bio: Some(bio.to_string()),
    }
}

/// Populates an empty store with the demo data. Returns false when the
/// store already had users and was left untouched.
pub async fn seed_demo_data(storage: &dyn Storage) -> AppResult<bool> {
    if !storage.get_all_users().await?.is_empty() {
        tracing::debug!("storage already has data, skipping seed");
        return Ok(false);
    }

    let john = storage
        .create_user(demo_user(
            "johndoe",
            "John Doe",
            "https://images.unsplash.com/photo-1535713875002-d1d0cf377fde?ixlib=rb-1.2.1&auto=format&fit=crop&w=200&h=200",
            "Software Developer at Tech Co.",
        ))
        .await?;

    let sarah = storage
        .create_user(demo_user(
            "sarahmiller",
            "Sarah Miller",
            "https://images.unsplash.com/photo-1494790108377-be9c29b29330?ixlib=rb-1.2.1&auto=format&fit=crop&w=200&h=200",
            "Artist and Designer",
        ))
        .await?;

    let alex = storage
        .create_user(demo_user(
            "alexjohnson",
            "Alex Johnson",
            "https://images.unsplash.com/photo-1599566150163-29194dcaad36?ixlib=rb-1.2.1&auto=format&fit=crop&w=200&h=200",
            "Travel Enthusiast",
        ))
        .await?;

    let jennifer = storage
        .create_user(demo_user(
            "jenniferchen",
            "Jennifer Chen",
            "https://images.unsplash.com/photo-1580489944761-15a19d654956?ixlib=rb-1.2.1&auto=format&fit=crop&w=200&h=200",
            "Fitness Trainer",
        ))
        .await?;

    let michael = storage
        .create_user(demo_user(
            "michaelbrown",
            "Michael Brown",
            "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?ixlib=rb-1.2.1&auto=format&fit=crop&w=200&h=200",
            "Software Engineer",
        ))
        .await?;

    let james = storage
        .create_user(demo_user(
            "jameswilson",
            "James Wilson",
            "https://images.unsplash.com/photo-1539571696357-5a69c17a67c6?ixlib=rb-1.2.1&auto=format&fit=crop&w=200&h=200",
            "Photographer",
        ))
        .await?;

    let painting = storage
        .create_post(NewPost {
            user_id: sarah.id,
            content: "Just finished this painting today! So happy with how it turned out. What do you think? 🎨 #art #painting #creative".to_string(),
            image_url: Some("https://images.unsplash.com/photo-1579783902614-a3fb3927b6a5?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&h=500".to_string()),
        })
        .await?;

    let hike = storage
        .create_post(NewPost {
            user_id: alex.id,
            content: "Incredible hike at Grand Canyon this weekend! The views were absolutely breathtaking. Anyone else been there recently?".to_string(),
            image_url: Some("https://images.unsplash.com/photo-1501785888041-af3ef285b470?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&h=500".to_string()),
        })
        .await?;

    let sneakers = storage
        .create_post(NewPost {
            user_id: jennifer.id,
            content: "Just got these new sneakers! They're so comfortable and perfect for my morning runs. Best purchase I've made in a long time!".to_string(),
            image_url: Some("https://images.unsplash.com/photo-1542291026-7eec264c27ff?ixlib=rb-1.2.1&auto=format&fit=crop&w=800&h=600".to_string()),
        })
        .await?;

    let job_news = storage
        .create_post(NewPost {
            user_id: michael.id,
            content: "Big news! Just accepted a new job offer at Google! So excited to start this new chapter. Thank you to everyone who supported me through this journey!".to_string(),
            image_url: None,
        })
        .await?;

    storage
        .create_comment(NewComment {
            user_id: michael.id,
            post_id: sneakers.id,
            content: "Those look amazing! What brand are they?".to_string(),
        })
        .await?;

    storage
        .create_comment(NewComment {
            user_id: sarah.id,
            post_id: sneakers.id,
            content: "I have the same pair! They're great for long distances too!".to_string(),
        })
        .await?;

    for (user_id, post_id) in [
        (john.id, painting.id),
        (sarah.id, hike.id),
        (alex.id, sneakers.id),
        (jennifer.id, job_news.id),
        (michael.id, painting.id),
        (james.id, hike.id),
    ] {
        storage
            .create_like(NewLike {
                user_id,
                post_id,
                like_type: "like".to_string(),
            })
            .await?;
    }

    for friend_id in [sarah.id, alex.id, jennifer.id, michael.id] {
        storage
            .send_friend_request(NewFriend {
                user_id: john.id,
                friend_id,
                status: FriendStatus::Accepted.as_str().to_string(),
            })
            .await?;
    }

    storage
        .send_friend_request(NewFriend {
            user_id: james.id,
            friend_id: john.id,
            status: FriendStatus::Pending.as_str().to_string(),
        })
        .await?;

    tracing::info!("seeded demo data");
    Ok(true)
}
