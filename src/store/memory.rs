// SPDX-License-Identifier: MIT

//! In-memory store implementations.
//!
//! Each store is a `Mutex<Vec<_>>` plus an atomic id counter. The mutex is
//! the per-store guard the concurrent runtime needs; the counter keeps ids
//! monotonic for the process lifetime so deleting a record never causes a
//! later insert to reuse a live id.

use chrono::{Duration, NaiveDate, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use super::{NewUser, PostStore, UserStore, UserUpdate};
use crate::error::{AppError, Result};
use crate::models::{Post, User, UserStats};

/// In-memory post store.
pub struct MemoryPostStore {
    posts: Mutex<Vec<Post>>,
    next_id: AtomicU64,
}

impl MemoryPostStore {
    /// Empty store.
    pub fn new() -> Self {
        Self {
            posts: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Store seeded with the demo feed.
    pub fn with_seed_data() -> Self {
        let now = Utc::now();
        let posts = vec![
            Post {
                id: 1,
                author: "John Doe".to_string(),
                content: "Welcome to Frenup! This is my first post.".to_string(),
                likes: 5,
                comments: 2,
                created_at: now - Duration::hours(2),
            },
            Post {
                id: 2,
                author: "Jane Smith".to_string(),
                content: "Loving the new dashboard interface! So clean and modern.".to_string(),
                likes: 12,
                comments: 4,
                created_at: now - Duration::hours(4),
            },
            Post {
                id: 3,
                author: "Mike Johnson".to_string(),
                content: "Just connected with some amazing people here. The community is fantastic!"
                    .to_string(),
                likes: 8,
                comments: 1,
                created_at: now - Duration::hours(24),
            },
        ];

        Self {
            next_id: AtomicU64::new(posts.len() as u64 + 1),
            posts: Mutex::new(posts),
        }
    }
}

impl Default for MemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PostStore for MemoryPostStore {
    fn list(&self) -> Vec<Post> {
        let mut posts = self.posts.lock().unwrap().clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }

    fn get(&self, id: u64) -> Option<Post> {
        self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned()
    }

    fn create(&self, author: String, content: String) -> Post {
        let post = Post {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            author,
            content,
            likes: 0,
            comments: 0,
            created_at: Utc::now(),
        };
        // Newest posts go to the head of the feed
        self.posts.lock().unwrap().insert(0, post.clone());
        post
    }

    fn like(&self, id: u64) -> Option<Post> {
        let mut posts = self.posts.lock().unwrap();
        let post = posts.iter_mut().find(|p| p.id == id)?;
        post.likes += 1;
        Some(post.clone())
    }

    fn delete(&self, id: u64) -> Option<Post> {
        let mut posts = self.posts.lock().unwrap();
        let index = posts.iter().position(|p| p.id == id)?;
        Some(posts.remove(index))
    }
}

/// In-memory user store.
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
    next_id: AtomicU64,
}

impl MemoryUserStore {
    /// Empty store.
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Store seeded with the demo community.
    pub fn with_seed_data() -> Self {
        let users = vec![
            User {
                id: 1,
                username: "johndoe".to_string(),
                email: "john@example.com".to_string(),
                name: "John Doe".to_string(),
                avatar: None,
                bio: "Software developer passionate about creating amazing user experiences."
                    .to_string(),
                joined_at: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                stats: UserStats {
                    posts: 15,
                    followers: 127,
                    following: 89,
                },
            },
            User {
                id: 2,
                username: "janesmith".to_string(),
                email: "jane@example.com".to_string(),
                name: "Jane Smith".to_string(),
                avatar: None,
                bio: "Designer and entrepreneur. Love creating beautiful interfaces.".to_string(),
                joined_at: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
                stats: UserStats {
                    posts: 23,
                    followers: 256,
                    following: 134,
                },
            },
            User {
                id: 3,
                username: "mikejohnson".to_string(),
                email: "mike@example.com".to_string(),
                name: "Mike Johnson".to_string(),
                avatar: None,
                bio: "Tech enthusiast and community builder.".to_string(),
                joined_at: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                stats: UserStats {
                    posts: 8,
                    followers: 67,
                    following: 92,
                },
            },
        ];

        Self {
            next_id: AtomicU64::new(users.len() as u64 + 1),
            users: Mutex::new(users),
        }
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for MemoryUserStore {
    fn list(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    fn get(&self, id: u64) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }

    fn get_by_username(&self, username: &str) -> Option<User> {
        let needle = username.to_lowercase();
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username.to_lowercase() == needle)
            .cloned()
    }

    fn create(&self, new: NewUser) -> Result<User> {
        let username = new.username.trim().to_lowercase();
        let email = new.email.trim().to_lowercase();

        let mut users = self.users.lock().unwrap();

        // Uniqueness is checked under the same lock that performs the insert
        if users.iter().any(|u| u.username.to_lowercase() == username) {
            return Err(AppError::Validation("Username already exists".to_string()));
        }
        if users.iter().any(|u| u.email.to_lowercase() == email) {
            return Err(AppError::Validation("Email already exists".to_string()));
        }

        let user = User {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            username,
            email,
            name: new.name.trim().to_string(),
            avatar: None,
            bio: new.bio.trim().to_string(),
            joined_at: Utc::now().date_naive(),
            stats: UserStats::default(),
        };
        users.push(user.clone());
        Ok(user)
    }

    fn update(&self, id: u64, update: UserUpdate) -> Option<User> {
        let mut users = self.users.lock().unwrap();
        let user = users.iter_mut().find(|u| u.id == id)?;

        if let Some(name) = update.name {
            user.name = name.trim().to_string();
        }
        if let Some(bio) = update.bio {
            user.bio = bio.trim().to_string();
        }

        Some(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_ids_are_not_reused_after_delete() {
        let store = MemoryPostStore::with_seed_data();

        store.delete(3).expect("seed post 3 exists");
        let created = store.create("Tester".to_string(), "hello".to_string());

        assert_eq!(created.id, 4);
        assert!(store.list().iter().all(|p| p.id != 3));
    }

    #[test]
    fn like_missing_post_leaves_store_unchanged() {
        let store = MemoryPostStore::with_seed_data();
        let before = store.list();

        assert!(store.like(999).is_none());
        assert_eq!(store.list(), before);
    }

    #[test]
    fn list_is_sorted_newest_first() {
        let store = MemoryPostStore::with_seed_data();
        let posts = store.list();

        for pair in posts.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[test]
    fn list_is_a_defensive_copy() {
        let store = MemoryPostStore::with_seed_data();

        let mut view = store.list();
        view.clear();

        assert_eq!(store.list().len(), 3);
    }

    #[test]
    fn username_uniqueness_is_case_insensitive() {
        let store = MemoryUserStore::with_seed_data();

        let result = store.create(NewUser {
            username: "JohnDoe".to_string(),
            email: "other@example.com".to_string(),
            name: "Other".to_string(),
            bio: String::new(),
        });

        assert!(matches!(result, Err(AppError::Validation(msg)) if msg == "Username already exists"));
    }

    #[test]
    fn email_uniqueness_is_case_insensitive() {
        let store = MemoryUserStore::with_seed_data();

        let result = store.create(NewUser {
            username: "newuser".to_string(),
            email: "John@Example.com".to_string(),
            name: "New".to_string(),
            bio: String::new(),
        });

        assert!(matches!(result, Err(AppError::Validation(msg)) if msg == "Email already exists"));
    }

    #[test]
    fn create_normalizes_username_and_email() {
        let store = MemoryUserStore::new();

        let user = store
            .create(NewUser {
                username: "  NewUser ".to_string(),
                email: " New@Example.COM ".to_string(),
                name: " New User ".to_string(),
                bio: " hi ".to_string(),
            })
            .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.username, "newuser");
        assert_eq!(user.email, "new@example.com");
        assert_eq!(user.name, "New User");
        assert_eq!(user.bio, "hi");
    }

    #[test]
    fn update_merges_only_provided_fields() {
        let store = MemoryUserStore::with_seed_data();

        let updated = store
            .update(
                1,
                UserUpdate {
                    name: Some("Johnny".to_string()),
                    bio: None,
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Johnny");
        assert_eq!(
            updated.bio,
            "Software developer passionate about creating amazing user experiences."
        );
    }

    #[test]
    fn update_missing_user_returns_none() {
        let store = MemoryUserStore::with_seed_data();
        assert!(store.update(42, UserUpdate::default()).is_none());
    }
}
