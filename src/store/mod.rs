// SPDX-License-Identifier: MIT

//! Injectable data stores.
//!
//! Handlers only ever see the `PostStore`/`UserStore` traits, so a real
//! persistence backend can be dropped in without touching any route code.
//! The shipped implementations live in [`memory`] and hold everything in
//! process memory behind a per-store mutex.

pub mod memory;

pub use memory::{MemoryPostStore, MemoryUserStore};

use crate::error::Result;
use crate::models::{Post, User};

/// Fields accepted when creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub name: String,
    pub bio: String,
}

/// Fields accepted when updating a user; absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
}

/// Ordered collection of posts.
///
/// `list` returns a defensive copy sorted newest-first, never a live view.
/// Mutations that miss return `None` and leave the store untouched.
pub trait PostStore: Send + Sync {
    /// All posts, newest first.
    fn list(&self) -> Vec<Post>;

    /// Look up one post by id.
    fn get(&self, id: u64) -> Option<Post>;

    /// Insert a new post at the head of the feed and return it.
    /// The caller is responsible for validating `content` beforehand.
    fn create(&self, author: String, content: String) -> Post;

    /// Increment the like count, returning the updated post.
    fn like(&self, id: u64) -> Option<Post>;

    /// Remove a post by id, returning the removed record.
    fn delete(&self, id: u64) -> Option<Post>;
}

/// Collection of registered users.
///
/// Username and email are unique case-insensitively at creation time;
/// updates only merge the provided fields.
pub trait UserStore: Send + Sync {
    /// All users, in insertion order. A defensive copy.
    fn list(&self) -> Vec<User>;

    /// Look up one user by id.
    fn get(&self, id: u64) -> Option<User>;

    /// Look up one user by username, case-insensitively.
    fn get_by_username(&self, username: &str) -> Option<User>;

    /// Create a user, enforcing username/email uniqueness.
    fn create(&self, new: NewUser) -> Result<User>;

    /// Merge the provided fields into an existing user.
    fn update(&self, id: u64, update: UserUpdate) -> Option<User>;
}
