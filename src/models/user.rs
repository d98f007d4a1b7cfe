//! User model for storage and API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregate counters shown on a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub posts: u32,
    pub followers: u32,
    pub following: u32,
}

/// A registered user as held in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned id, monotonic for the process lifetime
    pub id: u64,
    /// Lowercased, unique handle
    pub username: String,
    /// Lowercased, unique email address
    pub email: String,
    /// Display name
    pub name: String,
    /// Avatar URL, if any
    pub avatar: Option<String>,
    /// Profile bio
    pub bio: String,
    /// Date the account was created
    pub joined_at: NaiveDate,
    pub stats: UserStats,
}

/// Public projection of a user: everything except the email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: u64,
    pub username: String,
    pub name: String,
    pub avatar: Option<String>,
    pub bio: String,
    pub joined_at: NaiveDate,
    pub stats: UserStats,
}

impl User {
    /// Strip fields that must not leave the server.
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username.clone(),
            name: self.name.clone(),
            avatar: self.avatar.clone(),
            bio: self.bio.clone(),
            joined_at: self.joined_at,
            stats: self.stats.clone(),
        }
    }
}
