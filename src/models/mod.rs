//! Data models shared by the stores, routes and client.

pub mod post;
pub mod user;

pub use post::Post;
pub use user::{PublicUser, User, UserStats};
