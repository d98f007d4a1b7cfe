// SPDX-License-Identifier: MIT

//! Client-side library: typed API client, persisted token slot, and the
//! authentication session state machine.

pub mod api;
pub mod session;
pub mod token_store;

pub use api::{ApiClient, ClientError};
pub use session::{Session, SessionManager, SessionStatus};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
