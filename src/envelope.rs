// SPDX-License-Identifier: MIT

//! The uniform response envelope shared by every endpoint.

use serde::{Deserialize, Serialize};

/// Wire shape of every API response: `{ success, message?, data?, count? }`.
///
/// The same type is used on both sides: handlers serialize it, the client
/// deserializes it. Absent fields are omitted from the JSON entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> Envelope<T> {
    /// Successful response carrying data.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            count: None,
        }
    }

    /// Successful response with a human-readable message and data.
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            count: None,
        }
    }

    /// Failed response carrying only a message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            count: None,
        }
    }
}

impl<T> Envelope<Vec<T>> {
    /// Successful list response; `count` mirrors the item count.
    pub fn list(items: Vec<T>) -> Self {
        Self {
            success: true,
            message: None,
            count: Some(items.len()),
            data: Some(items),
        }
    }
}
