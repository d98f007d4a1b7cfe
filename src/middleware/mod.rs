// SPDX-License-Identifier: MIT

//! HTTP middleware.

pub mod rate_limit;
pub mod security;
