//! # Jira Cloud API client
//!
//! A small async wrapper over the Jira Cloud REST API: authenticated
//! GET/POST/PUT primitives plus issue search and creation, comments,
//! transitions, user lookup and project listing. Issues, users and projects
//! are passed through as JSON.

pub mod client;
pub mod error;
mod issues;
pub mod models;
pub mod pagination;
mod projects;
pub mod request;
mod users;

pub use client::{Auth, DEFAULT_API_VERSION, JiraClient, JiraConfig, REQUEST_TIMEOUT, RetryPolicy};
pub use error::{Error, Result};
pub use models::*;
pub use pagination::{CursorPager, DEFAULT_PAGE_SIZE, OffsetPager, OffsetWindow};
pub use request::{ResourceRequest, Target};
