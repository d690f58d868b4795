//! chbridge Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, logging, and error handling for the chbridge project.
//!
//! # Overview
//!
//! This crate provides common functionality used across all chbridge
//! workspace members:
//!
//! - **Error Handling**: Base error and result types
//! - **Logging**: Centralized tracing configuration
//! - **Types**: Shared domain types (transfer direction, connections)

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{BridgeError, Result};
pub use types::{ConnectionConfig, Direction};
