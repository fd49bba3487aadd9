//! Common types and utilities shared across chaintree.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants
//! - Error types
//! - Identifiers (NodeId)

pub mod config;
pub mod error;
mod node_id;

pub use error::{Error, Result};
pub use node_id::NodeId;
