/// MCP tools for wellness tracking
///
/// This module contains all the MCP tools that external clients (like Claude)
/// can call to log metrics, read insights, chat and manage wearables.

use thiserror::Error;

use crate::storage::StorageError;
use crate::vision::VisionError;

pub mod chat;
pub mod insights;
pub mod log;
pub mod products;
pub mod scan;
pub mod wearable;

// Re-export tool functions for easy access
pub use chat::*;
pub use insights::*;
pub use log::*;
pub use products::*;
pub use scan::*;
pub use wearable::*;

/// Errors surfaced by the tool layer
///
/// Validation problems stay distinct from storage failures so the protocol
/// layer can map them to different error codes.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Tier limit: {0}")]
    TierLimit(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Vision(#[from] VisionError),
}

impl ToolError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParams(message.into())
    }
}
