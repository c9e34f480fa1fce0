/// Domain module containing core business logic and data types
///
/// This module defines the core entities (MetricRecord, WearableLink,
/// Product, Insight) and their validation rules. These types represent the
/// fundamental concepts in our wellness tracking system.

pub mod chat;
pub mod insight;
pub mod product;
pub mod record;
pub mod types;
pub mod wearable;

// Re-export public types for easy access
pub use chat::*;
pub use insight::*;
pub use product::*;
pub use record::*;
pub use types::*;
pub use wearable::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid metric type: {0}")]
    InvalidMetricType(String),

    #[error("Invalid data source: {0}")]
    InvalidSource(String),

    #[error("Invalid wearable provider: {0}")]
    InvalidProvider(String),

    #[error("Invalid tier: {0}")]
    InvalidTier(String),

    #[error("Invalid value: {message}")]
    InvalidValue { message: String },
}
