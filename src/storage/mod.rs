/// Storage layer for persisting wellness data
///
/// This module handles all database operations using SQLite. It provides
/// a clean interface for storing and retrieving metric records, wearable
/// links, catalog products and chat history.

pub mod catalog;
pub mod migrations;
pub mod sqlite;

// Re-export the main storage types
pub use sqlite::*;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    ChatMessage, LinkId, MetricRecord, MetricType, Product, ProductCategory, ProductId, UserId,
    WearableLink, WearableProvider,
};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: String },

    #[error("Wearable link not found: {link_id}")]
    LinkNotFound { link_id: String },

    #[error("Wearable already connected: {provider}")]
    DuplicateLink { provider: String },

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Trait defining the storage interface for wellness data
///
/// The insight engine consumes only the three read shapes (`recent_by_type`,
/// `today_by_type`, `active_wearable_links`) plus the product lookup; the
/// rest serves the tool surface. Empty result vectors are the normal
/// "no data yet" case, never an error.
pub trait WellnessStore {
    /// Persist a new metric record
    fn create_record(&self, record: &MetricRecord) -> Result<(), StorageError>;

    /// All of a user's records of one type since a point in time
    fn recent_by_type(
        &self,
        user_id: &UserId,
        metric_type: MetricType,
        since: DateTime<Utc>,
    ) -> Result<Vec<MetricRecord>, StorageError>;

    /// A user's records of one type since today's UTC midnight
    fn today_by_type(
        &self,
        user_id: &UserId,
        metric_type: MetricType,
    ) -> Result<Vec<MetricRecord>, StorageError>;

    /// A user's recent records, optionally filtered by type, newest first
    fn records_for_user(
        &self,
        user_id: &UserId,
        metric_type: Option<MetricType>,
        since: DateTime<Utc>,
        limit: Option<u32>,
    ) -> Result<Vec<MetricRecord>, StorageError>;

    /// Persist a new wearable link
    fn create_wearable_link(&self, link: &WearableLink) -> Result<(), StorageError>;

    /// All currently active links for a user
    fn active_wearable_links(&self, user_id: &UserId) -> Result<Vec<WearableLink>, StorageError>;

    /// The active link for one provider, if any
    fn find_active_link(
        &self,
        user_id: &UserId,
        provider: WearableProvider,
    ) -> Result<Option<WearableLink>, StorageError>;

    /// Soft-deactivate a link (links are never hard-deleted)
    fn deactivate_wearable_link(&self, link_id: &LinkId) -> Result<(), StorageError>;

    /// Add a product to the catalog
    fn insert_product(&self, product: &Product) -> Result<(), StorageError>;

    /// The whole catalog in insertion order
    fn list_products(&self) -> Result<Vec<Product>, StorageError>;

    /// Catalog entries in one category, insertion order
    fn products_by_category(
        &self,
        category: ProductCategory,
    ) -> Result<Vec<Product>, StorageError>;

    /// Look up one product by id
    fn get_product(&self, product_id: &ProductId) -> Result<Product, StorageError>;

    /// First product whose name contains the fragment, case-insensitive
    ///
    /// "First" is pinned to catalog insertion order so repeated lookups are
    /// deterministic.
    fn find_product_by_name(&self, fragment: &str) -> Result<Option<Product>, StorageError>;

    /// Persist one chat turn
    fn create_chat_message(&self, message: &ChatMessage) -> Result<(), StorageError>;

    /// A user's most recent chat turns, oldest of the window first
    fn chat_history(&self, user_id: &UserId, limit: u32) -> Result<Vec<ChatMessage>, StorageError>;
}
