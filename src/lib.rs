/// Public library interface for the Wellness Tracker MCP server
///
/// This module exports the main server implementation and public types
/// that can be used by other applications or tests.

use std::path::PathBuf;
use thiserror::Error;

// Internal modules
mod domain;
mod engine;
mod mcp;
mod safety;
mod storage;
mod tools;
mod vision;

// Re-export public modules and types
pub use domain::*;
pub use engine::{legacy, InsightEngine, MetricSnapshot};
pub use safety::{SafetyConfig, SafetyFilter, SafetyVerdict};
pub use storage::{catalog, SqliteStorage, StorageError, WellnessStore};
pub use tools::ToolError;
pub use vision::{
    FoodRecognizer, RandomFoodRecognizer, RandomSkinAnalyzer, SkinAnalyzer, VisionError,
};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main wellness tracker server that implements the MCP protocol
///
/// This server manages wellness data through a SQLite database and provides
/// tools for logging metrics, generating insights and safe wellness chat.
pub struct WellnessServer {
    storage: SqliteStorage,
    safety: SafetyFilter,
    food_recognizer: RandomFoodRecognizer,
    skin_analyzer: RandomSkinAnalyzer,
}

impl WellnessServer {
    /// Create a new wellness server with the specified database path
    ///
    /// This will initialize the SQLite database with the required schema
    /// if it doesn't already exist.
    pub async fn new(db_path: PathBuf) -> Result<Self, ServerError> {
        tracing::info!("Initializing wellness server with database: {:?}", db_path);

        let storage = SqliteStorage::new(db_path)?;

        Ok(Self {
            storage,
            safety: SafetyFilter::default(),
            food_recognizer: RandomFoodRecognizer,
            skin_analyzer: RandomSkinAnalyzer,
        })
    }

    /// Seed the product catalog if it is empty
    ///
    /// Idempotent: an already populated catalog is left untouched so repeated
    /// startups don't duplicate products.
    pub fn seed_catalog(&self) -> Result<usize, ServerError> {
        let existing = self.storage.list_products()?;
        if !existing.is_empty() {
            tracing::info!("Catalog already has {} products, skipping seed", existing.len());
            return Ok(0);
        }

        let products = catalog::default_products()?;
        let count = products.len();
        for product in &products {
            self.storage.insert_product(product)?;
        }
        tracing::info!("Seeded {} catalog products", count);
        Ok(count)
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method will block until the server is shut down or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Starting MCP server...");

        // Test database connectivity
        let products = self.storage.list_products()?;
        tracing::info!(
            "Server started successfully, catalog holds {} products",
            products.len()
        );

        let mut mcp_server = mcp::McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    /// Get a reference to the storage layer (useful for testing)
    pub fn storage(&self) -> &SqliteStorage {
        &self.storage
    }

    /// Get a reference to the chat safety filter (useful for testing)
    pub fn safety(&self) -> &SafetyFilter {
        &self.safety
    }

    /// Get a reference to the food recognition stub
    pub fn food_recognizer(&self) -> &RandomFoodRecognizer {
        &self.food_recognizer
    }

    /// Get a reference to the skin analysis stub
    pub fn skin_analyzer(&self) -> &RandomSkinAnalyzer {
        &self.skin_analyzer
    }
}
