/// Transient Insight entity produced by the rules engine
///
/// Insights are generated fresh on every request and never persisted. Each
/// carries a priority used for ranking and optionally references a catalog
/// product; the reference is embedded at generation time and is advisory,
/// not a foreign-key obligation.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{InsightCategory, Priority, ProductId};

/// Unique identifier for a generated insight
///
/// Fresh per generation; two runs over identical data produce identical
/// insights apart from these ids and the generation timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct InsightId(pub Uuid);

impl InsightId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn to_string(&self) -> String {
        self.0.to_string()
    }
}

/// A generated wellness observation
#[derive(Debug, Clone, Serialize)]
pub struct Insight {
    /// Opaque unique token for this generation
    pub id: InsightId,
    /// Short headline
    pub title: String,
    /// Human-readable body; embeds computed values where relevant
    pub message: String,
    /// Wellness area this insight belongs to
    pub category: InsightCategory,
    /// Ranking tier
    pub priority: Priority,
    /// Optional product recommendation looked up at generation time
    pub recommended_product_id: Option<ProductId>,
    /// Symbolic icon tag for the client UI
    pub icon: String,
    /// When this insight was generated
    #[serde(rename = "timestamp")]
    pub generated_at: DateTime<Utc>,
}

impl Insight {
    /// Create a new insight with no product recommendation
    pub fn new(
        title: &str,
        message: String,
        category: InsightCategory,
        priority: Priority,
        icon: &str,
    ) -> Self {
        Self {
            id: InsightId::new(),
            title: title.to_string(),
            message,
            category,
            priority,
            recommended_product_id: None,
            icon: icon.to_string(),
            generated_at: Utc::now(),
        }
    }

    /// Attach an optional product recommendation
    pub fn with_product(mut self, product_id: Option<ProductId>) -> Self {
        self.recommended_product_id = product_id;
        self
    }
}
