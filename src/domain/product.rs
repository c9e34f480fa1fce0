/// Product entity for the wellness marketplace catalog
///
/// Products are persisted catalog entries that the insight engine can attach
/// to an insight as a recommendation, looked up by case-insensitive name
/// substring in catalog insertion order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, ProductId};

/// Categories products are filed under in the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Sleep,
    Energy,
    Skin,
    Fitness,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Sleep => "sleep",
            ProductCategory::Energy => "energy",
            ProductCategory::Skin => "skin",
            ProductCategory::Fitness => "fitness",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "sleep" => Ok(ProductCategory::Sleep),
            "energy" => Ok(ProductCategory::Energy),
            "skin" => Ok(ProductCategory::Skin),
            "fitness" => Ok(ProductCategory::Fitness),
            other => Err(DomainError::Validation {
                message: format!("Invalid product category: {}", other),
            }),
        }
    }
}

/// A recommendable wellness product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier for this product
    pub id: ProductId,
    /// Display name, also the target of the engine's substring lookup
    pub name: String,
    /// One-line summary shown in list views
    pub short_description: String,
    /// Full marketing description
    pub description: String,
    /// Marketplace category
    pub category: ProductCategory,
    /// Price in the shop's currency
    pub price: f64,
    /// Product image location
    pub image_url: String,
    /// When the product was added to the catalog
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Create a new product with validation
    pub fn new(
        name: String,
        short_description: String,
        description: String,
        category: ProductCategory,
        price: f64,
        image_url: String,
    ) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "Product name cannot be empty".to_string(),
            });
        }

        if !price.is_finite() || price < 0.0 {
            return Err(DomainError::InvalidValue {
                message: "Product price must be a non-negative number".to_string(),
            });
        }

        Ok(Self {
            id: ProductId::new(),
            name,
            short_description,
            description,
            category,
            price,
            image_url,
            created_at: Utc::now(),
        })
    }

    /// Create a product from existing data (used when loading from database)
    pub fn from_existing(
        id: ProductId,
        name: String,
        short_description: String,
        description: String,
        category: ProductCategory,
        price: f64,
        image_url: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            short_description,
            description,
            category,
            price,
            image_url,
            created_at,
        }
    }
}
