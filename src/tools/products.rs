/// Tools for browsing the product catalog
///
/// This module implements the product_list and product_get MCP tools.

use serde::{Deserialize, Serialize};

use crate::domain::{Product, ProductCategory, ProductId};
use crate::storage::WellnessStore;
use crate::tools::ToolError;

/// Parameters for listing catalog products
#[derive(Debug, Deserialize)]
pub struct ProductListParams {
    pub category: Option<String>, // omit for the whole catalog
}

/// Response listing catalog products
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub count: usize,
}

/// List catalog products, optionally filtered by category
pub fn product_list<S: WellnessStore>(
    storage: &S,
    params: ProductListParams,
) -> Result<ProductListResponse, ToolError> {
    let products = match params.category.as_deref() {
        Some(raw) => {
            let category = ProductCategory::parse(raw)
                .map_err(|e| ToolError::invalid(e.to_string()))?;
            storage.products_by_category(category)?
        }
        None => storage.list_products()?,
    };
    let count = products.len();

    Ok(ProductListResponse { products, count })
}

/// Parameters for fetching one product
#[derive(Debug, Deserialize)]
pub struct ProductGetParams {
    pub product_id: String,
}

/// Response carrying one catalog product
#[derive(Debug, Serialize)]
pub struct ProductGetResponse {
    pub product: Product,
}

/// Fetch one catalog product by id
pub fn product_get<S: WellnessStore>(
    storage: &S,
    params: ProductGetParams,
) -> Result<ProductGetResponse, ToolError> {
    let product_id = ProductId::from_string(&params.product_id)
        .map_err(|_| ToolError::invalid("Invalid product ID format"))?;

    let product = storage.get_product(&product_id)?;
    Ok(ProductGetResponse { product })
}
