use serde::{Deserialize, Serialize};

use crate::database::models::{DiamondSpecs, JewelrySpecs, ProductType};

/// Response model for product API endpoints
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: String, // MongoDB ObjectId as string
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub product_type: ProductType,
    pub category: Option<String>,
    pub price: f64,
    pub currency: String,
    pub images: Vec<String>,
    pub video: Option<String>,
    pub featured: bool,
    pub is_active: bool,
    pub diamond: Option<DiamondSpecs>,
    pub jewelry: Option<JewelrySpecs>,
    pub created_at: u64,
    pub updated_at: u64,
}

/// Request model for creating a new product
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub product_type: ProductType,
    pub category: Option<String>,
    pub price: f64,
    pub currency: Option<String>,
    pub images: Option<Vec<String>>,
    pub video: Option<String>,
    pub featured: Option<bool>,
    pub is_active: Option<bool>,
    pub diamond: Option<DiamondSpecs>,
    pub jewelry: Option<JewelrySpecs>,
}

/// Request model for updating an existing product
#[derive(Debug, Deserialize, Default)]
pub struct UpdateProductRequest {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub images: Option<Vec<String>>,
    pub video: Option<String>,
    pub featured: Option<bool>,
    pub is_active: Option<bool>,
    pub diamond: Option<DiamondSpecs>,
    pub jewelry: Option<JewelrySpecs>,
}

/// Admin listing query
#[derive(Debug, Deserialize, Default)]
pub struct ProductListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    #[serde(rename = "type")]
    pub product_type: Option<ProductType>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct RangeFacet {
    pub min: f64,
    pub max: f64,
}

/// Values available to the diamond search sidebar
#[derive(Debug, Serialize)]
pub struct DiamondFacets {
    pub shapes: Vec<String>,
    pub colors: Vec<String>,
    pub clarities: Vec<String>,
    pub cuts: Vec<String>,
    pub labs: Vec<String>,
    pub carat: Option<RangeFacet>,
    pub price: Option<RangeFacet>,
}

/// Values available to the jewelry search sidebar
#[derive(Debug, Serialize)]
pub struct JewelryFacets {
    pub categories: Vec<String>,
    pub metals: Vec<String>,
    pub styles: Vec<String>,
    pub genders: Vec<String>,
    pub stones: Vec<String>,
    pub price: Option<RangeFacet>,
}
