use serde::{Deserialize, Serialize};
use std::fmt;

use super::utils::now_ts;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Diamond,
    Jewelry,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Diamond => "diamond",
            ProductType::Jewelry => "jewelry",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loose-stone attributes
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct DiamondSpecs {
    pub shape: String,
    pub carat: f64,
    pub color: String,
    pub clarity: String,
    pub cut: Option<String>,
    pub polish: Option<String>,
    pub symmetry: Option<String>,
    pub fluorescence: Option<String>,
    pub lab: Option<String>,
    pub certificate_number: Option<String>,
    pub table_percent: Option<f64>,
    pub depth_percent: Option<f64>,
    pub measurements: Option<String>,
}

impl DiamondSpecs {
    /// Bring values onto the casing the listing filters query with:
    /// shapes lowercase, grades and lab codes uppercase.
    pub fn normalize(mut self) -> Self {
        fn upper(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_uppercase())
                .filter(|v| !v.is_empty())
        }

        self.shape = self.shape.trim().to_lowercase();
        self.color = self.color.trim().to_uppercase();
        self.clarity = self.clarity.trim().to_uppercase();
        self.cut = upper(self.cut);
        self.polish = upper(self.polish);
        self.symmetry = upper(self.symmetry);
        self.fluorescence = upper(self.fluorescence);
        self.lab = upper(self.lab);
        self.certificate_number = self
            .certificate_number
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        self
    }
}

/// Finished-piece attributes
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct JewelrySpecs {
    pub metal: Option<String>,
    pub style: Option<String>,
    pub gender: Option<String>,
    pub stone: Option<String>,
    pub weight_grams: Option<f64>,
}

impl JewelrySpecs {
    pub fn normalize(self) -> Self {
        fn lower(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_lowercase())
                .filter(|v| !v.is_empty())
        }

        Self {
            metal: lower(self.metal),
            style: lower(self.style),
            gender: lower(self.gender),
            stone: lower(self.stone),
            weight_grams: self.weight_grams,
        }
    }
}

/// Product model for MongoDB
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<bson::oid::ObjectId>,
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub product_type: ProductType,
    #[serde(default)]
    pub category: Option<String>,
    pub price: f64,
    pub currency: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub video: Option<String>,
    #[serde(default)]
    pub featured: bool,
    pub is_active: bool,
    #[serde(default)]
    pub diamond: Option<DiamondSpecs>,
    #[serde(default)]
    pub jewelry: Option<JewelrySpecs>,
    pub created_at: u64,
    pub updated_at: u64,
}

impl Product {
    pub fn new(sku: String, name: String, product_type: ProductType, price: f64) -> Self {
        Self {
            id: None,
            sku,
            name,
            description: None,
            product_type,
            category: None,
            price,
            currency: "USD".to_string(),
            images: Vec::new(),
            video: None,
            featured: false,
            is_active: true,
            diamond: None,
            jewelry: None,
            created_at: now_ts(),
            updated_at: now_ts(),
        }
    }
}
