use serde::{Deserialize, Serialize};

use crate::database::models::QuoteStatus;

/// Response model for quote API endpoints
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub id: String,
    pub guest_id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub product_id: Option<String>,
    pub message: String,
    pub budget: Option<f64>,
    pub status: QuoteStatus,
    pub created_at: u64,
    pub updated_at: u64,
}

#[derive(Debug, Deserialize)]
pub struct CreateQuoteRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub product_id: Option<String>,
    pub message: String,
    pub budget: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuoteStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct QuoteListQuery {
    pub status: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}
