use serde::{Deserialize, Serialize};

use crate::handlers::product::dto::ProductResponse;

/// Response model for the wishlist endpoints
#[derive(Debug, Serialize)]
pub struct WishlistResponse {
    pub guest_id: String,
    pub items: Vec<ProductResponse>,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct AddWishlistItemRequest {
    pub product_id: String,
}
