use serde::{Deserialize, Serialize};

/// Response model for testimonial API endpoints
#[derive(Debug, Serialize)]
pub struct TestimonialResponse {
    pub id: String,
    pub author: String,
    pub location: Option<String>,
    pub rating: u8,
    pub body: String,
    pub image: Option<String>,
    pub published: bool,
    pub created_at: u64,
    pub updated_at: u64,
}

/// Body of both the public submission and the admin create
#[derive(Debug, Deserialize)]
pub struct CreateTestimonialRequest {
    pub author: String,
    pub location: Option<String>,
    pub rating: u8,
    pub body: String,
    pub image: Option<String>,
    /// Only honored on the admin route
    pub published: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateTestimonialRequest {
    pub author: Option<String>,
    pub location: Option<String>,
    pub rating: Option<u8>,
    pub body: Option<String>,
    pub image: Option<String>,
    pub published: Option<bool>,
}
