// MongoDB modules
pub mod models;
pub mod mongodb;
pub mod query;

// Re-export commonly used types
pub use self::mongodb::MongoDbClient;

/// Collection names shared by services and index setup
pub mod collections {
    pub const PRODUCTS: &str = "products";
    pub const CATEGORIES: &str = "categories";
    pub const GUESTS: &str = "guests";
    pub const WISHLISTS: &str = "wishlists";
    pub const QUOTES: &str = "quotes";
    pub const TESTIMONIALS: &str = "testimonials";
    pub const EVENTS: &str = "events";
    pub const FORMS: &str = "forms";
}
