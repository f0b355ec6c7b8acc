pub mod category;
pub mod content;
pub mod event;
pub mod form;
pub mod guest;
pub mod product;
pub mod quote;
pub mod testimonial;
pub mod utils;
pub mod wishlist;

// Re-export models explicitly to avoid ambiguous glob re-exports
pub use category::{slugify, Category};
pub use content::{AboutContent, ContentBlock, HomeContent, UiContent};
pub use event::Event;
pub use form::{FormKind, FormSubmission};
pub use guest::Guest;
pub use product::{DiamondSpecs, JewelrySpecs, Product, ProductType};
pub use quote::{Quote, QuoteStatus};
pub use testimonial::Testimonial;
pub use utils::{id_to_string, now_ts, parse_object_id};
pub use wishlist::Wishlist;
