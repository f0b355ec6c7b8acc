pub mod category;
pub mod content;
pub mod event;
pub mod form;
pub mod product;
pub mod quote;
pub mod routes;
pub mod session;
pub mod testimonial;
pub mod upload;
pub mod wishlist;

pub use routes::*;
