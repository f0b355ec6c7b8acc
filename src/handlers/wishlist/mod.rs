pub mod dto;
pub mod service;
pub mod wishlist;

pub use dto::*;
pub use wishlist::*;
