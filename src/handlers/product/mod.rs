pub mod dto;
pub mod product;
pub mod service;

pub use dto::*;
pub use product::*;
