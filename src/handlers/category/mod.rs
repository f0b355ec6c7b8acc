pub mod category;
pub mod dto;
pub mod service;

pub use category::*;
pub use dto::*;
