pub mod dto;
pub mod guest;
pub mod service;

pub use dto::*;
pub use guest::*;
