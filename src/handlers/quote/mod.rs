pub mod dto;
pub mod quote;
pub mod service;

pub use dto::*;
pub use quote::*;
