pub mod dto;
pub mod form;
pub mod service;

pub use dto::*;
pub use form::*;
