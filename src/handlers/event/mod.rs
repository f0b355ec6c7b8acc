pub mod dto;
pub mod event;
pub mod service;

pub use dto::*;
pub use event::*;
