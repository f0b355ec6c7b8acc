pub mod dto;
pub mod service;
pub mod testimonial;

pub use dto::*;
pub use testimonial::*;
