pub mod content;
pub mod service;

pub use content::*;
