pub mod auth;
pub mod category;
pub mod content;
pub mod event;
pub mod form;
pub mod guest;
pub mod product;
pub mod quote;
pub mod session;
pub mod testimonial;
pub mod upload;
pub mod wishlist;

pub use category::*;
pub use content::*;
pub use event::*;
pub use form::*;
pub use guest::*;
pub use product::*;
pub use quote::*;
pub use testimonial::*;
pub use upload::*;
pub use wishlist::*;
