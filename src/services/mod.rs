pub mod mailer;
pub mod storage;

pub use mailer::Mailer;
pub use storage::FileStorage;
