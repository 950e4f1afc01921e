//! Request middleware: authentication extractor and error mapping.

pub mod auth;
pub mod error;

pub use auth::CurrentUser;
pub use error::{AppError, AppResult};
