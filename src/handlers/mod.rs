//! HTTP request handlers.

pub mod http;
pub mod users;

pub use http::*;
pub use users::*;
