//! Data models for accounts and roles.

pub mod account;

pub use account::*;
