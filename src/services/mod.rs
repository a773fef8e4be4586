//! Business logic: registration, login, caller resolution and self-service profile.

pub mod authentication;
pub mod caller;
pub mod profile;
pub mod registration;

pub use authentication::AuthenticationService;
pub use caller::CallerResolver;
pub use profile::ProfileService;
pub use registration::RegistrationService;

use crate::models::Account;

/// An account together with a freshly issued token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub account: Account,
    pub token: String,
}
