//! Authentication: password hashing, identity tokens, register/login endpoints.

mod handlers;
mod jwt;
mod password;

pub use handlers::{login, register, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
pub use jwt::{Claims, TokenCodec, TokenError};
pub use password::PasswordHasher;
