//! Authentication: password hashing, session tokens, and the auth service.

mod errors;
mod models;
mod password;
mod service;
mod session;

pub use errors::AuthServiceError;
pub use models::{AuthenticatedUser, Credentials, NewRegistration};
pub use service::{AuthService, MockAuthService, PgAuthService, create_admin};
pub use session::SessionTokens;
