pub mod password;
pub mod role;
pub mod token;

pub use password::{CredentialError, PasswordHasher};
pub use role::{Access, Role};
pub use token::{Claims, IssuedToken, TokenError, TokenService};
