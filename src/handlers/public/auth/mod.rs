// handlers/public/auth/mod.rs - token acquisition, no authentication required

use serde::Serialize;

pub mod login;
pub mod register;

pub use login::login_post;
pub use register::register_post;

/// Body of a successful login or registration
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Treat `""` the same as a missing field
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
