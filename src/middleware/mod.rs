pub mod auth;
pub mod response;

pub use auth::{authenticate, authorize, require_admin, require_auth, require_manager, AuthUser};
pub use response::{ApiResponse, ApiResult};
