pub mod profile;
pub mod session;

pub use profile::profile_get;
pub use session::logout_post;
