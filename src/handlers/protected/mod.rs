// handlers/protected/mod.rs - handlers behind the bearer-token gate
//
// Role tiers (manager, admin) are applied per route in app.rs.

pub mod assignments;
pub mod auth;
pub mod devices;
pub mod find;
pub mod records;
pub mod users;
