// handlers/mod.rs - two security tiers
//
// Public (no token) → Protected (bearer token, optionally a role tier)

pub mod extract;
pub mod protected;
pub mod public;
