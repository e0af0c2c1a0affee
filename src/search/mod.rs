pub mod error;
pub mod predicate;
pub mod types;
pub mod validator;

pub use error::SearchError;
pub use types::{MatchOp, Predicate, SearchParams, SearchQuery};
