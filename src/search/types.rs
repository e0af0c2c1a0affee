use serde::Deserialize;

use crate::database::schema::Entity;

/// Raw `/search` query string. Every field is optional here so a missing
/// parameter is reported as a validation error rather than an extractor
/// rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub table: Option<String>,
    pub column: Option<String>,
    #[serde(rename = "type")]
    pub search_type: Option<String>,
    pub query: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOp {
    /// Equality
    Exact,
    /// Substring
    Contains,
    /// Prefix
    Starts,
    /// Suffix
    Ends,
}

impl MatchOp {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "exact" => Some(MatchOp::Exact),
            "contains" => Some(MatchOp::Contains),
            "starts" => Some(MatchOp::Starts),
            "ends" => Some(MatchOp::Ends),
            _ => None,
        }
    }
}

/// A validated single-column search. `column` always points into the
/// entity's static attribute list, never at caller-owned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub entity: Entity,
    pub column: &'static str,
    pub op: MatchOp,
    pub value: String,
}

/// SQL condition plus the single value bound to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub condition: String,
    pub param: String,
}
