use super::types::{MatchOp, Predicate, SearchQuery};

/// Escape character used in every LIKE clause built here
const LIKE_ESCAPE: char = '\\';

impl SearchQuery {
    /// Build the single-column WHERE condition and its bound value.
    pub fn predicate(&self) -> Predicate {
        let quoted_column = format!("\"{}\"", self.column);
        match self.op {
            MatchOp::Exact => Predicate {
                condition: format!("{} = ?", quoted_column),
                param: self.value.clone(),
            },
            MatchOp::Contains => like(&quoted_column, format!("%{}%", escape_like(&self.value))),
            MatchOp::Starts => like(&quoted_column, format!("{}%", escape_like(&self.value))),
            MatchOp::Ends => like(&quoted_column, format!("%{}", escape_like(&self.value))),
        }
    }
}

fn like(quoted_column: &str, pattern: String) -> Predicate {
    Predicate {
        condition: format!("{} LIKE ? ESCAPE '{}'", quoted_column, LIKE_ESCAPE),
        param: pattern,
    }
}

/// Make `%`, `_` and the escape character itself match literally.
pub fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}
