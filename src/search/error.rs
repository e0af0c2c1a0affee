use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SearchError {
    #[error("Missing required search parameters")]
    MissingParameters,

    #[error("Invalid table name")]
    InvalidTableName(String),

    #[error("Invalid column name")]
    InvalidColumn(String),

    #[error("Invalid search type")]
    InvalidSearchType(String),
}
