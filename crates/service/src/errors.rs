use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PagerError {
    #[error("invalid page size: {0} (must be > 0)")]
    InvalidLimit(u64),
    #[error("query error: {0}")]
    Query(String),
}

impl From<sea_orm::DbErr> for PagerError {
    fn from(e: sea_orm::DbErr) -> Self { Self::Query(e.to_string()) }
}
