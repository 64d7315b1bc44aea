use thiserror::Error;

/// Errors raised while validating catalog requests.
///
/// All of these are caused by the client and map to `400 Bad Request`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing parameter")]
    MissingAction,
    #[error("invalid input")]
    UnknownAction(String),
    /// The body or query string could not be decoded.
    #[error("invalid input")]
    Malformed(String),
    #[error("invalid {entity} id: {raw}")]
    InvalidId { entity: &'static str, raw: String },
    #[error("invalid request - id must be empty when adding")]
    IdNotAllowed,
    #[error("invalid request - id is required")]
    IdRequired,
    #[error("name cannot be empty")]
    EmptyName,
    #[error("price must be a non-negative number")]
    InvalidPrice,
    #[error("unsupported sort column: {0}")]
    UnknownSortColumn(String),
    #[error("page must be greater than zero")]
    InvalidPage,
    #[error("page_size must be between 1 and {max}")]
    InvalidPageSize { max: u32 },
}
