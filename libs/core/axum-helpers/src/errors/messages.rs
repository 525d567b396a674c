//! Client-facing error messages shared across handlers.

pub const INVALID_ID: &str = "Invalid ID";
pub const NOT_FOUND_ROUTE: &str = "Not found";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
