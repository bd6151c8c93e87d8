use std::num::ParseIntError;

/// Strict parse error for query-string components.
///
/// Any one malformed component invalidates the whole query; callers are
/// expected to reject the request rather than work with a partial result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryParseError {
    #[error("invalid filter component: {0}")]
    InvalidFilterComponent(String),

    #[error("invalid size of filter-between values (must >= 2): {raw}")]
    InvalidRangeArity { raw: String, found: usize },

    #[error("invalid sort component: {0}")]
    InvalidSortComponent(String),

    #[error("invalid sort order: {0}")]
    InvalidSortOrder(String),

    #[error("invalid {field}: {value:?}")]
    InvalidNumber {
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
}
