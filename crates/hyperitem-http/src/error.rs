use http::StatusCode;
use hyperitem_query::QueryParseError;

#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("invalid query: {0}")]
    Query(#[from] QueryParseError),

    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),

    #[error("record not found: {0}")]
    NotFound(String),

    #[error("record already exists: {0}")]
    Conflict(String),

    #[error("unknown action: {0:?}")]
    UnknownAction(String),

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl HttpError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            HttpError::Query(_) | HttpError::Url(_) => StatusCode::BAD_REQUEST,
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::Conflict(_) => StatusCode::CONFLICT,
            HttpError::UnknownAction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            HttpError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            HttpError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
