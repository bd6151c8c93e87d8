mod collection;
mod config;
mod error;
mod resolver;
mod response;
mod store;

pub use collection::{ACTION_CREATE, ACTION_DELETE, CollectionHttp, REL_COLLECTION};
pub use config::{ConfigError, ServerConfig};
pub use error::HttpError;
pub use resolver::{
    HEADER_FORWARDED, HEADER_X_CORRELATION_ID, HEADER_X_FORWARDED_FOR, HEADER_X_FORWARDED_HOST,
    HEADER_X_FORWARDED_PATH, HEADER_X_FORWARDED_PROTO, HEADER_X_FORWARDED_SCHEME,
    HEADER_X_REAL_IP, UrlResolver, external_url, extract_remote,
};
pub use response::{error_response, item_response};
pub use store::{FIELD_ID, MemoryCollection, Page, Record};
