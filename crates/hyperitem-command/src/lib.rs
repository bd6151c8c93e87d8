mod arguments;
mod command;
mod content_type;
mod value;

pub use arguments::Arguments;
pub use command::{Command, DEFAULT_MAX_MEMORY, NAME_ACTION, extract_command};
pub use content_type::{
    CONTENT_TYPE_HYPER_ITEM, CONTENT_TYPE_HYPER_ITEM_UTF8, CONTENT_TYPE_JSON,
    CONTENT_TYPE_MULTIPART_FORM_DATA, CONTENT_TYPE_URL_ENCODED, ContentType,
};
pub use value::{Upload, Value};
