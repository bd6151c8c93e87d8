use serde::{Deserialize, Serialize};

/// An error reported inside an item, e.g. a failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Error {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub label: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub message: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub code: String,
}

pub type Errors = Vec<Error>;
