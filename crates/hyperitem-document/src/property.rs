use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::list::list_type;

/// A named piece of domain state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Property {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub label: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub render: String,
    pub name: String,
    pub value: serde_json::Value,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub type_: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub unit: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(Vec<Property>);

list_type!(Properties, Property);

impl Properties {
    pub fn find_by_name(&self, name: &str) -> Option<&Property> {
        self.find(|p| p.name == name)
    }

    pub fn key_by(&self, extract_key: impl Fn(&Property) -> String) -> HashMap<String, Property> {
        self.0.iter().map(|p| (extract_key(p), p.clone())).collect()
    }
}
