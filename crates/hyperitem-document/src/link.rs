use serde::{Deserialize, Serialize};

use crate::list::list_type;
use crate::parameter::Parameters;

/// A navigational affordance, either a concrete `href` or a URI `template`
/// with its parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub label: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub render: Vec<String>,
    pub rel: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub href: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub type_: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub language: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub template: String,
    #[serde(skip_serializing_if = "Parameters::is_empty")]
    pub parameters: Parameters,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub context: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub download: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub accept: String,
    #[serde(rename = "accept-language", skip_serializing_if = "String::is_empty")]
    pub accept_language: String,
}

impl Link {
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Links(Vec<Link>);

list_type!(Links, Link);

impl Links {
    pub fn find_by_rel(&self, rel: &str) -> Option<&Link> {
        self.find(|l| l.rel == rel)
    }

    pub fn filter_by_rel(&self, rel: &str) -> Links {
        self.filter(|l| l.rel == rel)
    }
}
