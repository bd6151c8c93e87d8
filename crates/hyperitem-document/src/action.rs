use serde::{Deserialize, Serialize};

use crate::list::list_type;
use crate::parameter::Parameters;

/// A server-declared operation a client may invoke.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Action {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub label: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub render: String,
    pub rel: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub href: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub encoding: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub method: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub template: String,
    #[serde(skip_serializing_if = "Parameters::is_empty")]
    pub parameters: Parameters,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub context: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ok: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cancel: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub confirmation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Actions(Vec<Action>);

list_type!(Actions, Action);

impl Actions {
    pub fn find_by_rel(&self, rel: &str) -> Option<&Action> {
        self.find(|a| a.rel == rel)
    }

    pub fn filter_by_rel(&self, rel: &str) -> Actions {
        self.filter(|a| a.rel == rel)
    }

    pub fn sort_by_label(&mut self) {
        self.0.sort_by(|a, b| a.label.cmp(&b.label));
    }
}
