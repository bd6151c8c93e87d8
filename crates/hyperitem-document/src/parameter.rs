use serde::{Deserialize, Serialize};

use crate::constants::{NAME_ACTION, TYPE_HIDDEN};
use crate::list::list_type;

/// One input of a link template or an action form. Loosely typed fields
/// (`value`, `min`, `step`, ...) carry whatever JSON the server puts there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Parameter {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub label: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub accept: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "SelectOptions::is_empty")]
    pub options: SelectOptions,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub related: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub placeholder: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cols: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub read_only: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub multiple: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_: type_.into(),
            ..Self::default()
        }
    }
}

/// The hidden parameter naming the action a submitted form invokes.
pub fn action_parameter(value: impl Into<String>) -> Parameter {
    Parameter {
        value: Some(serde_json::Value::String(value.into())),
        ..Parameter::new(NAME_ACTION, TYPE_HIDDEN)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(Vec<Parameter>);

list_type!(Parameters, Parameter);

impl Parameters {
    pub fn find_by_name(&self, name: &str) -> Option<&Parameter> {
        self.find(|p| p.name == name)
    }
}

/// A choice of a `select` parameter; options may nest to form groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectOption {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub label: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "SelectOptions::is_empty")]
    pub options: SelectOptions,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            label: label.into(),
            value: Some(value.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectOptions(Vec<SelectOption>);

list_type!(SelectOptions, SelectOption);

impl SelectOptions {
    pub fn sort_by_label(&mut self) {
        self.0.sort_by(|a, b| a.label.cmp(&b.label));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn action_parameter_is_hidden() {
        let p = action_parameter("create");
        assert_eq!(
            serde_json::to_value(&p).unwrap(),
            json!({ "name": "@action", "type": "hidden", "value": "create" })
        );
    }

    #[test]
    fn kebab_case_names_and_flags() {
        let p = Parameter {
            min_length: Some(json!(2)),
            read_only: true,
            ..Parameter::new("code", "text")
        };
        assert_eq!(
            serde_json::to_value(&p).unwrap(),
            json!({ "name": "code", "type": "text", "min-length": 2, "read-only": true })
        );
    }

    #[test]
    fn find_by_name() {
        let ps: Parameters = vec![Parameter::new("a", "text"), Parameter::new("b", "number")].into();
        assert_eq!(ps.find_by_name("b").unwrap().type_, "number");
        assert!(ps.find_by_name("c").is_none());
    }

    #[test]
    fn select_options_sort_by_label() {
        let mut opts: SelectOptions =
            vec![SelectOption::new("b", 2), SelectOption::new("a", 1)].into();
        opts.sort_by_label();
        let labels: Vec<_> = opts.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["a", "b"]);
    }
}
