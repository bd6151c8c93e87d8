use hyperitem_query::{Filter, FilterOperatorConfiguration, Sort, SortOrderConfiguration};
use serde::{Deserialize, Serialize};

use crate::constants::{REL_FILTER, REL_SEARCH, REL_SORT, TYPE_FILTER, TYPE_SEARCH, TYPE_SORT};
use crate::link::Link;
use crate::parameter::{Parameter, SelectOptions};

/// A field a client may filter on, with the operators it supports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterComponentConfiguration {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub label: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub operators: Vec<FilterOperatorConfiguration>,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub type_: String,
    #[serde(skip_serializing_if = "SelectOptions::is_empty")]
    pub options: SelectOptions,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub related: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub placeholder: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub multiple: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterConfiguration(pub Vec<FilterComponentConfiguration>);

impl FilterConfiguration {
    pub fn sort_by_label(&mut self) {
        self.0.sort_by(|a, b| a.label.cmp(&b.label));
    }
}

/// A field a client may sort on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortComponentConfiguration {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub label: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub orders: Vec<SortOrderConfiguration>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortConfiguration(pub Vec<SortComponentConfiguration>);

/// Templated `filter` link: its single parameter describes the filterable
/// fields and carries the filter currently applied.
pub fn filter_link(
    configuration: &FilterConfiguration,
    template: impl Into<String>,
    current: &Filter,
    placeholder: impl Into<String>,
) -> Link {
    let parameter = Parameter {
        components: serde_json::to_value(configuration).ok(),
        value: serde_json::to_value(current).ok(),
        placeholder: placeholder.into(),
        ..Parameter::new("filter", TYPE_FILTER)
    };
    templated(REL_FILTER, template.into(), parameter)
}

/// Templated `sort` link, the sort counterpart of [`filter_link`].
pub fn sort_link(
    configuration: &SortConfiguration,
    template: impl Into<String>,
    current: &Sort,
    placeholder: impl Into<String>,
) -> Link {
    let parameter = Parameter {
        components: serde_json::to_value(configuration).ok(),
        value: serde_json::to_value(current).ok(),
        placeholder: placeholder.into(),
        ..Parameter::new("sort", TYPE_SORT)
    };
    templated(REL_SORT, template.into(), parameter)
}

pub fn search_link(template: impl Into<String>, current: &str) -> Link {
    let parameter = Parameter {
        value: (!current.is_empty()).then(|| serde_json::Value::String(current.to_string())),
        ..Parameter::new("search", TYPE_SEARCH)
    };
    templated(REL_SEARCH, template.into(), parameter)
}

fn templated(rel: &str, template: String, parameter: Parameter) -> Link {
    let mut link = Link {
        rel: rel.to_string(),
        template,
        ..Link::default()
    };
    link.parameters.push(parameter);
    link
}
