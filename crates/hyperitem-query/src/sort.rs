use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::QueryParseError;
use crate::params::QueryParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "ASC")]
    Ascending,
    #[serde(rename = "DESC")]
    Descending,
}

impl SortOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortComponent {
    pub order: SortOrder,
    pub name: String,
}

impl SortComponent {
    pub fn new(name: impl Into<String>, order: SortOrder) -> Self {
        Self {
            order,
            name: name.into(),
        }
    }

    pub fn asc(name: impl Into<String>) -> Self {
        Self::new(name, SortOrder::Ascending)
    }

    pub fn desc(name: impl Into<String>) -> Self {
        Self::new(name, SortOrder::Descending)
    }

    /// Parse a `name,ASC|DESC` token. The order must match exactly.
    pub fn parse(raw: &str) -> Result<Self, QueryParseError> {
        let parts: Vec<&str> = raw.split(',').collect();
        let [name, order] = parts.as_slice() else {
            return Err(QueryParseError::InvalidSortComponent(raw.to_string()));
        };
        let order = match *order {
            "ASC" => SortOrder::Ascending,
            "DESC" => SortOrder::Descending,
            _ => return Err(QueryParseError::InvalidSortOrder(raw.to_string())),
        };
        Ok(Self::new(*name, order))
    }
}

impl fmt::Display for SortComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.name, self.order)
    }
}

/// Ordered sort directives; earlier components take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sort(Vec<SortComponent>);

impl Sort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_query(query: &str) -> Result<Self, QueryParseError> {
        Self::from_params(&QueryParams::parse(query))
    }

    pub(crate) fn from_params(params: &QueryParams) -> Result<Self, QueryParseError> {
        params
            .all("sort")
            .map(SortComponent::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(Sort)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SortComponent> {
        self.0.iter()
    }

    pub fn push(&mut self, component: SortComponent) {
        self.0.push(component);
    }

    pub fn find_one(&self, name: &str) -> Option<&SortComponent> {
        self.0.iter().find(|sc| sc.name == name)
    }

    pub fn tokens(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl FromIterator<SortComponent> for Sort {
    fn from_iter<I: IntoIterator<Item = SortComponent>>(iter: I) -> Self {
        Sort(iter.into_iter().collect())
    }
}

impl IntoIterator for Sort {
    type Item = SortComponent;
    type IntoIter = std::vec::IntoIter<SortComponent>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Sort {
    type Item = &'a SortComponent;
    type IntoIter = std::slice::Iter<'a, SortComponent>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrderConfiguration {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub order: SortOrder,
}

/// The two orders with their display labels.
pub fn sort_order_configurations() -> Vec<SortOrderConfiguration> {
    vec![
        SortOrderConfiguration {
            label: "ascending".into(),
            description: String::new(),
            order: SortOrder::Ascending,
        },
        SortOrderConfiguration {
            label: "descending".into(),
            description: String::new(),
            order: SortOrder::Descending,
        },
    ]
}
