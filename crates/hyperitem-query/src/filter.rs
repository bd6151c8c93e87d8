use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::QueryParseError;
use crate::operator::{Arity, FilterOperator};
use crate::params::QueryParams;

/// Value of a filter component. The shape always matches the operator's
/// [`Arity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Scalar(String),
    Range(String, String),
    List(Vec<String>),
}

impl FilterValue {
    fn tokens(&self) -> Vec<&str> {
        match self {
            FilterValue::Scalar(v) => vec![v.as_str()],
            FilterValue::Range(lo, hi) => vec![lo.as_str(), hi.as_str()],
            FilterValue::List(vs) => vs.iter().map(String::as_str).collect(),
        }
    }
}

/// One `name,operator,value...` predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFilterComponent")]
pub struct FilterComponent {
    operator: FilterOperator,
    name: String,
    value: FilterValue,
}

#[derive(Deserialize)]
struct RawFilterComponent {
    operator: FilterOperator,
    name: String,
    value: FilterValue,
}

impl TryFrom<RawFilterComponent> for FilterComponent {
    type Error = QueryParseError;

    fn try_from(raw: RawFilterComponent) -> Result<Self, Self::Error> {
        let values = raw.value.tokens().into_iter().map(str::to_string).collect();
        FilterComponent::from_values(raw.name, raw.operator, values)
    }
}

impl FilterComponent {
    /// Parse one raw filter token such as `age,bet,18,65`.
    ///
    /// Scalar operators keep only the first value token; extra tokens are
    /// dropped. Range operators keep the first two.
    pub fn parse(raw: &str) -> Result<Self, QueryParseError> {
        let parts: Vec<&str> = raw.split(',').collect();
        if parts.len() < 3 {
            return Err(QueryParseError::InvalidFilterComponent(raw.to_string()));
        }
        let operator = FilterOperator::from(parts[1]);
        let values = parts[2..].iter().map(|v| v.to_string()).collect();
        FilterComponent::from_values(parts[0], operator, values).map_err(|e| match e {
            QueryParseError::InvalidRangeArity { found, .. } => QueryParseError::InvalidRangeArity {
                raw: raw.to_string(),
                found,
            },
            other => other,
        })
    }

    /// Build a component from loose value tokens, shaping them to the
    /// operator's arity.
    pub fn from_values(
        name: impl Into<String>,
        operator: FilterOperator,
        mut values: Vec<String>,
    ) -> Result<Self, QueryParseError> {
        let name = name.into();
        let value = match operator.arity() {
            Arity::List => FilterValue::List(values),
            Arity::Range => {
                if values.len() < 2 {
                    return Err(QueryParseError::InvalidRangeArity {
                        raw: format!("{name},{operator},{}", values.join(",")),
                        found: values.len(),
                    });
                }
                values.truncate(2);
                let hi = values.pop().unwrap_or_default();
                let lo = values.pop().unwrap_or_default();
                FilterValue::Range(lo, hi)
            }
            Arity::Scalar => match values.into_iter().next() {
                Some(v) => FilterValue::Scalar(v),
                None => {
                    return Err(QueryParseError::InvalidFilterComponent(format!(
                        "{name},{operator}"
                    )));
                }
            },
        };
        Ok(Self {
            operator,
            name,
            value,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn operator(&self) -> &FilterOperator {
        &self.operator
    }

    pub fn value(&self) -> &FilterValue {
        &self.value
    }

    /// All value tokens, whatever the shape.
    pub fn value_strings(&self) -> Vec<&str> {
        self.value.tokens()
    }

    /// The scalar value, or `""` for range and list values.
    pub fn value_string(&self) -> &str {
        match &self.value {
            FilterValue::Scalar(v) => v,
            _ => "",
        }
    }

    pub fn value_bool(&self) -> bool {
        matches!(self.value_string(), "true" | "1")
    }
}

impl fmt::Display for FilterComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{}",
            self.name,
            self.operator,
            self.value.tokens().join(",")
        )
    }
}

/// Ordered list of filter components, carried as repeated `filter` query
/// parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filter(Vec<FilterComponent>);

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every `filter` value of a query string. Fails on the first
    /// malformed component; a missing key yields an empty filter.
    pub fn from_query(query: &str) -> Result<Self, QueryParseError> {
        Self::from_params(&QueryParams::parse(query))
    }

    pub(crate) fn from_params(params: &QueryParams) -> Result<Self, QueryParseError> {
        params
            .all("filter")
            .map(FilterComponent::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(Filter)
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

    pub fn iter(&self) -> std::slice::Iter<'_, FilterComponent> {
        self.0.iter()
    }

    pub fn push(&mut self, component: FilterComponent) {
        self.0.push(component);
    }

    pub fn has_component(&self, name: &str) -> bool {
        self.0.iter().any(|fc| fc.name == name)
    }

    pub fn find_one(&self, name: &str) -> Option<&FilterComponent> {
        self.0.iter().find(|fc| fc.name == name)
    }

    /// A copy without any component named `name`.
    pub fn remove_all(&self, name: &str) -> Filter {
        self.filter(not(named(name)))
    }

    pub fn filter(&self, accept: impl Fn(&FilterComponent) -> bool) -> Filter {
        self.0.iter().filter(|fc| accept(fc)).cloned().collect()
    }

    /// Canonical `name,operator,value...` tokens in list order.
    pub fn tokens(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

pub fn named(name: &str) -> impl Fn(&FilterComponent) -> bool + '_ {
    move |fc| fc.name == name
}

pub fn not<F>(accept: F) -> impl Fn(&FilterComponent) -> bool
where
    F: Fn(&FilterComponent) -> bool,
{
    move |fc| !accept(fc)
}

impl FromIterator<FilterComponent> for Filter {
    fn from_iter<I: IntoIterator<Item = FilterComponent>>(iter: I) -> Self {
        Filter(iter.into_iter().collect())
    }
}

impl IntoIterator for Filter {
    type Item = FilterComponent;
    type IntoIter = std::vec::IntoIter<FilterComponent>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Filter {
    type Item = &'a FilterComponent;
    type IntoIter = std::slice::Iter<'a, FilterComponent>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
