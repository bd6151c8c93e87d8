use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use FilterOperator::*;

/// Comparison carried by a filter component, addressed on the wire by its
/// short code.
///
/// The set is open: codes outside the registry parse as [`Other`] and
/// round-trip unchanged.
///
/// [`Other`]: FilterOperator::Other
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterOperator {
    Equals,
    NotEquals,
    LessThan,
    GreaterThan,
    LessThanOrEquals,
    GreaterThanOrEquals,
    In,
    NotIn,
    Like,
    NotLike,
    Between,
    NotBetween,
    Other(String),
}

/// Shape of the value an operator takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Scalar,
    Range,
    List,
}

impl FilterOperator {
    /// Every registered operator, in registry order.
    pub const ALL: [FilterOperator; 12] = [
        Equals,
        NotEquals,
        LessThan,
        GreaterThan,
        LessThanOrEquals,
        GreaterThanOrEquals,
        Between,
        NotBetween,
        In,
        NotIn,
        Like,
        NotLike,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Equals => "eq",
            NotEquals => "neq",
            LessThan => "lt",
            GreaterThan => "gt",
            LessThanOrEquals => "leq",
            GreaterThanOrEquals => "geq",
            In => "in",
            NotIn => "nin",
            Like => "like",
            NotLike => "nlike",
            Between => "bet",
            NotBetween => "nbet",
            Other(code) => code,
        }
    }

    /// Unregistered codes take a single scalar value.
    pub fn arity(&self) -> Arity {
        match self {
            In | NotIn => Arity::List,
            Between | NotBetween => Arity::Range,
            _ => Arity::Scalar,
        }
    }

    /// Display label and, for range operators, the infix shown between the
    /// two bounds. `None` for unregistered codes.
    pub fn info(&self) -> Option<&'static OperatorInfo> {
        OPERATOR_REGISTRY.iter().find(|info| info.operator == *self)
    }

    pub fn is_registered(&self) -> bool {
        !matches!(self, Other(_))
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for FilterOperator {
    fn from(code: &str) -> Self {
        FilterOperator::ALL
            .into_iter()
            .find(|op| op.as_str() == code)
            .unwrap_or_else(|| Other(code.to_string()))
    }
}

impl From<String> for FilterOperator {
    fn from(code: String) -> Self {
        match FilterOperator::from(code.as_str()) {
            Other(_) => Other(code),
            known => known,
        }
    }
}

impl From<FilterOperator> for String {
    fn from(operator: FilterOperator) -> Self {
        match operator {
            Other(code) => code,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for FilterOperator {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FilterOperator::from(s))
    }
}

// ── Registry ──────────────────────────────────────────────────

/// Static presentation metadata for one operator.
#[derive(Debug, PartialEq, Eq)]
pub struct OperatorInfo {
    pub operator: FilterOperator,
    pub label: &'static str,
    pub infix: Option<&'static str>,
}

static OPERATOR_REGISTRY: [OperatorInfo; 12] = [
    OperatorInfo {
        operator: Equals,
        label: "=",
        infix: None,
    },
    OperatorInfo {
        operator: NotEquals,
        label: "!=",
        infix: None,
    },
    OperatorInfo {
        operator: LessThan,
        label: "<",
        infix: None,
    },
    OperatorInfo {
        operator: GreaterThan,
        label: ">",
        infix: None,
    },
    OperatorInfo {
        operator: LessThanOrEquals,
        label: "<=",
        infix: None,
    },
    OperatorInfo {
        operator: GreaterThanOrEquals,
        label: ">=",
        infix: None,
    },
    OperatorInfo {
        operator: Between,
        label: "between",
        infix: Some("and"),
    },
    OperatorInfo {
        operator: NotBetween,
        label: "not between",
        infix: Some("and"),
    },
    OperatorInfo {
        operator: In,
        label: "in",
        infix: None,
    },
    OperatorInfo {
        operator: NotIn,
        label: "not in",
        infix: None,
    },
    OperatorInfo {
        operator: Like,
        label: "like",
        infix: None,
    },
    OperatorInfo {
        operator: NotLike,
        label: "not like",
        infix: None,
    },
];

const COMPARISON: &[FilterOperator] = &[
    Equals,
    NotEquals,
    LessThan,
    GreaterThan,
    LessThanOrEquals,
    GreaterThanOrEquals,
];

const TEXT_OPERATORS: &[FilterOperator] = &[
    Equals,
    NotEquals,
    LessThan,
    GreaterThan,
    LessThanOrEquals,
    GreaterThanOrEquals,
    Between,
    NotBetween,
    In,
    NotIn,
    Like,
    NotLike,
];

const INTEGER_OPERATORS: &[FilterOperator] = &[
    Equals,
    NotEquals,
    LessThan,
    GreaterThan,
    LessThanOrEquals,
    GreaterThanOrEquals,
    Between,
    NotBetween,
    In,
    NotIn,
];

const ORDERED_OPERATORS: &[FilterOperator] = &[
    Equals,
    NotEquals,
    LessThan,
    GreaterThan,
    LessThanOrEquals,
    GreaterThanOrEquals,
    Between,
    NotBetween,
];

const SELECT_OPERATORS: &[FilterOperator] = &[Equals, NotEquals, In, NotIn];

const DEFAULT_OPERATORS: &[FilterOperator] = &[Equals, NotEquals];

const TEXT_REDUCED: &[FilterOperator] = &[Like, NotLike, In, NotIn];
const NUMBER_REDUCED: &[FilterOperator] =
    &[Equals, NotEquals, LessThanOrEquals, GreaterThanOrEquals];
const DATETIME_REDUCED: &[FilterOperator] = &[Equals, LessThanOrEquals, GreaterThanOrEquals];

/// Operators a client may offer for a field of the given base type.
///
/// Unknown base types fall back to equality and inequality.
pub fn operators_for_base_type(base_type: &str) -> &'static [FilterOperator] {
    match base_type {
        "text" => TEXT_OPERATORS,
        "integer" => INTEGER_OPERATORS,
        "number" | "date" | "datetime" => ORDERED_OPERATORS,
        "select" => SELECT_OPERATORS,
        _ => DEFAULT_OPERATORS,
    }
}

/// Smaller operator sets for compact filter forms. Base types without a
/// reduced preset get their full set.
pub fn reduced_operators_for_base_type(base_type: &str) -> &'static [FilterOperator] {
    match base_type {
        "text" => TEXT_REDUCED,
        "integer" => COMPARISON,
        "number" => NUMBER_REDUCED,
        "datetime" => DATETIME_REDUCED,
        other => operators_for_base_type(other),
    }
}

/// Owned, serialisable form of an operator's registry entry, as offered to
/// clients inside filter configurations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOperatorConfiguration {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub operator: FilterOperator,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub infix: String,
}

impl From<FilterOperator> for FilterOperatorConfiguration {
    fn from(operator: FilterOperator) -> Self {
        let (label, infix) = match operator.info() {
            Some(info) => (info.label, info.infix.unwrap_or_default()),
            None => (operator.as_str(), ""),
        };
        Self {
            label: label.to_string(),
            description: String::new(),
            infix: infix.to_string(),
            operator,
        }
    }
}

pub fn configurations_for_base_type(base_type: &str) -> Vec<FilterOperatorConfiguration> {
    operators_for_base_type(base_type)
        .iter()
        .cloned()
        .map(FilterOperatorConfiguration::from)
        .collect()
}

pub fn reduced_configurations_for_base_type(base_type: &str) -> Vec<FilterOperatorConfiguration> {
    reduced_operators_for_base_type(base_type)
        .iter()
        .cloned()
        .map(FilterOperatorConfiguration::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_codes_round_trip() {
        for op in FilterOperator::ALL {
            assert_eq!(op.as_str().parse::<FilterOperator>().unwrap(), op);
        }
    }

    #[test]
    fn unregistered_code_is_kept() {
        let op: FilterOperator = "approx".parse().unwrap();
        assert_eq!(op, Other("approx".into()));
        assert_eq!(op.arity(), Arity::Scalar);
        assert_eq!(op.to_string(), "approx");
        assert!(op.info().is_none());
        assert!(!op.is_registered());
    }

    #[test]
    fn owned_code_resolves_registered_operator() {
        assert_eq!(FilterOperator::from("bet".to_string()), Between);
        assert_eq!(String::from(Other("near".into())), "near");
    }

    #[test]
    fn serde_uses_short_code() {
        assert_eq!(serde_json::to_string(&NotIn).unwrap(), r#""nin""#);
        let op: FilterOperator = serde_json::from_str(r#""startswith""#).unwrap();
        assert_eq!(op, Other("startswith".into()));
        assert_eq!(serde_json::to_string(&op).unwrap(), r#""startswith""#);
    }

    #[test]
    fn configuration_for_unregistered_code() {
        let c = FilterOperatorConfiguration::from(Other("near".into()));
        assert_eq!(c.label, "near");
        assert_eq!(c.infix, "");
    }

    #[test]
    fn registry_is_aligned_with_all() {
        for op in FilterOperator::ALL {
            assert_eq!(op.info().unwrap().operator, op);
        }
    }

    #[test]
    fn range_operators_carry_infix() {
        assert_eq!(Between.info().unwrap().label, "between");
        assert_eq!(Between.info().unwrap().infix, Some("and"));
        assert_eq!(NotBetween.info().unwrap().label, "not between");
        assert_eq!(Equals.info().unwrap().infix, None);
    }

    #[test]
    fn base_type_sets() {
        assert_eq!(operators_for_base_type("text").len(), 12);
        assert_eq!(operators_for_base_type("integer").len(), 10);
        assert!(!operators_for_base_type("integer").contains(&Like));
        for t in ["number", "date", "datetime"] {
            let ops = operators_for_base_type(t);
            assert!(ops.contains(&Between));
            assert!(!ops.contains(&In));
            assert!(!ops.contains(&Like));
        }
        assert_eq!(operators_for_base_type("select"), &[Equals, NotEquals, In, NotIn]);
        assert_eq!(operators_for_base_type("color"), &[Equals, NotEquals]);
    }

    #[test]
    fn reduced_sets() {
        assert_eq!(reduced_operators_for_base_type("text"), &[Like, NotLike, In, NotIn]);
        assert_eq!(reduced_operators_for_base_type("integer").len(), 6);
        assert_eq!(
            reduced_operators_for_base_type("datetime"),
            &[Equals, LessThanOrEquals, GreaterThanOrEquals]
        );
        assert_eq!(
            reduced_operators_for_base_type("select"),
            operators_for_base_type("select")
        );
    }

    #[test]
    fn configuration_from_operator() {
        let c = FilterOperatorConfiguration::from(FilterOperator::NotBetween);
        assert_eq!(c.label, "not between");
        assert_eq!(c.infix, "and");
        assert_eq!(c.operator, FilterOperator::NotBetween);
    }
}
