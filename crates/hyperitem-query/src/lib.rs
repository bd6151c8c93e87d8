mod encode;
mod error;
pub mod filter;
mod meta;
pub mod operator;
mod params;
mod sort;

pub use error::QueryParseError;
pub use filter::{Filter, FilterComponent, FilterValue, named, not};
pub use meta::Meta;
pub use operator::{
    Arity, FilterOperator, FilterOperatorConfiguration, OperatorInfo,
    configurations_for_base_type, operators_for_base_type, reduced_configurations_for_base_type,
    reduced_operators_for_base_type,
};
pub use sort::{Sort, SortComponent, SortOrder, SortOrderConfiguration, sort_order_configurations};
