//! The hypermedia document model: items with their links, actions,
//! parameters and properties, plus the builders that advertise the query
//! dimensions of a collection.

mod action;
mod configuration;
pub mod constants;
mod error;
mod item;
mod link;
mod list;
mod parameter;
mod property;
mod search;

pub use action::{Action, Actions};
pub use configuration::{
    FilterComponentConfiguration, FilterConfiguration, SortComponentConfiguration,
    SortConfiguration, filter_link, search_link, sort_link,
};
pub use error::{Error, Errors};
pub use item::{Item, Items};
pub use link::{Link, Links};
pub use parameter::{Parameter, Parameters, SelectOption, SelectOptions, action_parameter};
pub use property::{Properties, Property};
pub use search::search;
