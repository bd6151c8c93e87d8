use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::action::{Action, Actions};
use crate::error::Errors;
use crate::link::{Link, Links};
use crate::list::list_type;
use crate::property::{Properties, Property};

/// A hypermedia document node: properties, opaque data, links, actions,
/// nested items and errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub label: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub render: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rel: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub type_: String,
    #[serde(skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Links::is_empty")]
    pub links: Links,
    #[serde(skip_serializing_if = "Actions::is_empty")]
    pub actions: Actions,
    #[serde(skip_serializing_if = "Items::is_empty")]
    pub items: Items,
    #[serde(skip_serializing_if = "Errors::is_empty")]
    pub errors: Errors,
}

impl Item {
    pub fn add_property(&mut self, p: Property) {
        self.properties.push(p);
    }

    pub fn add_properties(&mut self, ps: impl IntoIterator<Item = Property>) {
        self.properties.extend(ps);
    }

    pub fn add_item(&mut self, sub: Item) {
        self.items.push(sub);
    }

    pub fn add_items(&mut self, subs: impl IntoIterator<Item = Item>) {
        self.items.extend(subs);
    }

    pub fn add_link(&mut self, l: Link) {
        self.links.push(l);
    }

    pub fn add_links(&mut self, ls: impl IntoIterator<Item = Link>) {
        self.links.extend(ls);
    }

    pub fn add_action(&mut self, a: Action) {
        self.actions.push(a);
    }

    pub fn add_actions(&mut self, actions: impl IntoIterator<Item = Action>) {
        self.actions.extend(actions);
    }

    pub fn encode_data<T: Serialize>(&mut self, v: &T) -> Result<(), serde_json::Error> {
        self.data = Some(serde_json::to_value(v)?);
        Ok(())
    }

    /// Decode `data` into `T`; an absent payload decodes as JSON `null`.
    pub fn decode_data<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        let data = self.data.clone().unwrap_or_default();
        serde_json::from_value(data)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Items(Vec<Item>);

list_type!(Items, Item);

impl Items {
    pub fn find_by_id(&self, id: &str) -> Option<&Item> {
        self.find(|i| i.id == id)
    }

    pub fn find_by_rel(&self, rel: &str) -> Option<&Item> {
        self.find(|i| i.rel == rel)
    }

    /// Index the items by a derived key; later items win on collisions.
    pub fn key_by(&self, extract_key: impl Fn(&Item) -> String) -> HashMap<String, Item> {
        self.0.iter().map(|i| (extract_key(i), i.clone())).collect()
    }

    pub fn key_by_id(&self) -> HashMap<String, Item> {
        self.key_by(|i| i.id.clone())
    }

    pub fn key_by_rel(&self) -> HashMap<String, Item> {
        self.key_by(|i| i.rel.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, rel: &str) -> Item {
        Item {
            id: id.into(),
            rel: rel.into(),
            ..Item::default()
        }
    }

    #[test]
    fn empty_item_serializes_to_empty_object() {
        assert_eq!(serde_json::to_string(&Item::default()).unwrap(), "{}");
    }

    #[test]
    fn type_field_is_renamed() {
        let i = Item {
            type_: "order".into(),
            ..Item::default()
        };
        assert_eq!(serde_json::to_string(&i).unwrap(), r#"{"type":"order"}"#);
    }

    #[test]
    fn data_round_trip() {
        let mut i = Item::default();
        i.encode_data(&vec![1, 2, 3]).unwrap();
        let back: Vec<i32> = i.decode_data().unwrap();
        assert_eq!(back, vec![1, 2, 3]);
    }

    #[test]
    fn items_lookup_and_keying() {
        let items: Items = vec![item("1", "a"), item("2", "b"), item("3", "a")].into();
        assert_eq!(items.find_by_id("2").unwrap().rel, "b");
        assert_eq!(items.find_by_rel("a").unwrap().id, "1");
        assert!(items.find_by_id("9").is_none());
        assert_eq!(items.filter(|i| i.rel == "a").len(), 2);

        let by_id = items.key_by_id();
        assert_eq!(by_id.len(), 3);
        let by_rel = items.key_by_rel();
        assert_eq!(by_rel["a"].id, "3");
    }
}
