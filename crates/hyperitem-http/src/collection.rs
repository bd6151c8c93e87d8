use std::collections::BTreeSet;

use http::header::LOCATION;
use http::{HeaderValue, Method, Request, Response, StatusCode};
use hyperitem_command::{CONTENT_TYPE_URL_ENCODED, Command};
use hyperitem_document::constants::{
    METHOD_POST, REL_DETAILS, REL_NEXT, REL_PREVIOUS, REL_SELF, TYPE_HIDDEN, TYPE_TEXT,
};
use hyperitem_document::{
    Action, FilterComponentConfiguration, FilterConfiguration, Item, Link, Parameter, Property,
    SortComponentConfiguration, SortConfiguration, action_parameter, filter_link, search_link,
    sort_link,
};
use hyperitem_query::{Meta, configurations_for_base_type, sort_order_configurations};
use percent_encoding::percent_decode_str;
use serde_json::Map;
use tracing::debug;
use url::Url;

use crate::error::HttpError;
use crate::resolver::{UrlResolver, extract_remote};
use crate::response::{error_response, item_response};
use crate::store::{FIELD_ID, MemoryCollection, Page, Record};

pub const ACTION_CREATE: &str = "create";
pub const ACTION_DELETE: &str = "delete";
pub const REL_COLLECTION: &str = "collection";

/// Hyper-item endpoint over a [`MemoryCollection`]:
///
/// - `GET /` lists records, driven by the query string
/// - `GET /{id}` answers one record
/// - `POST /` runs the `create` or `delete` command in the body
pub struct CollectionHttp {
    name: String,
    page_size: u64,
    store: MemoryCollection,
}

impl CollectionHttp {
    pub fn new(name: impl Into<String>, page_size: u64, store: MemoryCollection) -> Self {
        Self {
            name: name.into(),
            page_size,
            store,
        }
    }

    pub fn store(&self) -> &MemoryCollection {
        &self.store
    }

    pub fn handle(&self, req: Request<Vec<u8>>) -> Response<Vec<u8>> {
        let path = req.uri().path().trim_matches('/').to_string();
        let result = match (req.method(), path.as_str()) {
            (&Method::GET, "") => self.list(&req),
            (&Method::POST, "") => self.execute(&req),
            (&Method::GET, id) if !id.contains('/') => self.record(&req, id),
            (_, id) if !id.contains('/') => Err(HttpError::MethodNotAllowed),
            (_, other) => Err(HttpError::NotFound(other.to_string())),
        };
        result.unwrap_or_else(|e| {
            debug!(collection = %self.name, error = %e, "request rejected");
            error_response(&e)
        })
    }

    fn list(&self, req: &Request<Vec<u8>>) -> Result<Response<Vec<u8>>, HttpError> {
        let resolver = UrlResolver::external(req)?;
        let mut meta = Meta::from_uri(req.uri())?;
        if meta.limit == 0 {
            meta = meta.with_min_limit(self.page_size);
        }
        let page = self.store.query(&meta);
        debug!(
            collection = %self.name,
            total = page.total,
            returned = page.records.len(),
            "listed records"
        );

        let collection = collection_url(&resolver);
        let mut item = Item {
            id: self.name.clone(),
            label: self.name.clone(),
            ..Item::default()
        };
        item.add_property(Property::new("total", page.total));
        item.encode_data(&meta)?;
        item.add_items(page.records.iter().map(|r| record_item(&collection, r)));

        item.add_link(link(REL_SELF, resolver.with_query(&meta.to_query())));
        if let Some(next) = next_page(&meta, &page) {
            item.add_link(link(REL_NEXT, resolver.with_query(&next.to_query())));
        }
        if let Some(previous) = previous_page(&meta, &page) {
            item.add_link(link(REL_PREVIOUS, resolver.with_query(&previous.to_query())));
        }

        let open = resolver.with_query("");
        let fields = self.store.field_names();
        item.add_links([
            filter_link(
                &filter_configuration(&fields),
                format!("{open}{}", meta.filter_template()),
                &meta.filter,
                "filter",
            ),
            sort_link(
                &sort_configuration(&fields),
                format!("{open}{}", meta.sort_template()),
                &meta.sort,
                "sort",
            ),
            search_link(format!("{open}{}", meta.search_template()), &meta.search),
        ]);
        item.add_actions([
            create_action(&collection, &fields),
            delete_action(&collection, None),
        ]);
        Ok(item_response(StatusCode::OK, &item))
    }

    fn record(&self, req: &Request<Vec<u8>>, raw_id: &str) -> Result<Response<Vec<u8>>, HttpError> {
        let resolver = UrlResolver::external(req)?;
        let id = percent_decode_str(raw_id).decode_utf8_lossy();
        let record = self
            .store
            .get(&id)
            .ok_or_else(|| HttpError::NotFound(id.to_string()))?;

        let collection = resolver.resolve("./");
        let mut item = record_item(&collection, &record);
        item.add_link(link(REL_COLLECTION, collection.clone()));
        item.add_action(delete_action(&collection, Some(&record.id)));
        Ok(item_response(StatusCode::OK, &item))
    }

    fn execute(&self, req: &Request<Vec<u8>>) -> Result<Response<Vec<u8>>, HttpError> {
        let resolver = UrlResolver::external(req)?;
        let collection = collection_url(&resolver);
        let mut command = Command::extract(req);
        debug!(
            collection = %self.name,
            action = %command.action,
            remote = %extract_remote(req),
            "executing command"
        );

        match command.action.as_str() {
            ACTION_CREATE => {
                let id = command
                    .arguments
                    .remove(FIELD_ID)
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                let mut fields = Map::new();
                for (name, value) in &command.arguments {
                    fields.insert(name.clone(), serde_json::to_value(value)?);
                }
                let record = self.store.insert(&id, fields)?;

                let mut resp = item_response(StatusCode::CREATED, &record_item(&collection, &record));
                if let Ok(location) = HeaderValue::from_str(record_url(&collection, &record.id).as_str()) {
                    resp.headers_mut().insert(LOCATION, location);
                }
                Ok(resp)
            }
            ACTION_DELETE => {
                let id = command.arguments.as_string(FIELD_ID);
                let record = self
                    .store
                    .remove(&id)
                    .ok_or_else(|| HttpError::NotFound(id.clone()))?;
                Ok(item_response(StatusCode::OK, &record_item(&collection, &record)))
            }
            other => Err(HttpError::UnknownAction(other.to_string())),
        }
    }
}

// ── Paging ──────────────────────────────────────────────────────

fn uses_cursor(meta: &Meta) -> bool {
    !meta.after.is_empty() || !meta.before.is_empty()
}

fn next_page(meta: &Meta, page: &Page) -> Option<Meta> {
    if !page.more_after {
        return None;
    }
    if !uses_cursor(meta) {
        return Some(meta.clone().next_page());
    }
    let last = page.records.last()?;
    Some(meta.clone().with_before("").with_after(last.id.clone()))
}

fn previous_page(meta: &Meta, page: &Page) -> Option<Meta> {
    if !page.more_before {
        return None;
    }
    if !uses_cursor(meta) {
        return Some(meta.clone().previous_page());
    }
    let first = page.records.first()?;
    Some(meta.clone().with_after("").with_before(first.id.clone()))
}

// ── Documents ───────────────────────────────────────────────────

/// The collection URL with a trailing slash, so record ids join beneath it.
fn collection_url(resolver: &UrlResolver) -> Url {
    let mut url = resolver.with_query("");
    let path = format!("{}/", url.path().trim_end_matches('/'));
    url.set_path(&path);
    url
}

fn record_url(collection: &Url, id: &str) -> Url {
    let mut url = collection.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(id);
    }
    url
}

fn link(rel: &str, href: Url) -> Link {
    Link::new(rel, href.to_string())
}

fn record_item(collection: &Url, record: &Record) -> Item {
    let mut item = Item {
        id: record.id.clone(),
        label: record.id.clone(),
        rel: REL_DETAILS.to_string(),
        ..Item::default()
    };
    item.add_properties(
        record
            .fields
            .iter()
            .map(|(name, value)| Property::new(name.clone(), value.clone())),
    );
    item.add_link(link(REL_SELF, record_url(collection, &record.id)));
    item
}

fn filter_configuration(fields: &BTreeSet<String>) -> FilterConfiguration {
    let mut configuration = FilterConfiguration(
        fields
            .iter()
            .map(|name| FilterComponentConfiguration {
                label: name.clone(),
                name: name.clone(),
                type_: TYPE_TEXT.to_string(),
                operators: configurations_for_base_type(TYPE_TEXT),
                ..FilterComponentConfiguration::default()
            })
            .collect(),
    );
    configuration.sort_by_label();
    configuration
}

fn sort_configuration(fields: &BTreeSet<String>) -> SortConfiguration {
    SortConfiguration(
        fields
            .iter()
            .map(|name| SortComponentConfiguration {
                label: name.clone(),
                name: name.clone(),
                description: String::new(),
                orders: sort_order_configurations(),
            })
            .collect(),
    )
}

fn create_action(collection: &Url, fields: &BTreeSet<String>) -> Action {
    let mut action = Action {
        label: "Create".to_string(),
        rel: ACTION_CREATE.to_string(),
        href: collection.to_string(),
        method: METHOD_POST.to_string(),
        encoding: CONTENT_TYPE_URL_ENCODED.to_string(),
        ..Action::default()
    };
    action.parameters.push(action_parameter(ACTION_CREATE));
    action
        .parameters
        .extend(fields.iter().map(|name| Parameter::new(name.clone(), TYPE_TEXT)));
    action
}

/// Delete form; with `id` the record is fixed in a hidden parameter.
fn delete_action(collection: &Url, id: Option<&str>) -> Action {
    let mut action = Action {
        label: "Delete".to_string(),
        rel: ACTION_DELETE.to_string(),
        href: collection.to_string(),
        method: METHOD_POST.to_string(),
        encoding: CONTENT_TYPE_URL_ENCODED.to_string(),
        ..Action::default()
    };
    let target = match id {
        Some(id) => Parameter {
            value: Some(serde_json::Value::String(id.to_string())),
            ..Parameter::new(FIELD_ID, TYPE_HIDDEN)
        },
        None => Parameter {
            required: true,
            ..Parameter::new(FIELD_ID, TYPE_TEXT)
        },
    };
    action.parameters.push(action_parameter(ACTION_DELETE));
    action.parameters.push(target);
    action
}
