use serde::{Deserialize, Serialize};
use url::Url;

use crate::encode::QueryWriter;
use crate::error::QueryParseError;
use crate::filter::Filter;
use crate::params::QueryParams;
use crate::sort::Sort;

/// Query state of a collection request: filter, sort, free-text search and
/// both pagination schemes.
///
/// Offset (`skip`/`limit`) and cursor (`after`/`before`) pagination may both
/// be set; deciding which one applies is left to the consumer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    #[serde(skip_serializing_if = "Filter::is_zero")]
    pub filter: Filter,
    #[serde(skip_serializing_if = "Sort::is_zero")]
    pub sort: Sort,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub search: String,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub skip: u64,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub limit: u64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub after: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub before: String,
}

fn is_zero_u64(v: &u64) -> bool {
    *v == 0
}

impl Meta {
    /// Parse the query part of `url`.
    pub fn parse(url: &Url) -> Result<Self, QueryParseError> {
        Self::from_query(url.query().unwrap_or_default())
    }

    pub fn from_uri(uri: &http::Uri) -> Result<Self, QueryParseError> {
        Self::from_query(uri.query().unwrap_or_default())
    }

    /// Parse a raw query string, with or without the leading `?`.
    pub fn from_query(query: &str) -> Result<Self, QueryParseError> {
        let params = QueryParams::parse(query);
        let text = |key: &str| params.first(key).unwrap_or_default().to_string();
        Ok(Self {
            filter: Filter::from_params(&params)?,
            sort: Sort::from_params(&params)?,
            skip: parse_u64(&params, "skip")?,
            limit: parse_u64(&params, "limit")?,
            search: text("search"),
            after: text("after"),
            before: text("before"),
        })
    }

    pub fn is_zero(&self) -> bool {
        self.filter.is_zero()
            && self.sort.is_zero()
            && self.search.is_empty()
            && self.skip == 0
            && self.limit == 0
            && self.after.is_empty()
            && self.before.is_empty()
    }

    /// Raise `limit` to at least `limit`.
    pub fn with_min_limit(mut self, limit: u64) -> Self {
        if self.limit < limit {
            self.limit = limit;
        }
        self
    }

    /// Use `sort` unless a sort is already set.
    pub fn with_default_sort(mut self, sort: Sort) -> Self {
        if self.sort.is_zero() {
            self.sort = sort;
        }
        self
    }

    /// Advance one page, saturating at `u64::MAX`.
    pub fn next_page(mut self) -> Self {
        self.skip = self.skip.saturating_add(self.limit);
        self
    }

    /// Step back one page, clamped at the first page.
    pub fn previous_page(mut self) -> Self {
        self.skip = self.skip.saturating_sub(self.limit);
        self
    }

    pub fn with_after(mut self, cursor: impl Into<String>) -> Self {
        self.after = cursor.into();
        self
    }

    pub fn with_before(mut self, cursor: impl Into<String>) -> Self {
        self.before = cursor.into();
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    /// Canonical query string, `""` for a zero meta. Fields are emitted as
    /// filter, sort, search, skip, limit, after, before; zero fields are
    /// left out.
    pub fn to_query(&self) -> String {
        let mut w = QueryWriter::new();
        self.write_filter(&mut w);
        self.write_sort(&mut w);
        self.write_search(&mut w);
        if self.skip > 0 {
            w.pair("skip", &self.skip.to_string());
        }
        self.write_limit(&mut w);
        if !self.after.is_empty() {
            w.pair("after", &self.after);
        }
        if !self.before.is_empty() {
            w.pair("before", &self.before);
        }
        w.finish()
    }

    /// URI template with the current sort, search and limit fixed and the
    /// filter left open, e.g. `?sort=name%2CASC{&filter*}`.
    pub fn filter_template(&self) -> String {
        let mut w = QueryWriter::new();
        self.write_sort(&mut w);
        self.write_search(&mut w);
        self.write_limit(&mut w);
        w.finish_template("filter*")
    }

    /// URI template with the current filter, search and limit fixed and the
    /// sort left open.
    pub fn sort_template(&self) -> String {
        let mut w = QueryWriter::new();
        self.write_filter(&mut w);
        self.write_search(&mut w);
        self.write_limit(&mut w);
        w.finish_template("sort*")
    }

    /// URI template with the current filter, sort and limit fixed and the
    /// search left open.
    pub fn search_template(&self) -> String {
        let mut w = QueryWriter::new();
        self.write_filter(&mut w);
        self.write_sort(&mut w);
        self.write_limit(&mut w);
        w.finish_template("search")
    }

    fn write_filter(&self, w: &mut QueryWriter) {
        w.list("filter", &self.filter.tokens());
    }

    fn write_sort(&self, w: &mut QueryWriter) {
        w.list("sort", &self.sort.tokens());
    }

    fn write_search(&self, w: &mut QueryWriter) {
        if !self.search.is_empty() {
            w.pair("search", &self.search);
        }
    }

    fn write_limit(&self, w: &mut QueryWriter) {
        if self.limit > 0 {
            w.pair("limit", &self.limit.to_string());
        }
    }
}

fn parse_u64(params: &QueryParams, field: &'static str) -> Result<u64, QueryParseError> {
    match params.first(field) {
        None => Ok(0),
        Some(raw) => raw.parse().map_err(|source| QueryParseError::InvalidNumber {
            field,
            value: raw.to_string(),
            source,
        }),
    }
}
