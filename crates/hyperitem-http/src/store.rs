use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use hyperitem_query::{FilterComponent, FilterOperator, Meta, Sort, SortOrder};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::HttpError;

/// Field name under which a record's id is addressed by filters and sorts.
pub const FIELD_ID: &str = "id";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Text form of a field as filters and sorts see it; absent fields read
    /// as `""`.
    pub fn text(&self, name: &str) -> String {
        if name == FIELD_ID {
            return self.id.clone();
        }
        match self.fields.get(name) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// One window of a query result.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub records: Vec<Record>,
    /// Records matching filter and search, before pagination.
    pub total: usize,
    pub more_before: bool,
    pub more_after: bool,
}

/// Insertion-ordered in-memory record store.
#[derive(Debug, Default)]
pub struct MemoryCollection {
    records: RwLock<Vec<Record>>,
    next_id: AtomicU64,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &str) -> Option<Record> {
        self.read().iter().find(|r| r.id == id).cloned()
    }

    /// Store a record, generating a numeric id when `id` is empty.
    pub fn insert(&self, id: &str, fields: Map<String, Value>) -> Result<Record, HttpError> {
        let mut records = self.write();
        let id = if id.is_empty() {
            self.generate_id(&records)
        } else {
            id.to_string()
        };
        if records.iter().any(|r| r.id == id) {
            return Err(HttpError::Conflict(id));
        }
        let record = Record::new(id, fields);
        records.push(record.clone());
        Ok(record)
    }

    pub fn remove(&self, id: &str) -> Option<Record> {
        let mut records = self.write();
        let index = records.iter().position(|r| r.id == id)?;
        Some(records.remove(index))
    }

    /// Every field name used by any record, plus the id.
    pub fn field_names(&self) -> BTreeSet<String> {
        let mut names: BTreeSet<String> = self
            .read()
            .iter()
            .flat_map(|r| r.fields.keys().cloned())
            .collect();
        names.insert(FIELD_ID.to_string());
        names
    }

    /// Evaluate `meta` against the store.
    ///
    /// Pagination: `after` wins over `before`, and either cursor wins over
    /// `skip`. A cursor naming an unknown id yields an empty page. A zero
    /// `limit` is unbounded.
    pub fn query(&self, meta: &Meta) -> Page {
        let mut matched: Vec<Record> = self
            .read()
            .iter()
            .filter(|r| meta.filter.iter().all(|c| matches_component(r, c)))
            .filter(|r| matches_search(r, &meta.search))
            .cloned()
            .collect();
        sort_records(&mut matched, &meta.sort);

        let total = matched.len();
        let limit = match meta.limit {
            0 => usize::MAX,
            n => usize::try_from(n).unwrap_or(usize::MAX),
        };
        let position = |id: &str| matched.iter().position(|r| r.id == id);

        let (start, end) = if !meta.after.is_empty() {
            match position(&meta.after) {
                Some(i) => (i + 1, (i + 1).saturating_add(limit).min(total)),
                None => (total, total),
            }
        } else if !meta.before.is_empty() {
            match position(&meta.before) {
                Some(i) => (i.saturating_sub(limit), i),
                None => (0, 0),
            }
        } else {
            let skip = usize::try_from(meta.skip).unwrap_or(usize::MAX).min(total);
            (skip, skip.saturating_add(limit).min(total))
        };

        Page {
            records: matched.drain(start..end).collect(),
            total,
            more_before: start > 0,
            more_after: end < total,
        }
    }

    fn generate_id(&self, records: &[Record]) -> String {
        loop {
            let n = self.next_id.fetch_add(1, AtomicOrdering::Relaxed) + 1;
            let id = n.to_string();
            if !records.iter().any(|r| r.id == id) {
                return id;
            }
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Record>> {
        self.records.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Record>> {
        self.records.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl FromIterator<Record> for MemoryCollection {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: RwLock::new(iter.into_iter().collect()),
            next_id: AtomicU64::new(0),
        }
    }
}

/// Numeric comparison when both sides parse as numbers, byte-wise
/// otherwise.
fn compare(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.cmp(b),
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches_component(record: &Record, component: &FilterComponent) -> bool {
    let field = record.text(component.name());
    let values = component.value_strings();
    let scalar = component.value_string();
    let between = || match values.as_slice() {
        [lo, hi] => compare(&field, lo).is_ge() && compare(&field, hi).is_le(),
        _ => false,
    };
    let listed = || values.iter().any(|v| compare(&field, v).is_eq());

    match component.operator() {
        FilterOperator::Equals => compare(&field, scalar).is_eq(),
        FilterOperator::NotEquals => compare(&field, scalar).is_ne(),
        FilterOperator::LessThan => compare(&field, scalar).is_lt(),
        FilterOperator::GreaterThan => compare(&field, scalar).is_gt(),
        FilterOperator::LessThanOrEquals => compare(&field, scalar).is_le(),
        FilterOperator::GreaterThanOrEquals => compare(&field, scalar).is_ge(),
        FilterOperator::Between => between(),
        FilterOperator::NotBetween => !between(),
        FilterOperator::In => listed(),
        FilterOperator::NotIn => !listed(),
        FilterOperator::Like => contains_folded(&field, scalar),
        FilterOperator::NotLike => !contains_folded(&field, scalar),
        FilterOperator::Other(_) => false,
    }
}

fn matches_search(record: &Record, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    contains_folded(&record.id, search)
        || record
            .fields
            .keys()
            .any(|name| contains_folded(&record.text(name), search))
}

fn sort_records(records: &mut [Record], sort: &Sort) {
    if sort.is_empty() {
        return;
    }
    records.sort_by(|a, b| {
        for component in sort {
            let ord = compare(&a.text(&component.name), &b.text(&component.name));
            let ord = match component.order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            };
            if ord.is_ne() {
                return ord;
            }
        }
        Ordering::Equal
    });
}
