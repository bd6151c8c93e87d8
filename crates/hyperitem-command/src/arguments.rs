use std::collections::BTreeMap;
use std::collections::btree_map;
use std::io::Read;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use percent_encoding::percent_decode_str;
use serde::Serialize;

use crate::value::Value;

/// Named command arguments with lossy, never-failing typed readers.
///
/// Every reader returns the type's zero value when the key is absent or
/// the value cannot be coerced, so a zero result means "absent or invalid".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Arguments(BTreeMap<String, Value>);

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Natural string form of any value.
    pub fn as_string(&self, key: &str) -> String {
        self.get(key).map(ToString::to_string).unwrap_or_default()
    }

    /// Every string of a field that may have been submitted once or many
    /// times.
    pub fn as_strings(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            None => Vec::new(),
            Some(Value::List(vs)) => vs.iter().map(ToString::to_string).collect(),
            Some(v) => vec![v.to_string()],
        }
    }

    pub fn as_float(&self, key: &str) -> f64 {
        match self.get(key) {
            Some(Value::Number(n)) => *n,
            Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
            _ => 0.0,
        }
    }

    pub fn as_int(&self, key: &str) -> i64 {
        match self.get(key) {
            Some(Value::Number(n)) => *n as i64,
            Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
            _ => 0,
        }
    }

    pub fn as_bool(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => *n > 0.0,
            Some(Value::String(s)) => parse_bool(s),
            _ => false,
        }
    }

    /// Binary content of a `data:` URI, a bare base64 string, or an upload.
    pub fn as_bytes(&self, key: &str) -> Option<Vec<u8>> {
        match self.get(key)? {
            Value::String(s) => decode_base64_value(s),
            Value::Upload(upload) => {
                let mut buf = Vec::with_capacity(upload.len());
                upload.open().read_to_end(&mut buf).ok()?;
                Some(buf)
            }
            _ => None,
        }
    }
}

fn parse_bool(s: &str) -> bool {
    matches!(s, "1" | "t" | "T" | "true" | "TRUE" | "True")
}

/// Decode `data:<mime>;base64,<payload>` (payload optionally
/// percent-encoded) or plain base64.
fn decode_base64_value(s: &str) -> Option<Vec<u8>> {
    let payload = match s.find(',') {
        Some(i) if s.starts_with("data:") => {
            percent_decode_str(&s[i + 1..]).decode_utf8().ok()?.into_owned()
        }
        _ => s.to_string(),
    };
    let payload: String = payload.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
    STANDARD.decode(payload).ok()
}

impl FromIterator<(String, Value)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Arguments(iter.into_iter().collect())
    }
}

impl IntoIterator for Arguments {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Arguments {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
