use std::collections::BTreeMap;
use std::fmt;
use std::io::Cursor;

use bytes::Bytes;
use serde::Serialize;

/// A loosely-typed argument value as submitted by a client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    String(String),
    Number(f64),
    Bool(bool),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Upload(Upload),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::String(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::List(vs) => {
                for (i, v) in vs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{v}")?;
                }
                Ok(())
            }
            Value::Map(_) => match serde_json::to_string(self) {
                Ok(json) => f.write_str(&json),
                Err(_) => Err(fmt::Error),
            },
            Value::Upload(u) => f.write_str(u.file_name().unwrap_or_default()),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or_default()),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(vs) => Value::List(vs.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(m) => {
                Value::Map(m.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Upload> for Value {
    fn from(u: Upload) -> Self {
        Value::Upload(u)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(vs: Vec<T>) -> Self {
        Value::List(vs.into_iter().map(Into::into).collect())
    }
}

/// An uploaded file held in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Upload {
    #[serde(rename = "filename", skip_serializing_if = "Option::is_none")]
    file_name: Option<String>,
    #[serde(rename = "content-type", skip_serializing_if = "Option::is_none")]
    content_type: Option<String>,
    #[serde(rename = "size", serialize_with = "serialize_len")]
    data: Bytes,
}

fn serialize_len<S: serde::Serializer>(data: &Bytes, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(data.len() as u64)
}

impl Upload {
    pub fn new(
        file_name: Option<String>,
        content_type: Option<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name,
            content_type,
            data: data.into(),
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// A reader over the file content.
    pub fn open(&self) -> Cursor<Bytes> {
        Cursor::new(self.data.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_forms() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from(1.0).to_string(), "1");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(vec!["a", "b"]).to_string(), "a,b");
        let upload = Upload::new(Some("a.txt".into()), None, &b"x"[..]);
        assert_eq!(Value::from(upload).to_string(), "a.txt");
    }

    #[test]
    fn map_displays_as_json() {
        let v = Value::from(serde_json::json!({ "b": 1, "a": "x" }));
        assert_eq!(v.to_string(), r#"{"a":"x","b":1.0}"#);
    }

    #[test]
    fn from_json_numbers_become_floats() {
        assert_eq!(Value::from(serde_json::json!(3)), Value::Number(3.0));
    }

    #[test]
    fn upload_serializes_metadata_only() {
        let u = Upload::new(Some("a.bin".into()), Some("application/octet-stream".into()), vec![0u8; 4]);
        assert_eq!(
            serde_json::to_value(&u).unwrap(),
            serde_json::json!({ "filename": "a.bin", "content-type": "application/octet-stream", "size": 4 })
        );
    }
}
