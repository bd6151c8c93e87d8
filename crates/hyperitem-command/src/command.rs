use std::collections::BTreeMap;
use std::convert::Infallible;

use bytes::Bytes;
use http::Request;
use multer::{Constraints, Multipart, SizeLimit};
use tracing::debug;
use url::form_urlencoded;

use crate::arguments::Arguments;
use crate::content_type::{CONTENT_TYPE_MULTIPART_FORM_DATA, CONTENT_TYPE_URL_ENCODED, ContentType};
use crate::value::{Upload, Value};

/// Reserved field carrying the action name in every body encoding.
pub const NAME_ACTION: &str = "@action";

/// Upper bound on a multipart body buffered in memory.
pub const DEFAULT_MAX_MEMORY: u64 = 32 << 20;

/// An inbound action invocation: the action name and its arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Command {
    pub action: String,
    pub arguments: Arguments,
}

impl Command {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the command carried by a request body.
    ///
    /// Never fails: a body that cannot be read as its declared encoding
    /// yields an empty command, indistinguishable from a request without
    /// arguments.
    pub fn extract<B: AsRef<[u8]>>(req: &Request<B>) -> Command {
        let content_type = ContentType::from_headers(req.headers());
        Self::decode(&content_type, req.body().as_ref())
    }

    /// Dispatch on the media type: URL-encoded form, multipart form, or
    /// JSON for anything else.
    pub fn decode(content_type: &ContentType, body: &[u8]) -> Command {
        Self::decode_with_limit(content_type, body, DEFAULT_MAX_MEMORY)
    }

    /// Like [`Command::decode`], with a multipart body larger than
    /// `max_memory` bytes treated as undecodable.
    pub fn decode_with_limit(content_type: &ContentType, body: &[u8], max_memory: u64) -> Command {
        let essence = content_type.essence();
        let decoded = match essence.as_str() {
            CONTENT_TYPE_URL_ENCODED => decode_url_encoded(body),
            CONTENT_TYPE_MULTIPART_FORM_DATA => match content_type.parameter("boundary") {
                Some(boundary) => decode_multipart(boundary.trim_matches('"'), body, max_memory),
                None => Err("missing multipart boundary".to_string()),
            },
            _ => decode_json(body),
        };
        match decoded {
            Ok(command) => command,
            Err(reason) => {
                debug!(content_type = %essence, %reason, "ignoring undecodable command body");
                Command::new()
            }
        }
    }
}

/// Extract a command from `req`. See [`Command::extract`].
pub fn extract_command<B: AsRef<[u8]>>(req: &Request<B>) -> Command {
    Command::extract(req)
}

// ── URL-encoded ─────────────────────────────────────────────

fn decode_url_encoded(body: &[u8]) -> Result<Command, String> {
    let body = std::str::from_utf8(body).map_err(|e| e.to_string())?;
    check_escapes(body)?;
    let mut fields: BTreeMap<String, Vec<Value>> = BTreeMap::new();
    for (k, v) in form_urlencoded::parse(body.as_bytes()) {
        fields
            .entry(k.into_owned())
            .or_default()
            .push(Value::String(v.into_owned()));
    }
    Ok(collapse(fields))
}

/// Reject `%` not followed by two hex digits; the lenient form parser
/// would pass them through.
fn check_escapes(body: &str) -> Result<(), String> {
    let bytes = body.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'%' {
            let ok = bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !ok {
                return Err(format!("invalid escape at byte {i}"));
            }
        }
    }
    Ok(())
}

// ── Multipart ───────────────────────────────────────────────

fn decode_multipart(boundary: &str, body: &[u8], max_memory: u64) -> Result<Command, String> {
    let body = Bytes::copy_from_slice(body);
    let fields =
        futures::executor::block_on(read_multipart(boundary.to_string(), body, max_memory))
            .map_err(|e| e.to_string())?;
    Ok(collapse(fields))
}

async fn read_multipart(
    boundary: String,
    body: Bytes,
    max_memory: u64,
) -> Result<BTreeMap<String, Vec<Value>>, multer::Error> {
    let stream = futures::stream::once(async move { Ok::<Bytes, Infallible>(body) });
    let constraints = Constraints::new().size_limit(SizeLimit::new().whole_stream(max_memory));
    let mut multipart = Multipart::with_constraints(stream, boundary, constraints);

    let mut fields: BTreeMap<String, Vec<Value>> = BTreeMap::new();
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let file_name = field.file_name().filter(|f| !f.is_empty()).map(str::to_string);
        let value = match file_name {
            Some(file_name) => {
                let content_type = field.content_type().map(ToString::to_string);
                let data = field.bytes().await?;
                Value::Upload(Upload::new(Some(file_name), content_type, data))
            }
            None => Value::String(field.text().await?),
        };
        fields.entry(name).or_default().push(value);
    }
    Ok(fields)
}

// ── JSON ────────────────────────────────────────────────────

fn decode_json(body: &[u8]) -> Result<Command, String> {
    let object: serde_json::Map<String, serde_json::Value> =
        serde_json::from_slice(body).map_err(|e| e.to_string())?;
    let mut arguments: Arguments = object
        .into_iter()
        .map(|(k, v)| (k, Value::from(v)))
        .collect();

    let mut action = String::new();
    let promoted = arguments.as_string(NAME_ACTION);
    if !promoted.is_empty() {
        arguments.remove(NAME_ACTION);
        action = promoted;
    }
    Ok(Command { action, arguments })
}

/// Fold form fields into a command: `@action` becomes the action, a field
/// submitted once stays a scalar and a repeated field becomes a list.
fn collapse(fields: BTreeMap<String, Vec<Value>>) -> Command {
    let mut command = Command::new();
    for (name, mut values) in fields {
        if name == NAME_ACTION {
            command.action = values
                .into_iter()
                .next()
                .map(|v| v.to_string())
                .unwrap_or_default();
            continue;
        }
        let value = if values.len() == 1 {
            values.remove(0)
        } else {
            Value::List(values)
        };
        command.arguments.insert(name, value);
    }
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_escapes_accepts_valid_and_rejects_truncated() {
        assert!(check_escapes("a=%20b&c=%7E").is_ok());
        assert!(check_escapes("a=b%2").is_err());
        assert!(check_escapes("a=%zz").is_err());
    }

    #[test]
    fn collapse_promotes_first_action() {
        let mut fields = BTreeMap::new();
        fields.insert(NAME_ACTION.to_string(), vec![Value::from("a"), Value::from("b")]);
        fields.insert("x".to_string(), vec![Value::from("1")]);
        let c = collapse(fields);
        assert_eq!(c.action, "a");
        assert_eq!(c.arguments.len(), 1);
        assert!(!c.arguments.contains_key(NAME_ACTION));
    }

    #[test]
    fn json_action_must_be_non_empty_to_be_promoted() {
        let c = decode_json(br#"{"@action": "", "a": 1}"#).unwrap();
        assert_eq!(c.action, "");
        assert!(c.arguments.contains_key(NAME_ACTION));
    }
}
