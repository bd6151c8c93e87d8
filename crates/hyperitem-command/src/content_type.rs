use std::collections::BTreeMap;
use std::fmt;

use http::HeaderMap;
use http::header::CONTENT_TYPE;

pub const CONTENT_TYPE_HYPER_ITEM: &str = "application/vnd.hyper-item+json";
pub const CONTENT_TYPE_HYPER_ITEM_UTF8: &str = "application/vnd.hyper-item+json;charset=UTF-8";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_URL_ENCODED: &str = "application/x-www-form-urlencoded";
pub const CONTENT_TYPE_MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// A parsed media type: `type/subtype;key=value;...`.
///
/// Parsing never fails. Input without a `/` yields an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentType {
    type_: String,
    subtype: String,
    parameters: BTreeMap<String, String>,
}

impl ContentType {
    pub fn parse(raw: &str) -> Self {
        let Some((type_, rest)) = raw.split_once('/') else {
            return Self::default();
        };
        let (subtype, params) = match rest.split_once(';') {
            Some((subtype, params)) => (subtype, Some(params)),
            None => (rest, None),
        };
        let parameters = params
            .into_iter()
            .flat_map(|p| p.split(';'))
            .filter(|p| !p.trim().is_empty())
            .map(|p| match p.split_once('=') {
                Some((k, v)) => (k.trim().to_string(), v.trim().to_string()),
                None => (p.trim().to_string(), String::new()),
            })
            .collect();
        Self {
            type_: type_.trim().to_string(),
            subtype: subtype.trim().to_string(),
            parameters,
        }
    }

    /// The `Content-Type` header of `headers`, empty when absent or not
    /// visible ASCII.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(Self::parse)
            .unwrap_or_default()
    }

    pub fn type_(&self) -> &str {
        &self.type_
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    pub fn is_empty(&self) -> bool {
        self.type_.is_empty() && self.subtype.is_empty() && self.parameters.is_empty()
    }

    /// Lower-cased `type/subtype` without parameters, used for dispatch.
    pub fn essence(&self) -> String {
        format!("{}/{}", self.type_, self.subtype).to_ascii_lowercase()
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        write!(f, "{}/{}", self.type_, self.subtype)?;
        for (k, v) in &self.parameters {
            write!(f, ";{k}={v}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_type_and_subtype() {
        let ct = ContentType::parse("application/json");
        assert_eq!(ct.type_(), "application");
        assert_eq!(ct.subtype(), "json");
        assert!(ct.parameters().is_empty());
    }

    #[test]
    fn parse_parameters() {
        let ct = ContentType::parse("multipart/form-data; boundary=abc ; charset = utf-8");
        assert_eq!(ct.subtype(), "form-data");
        assert_eq!(ct.parameter("boundary"), Some("abc"));
        assert_eq!(ct.parameter("charset"), Some("utf-8"));
    }

    #[test]
    fn parameter_value_keeps_later_equals_signs() {
        let ct = ContentType::parse("text/plain;x=a=b");
        assert_eq!(ct.parameter("x"), Some("a=b"));
    }

    #[test]
    fn parameter_without_value() {
        let ct = ContentType::parse("text/plain;flag;");
        assert_eq!(ct.parameter("flag"), Some(""));
        assert_eq!(ct.parameters().len(), 1);
    }

    #[test]
    fn malformed_is_empty() {
        let ct = ContentType::parse("invalid-content-type-string");
        assert_eq!(ct, ContentType::default());
        assert!(ct.is_empty());
        assert_eq!(ct.to_string(), "");
    }

    #[test]
    fn canonical_string() {
        let ct = ContentType::parse(" application/vnd.hyper-item+json ;charset=UTF-8;a=1");
        assert_eq!(ct.to_string(), "application/vnd.hyper-item+json;a=1;charset=UTF-8");
        assert_eq!(ct.essence(), CONTENT_TYPE_HYPER_ITEM);
    }

    #[test]
    fn essence_is_lower_case() {
        let ct = ContentType::parse("Application/X-WWW-Form-URLEncoded; charset=UTF-8");
        assert_eq!(ct.essence(), CONTENT_TYPE_URL_ENCODED);
    }

    #[test]
    fn from_headers() {
        let mut headers = HeaderMap::new();
        assert!(ContentType::from_headers(&headers).is_empty());
        headers.insert(CONTENT_TYPE, CONTENT_TYPE_JSON.parse().unwrap());
        assert_eq!(ContentType::from_headers(&headers).essence(), CONTENT_TYPE_JSON);
    }
}
