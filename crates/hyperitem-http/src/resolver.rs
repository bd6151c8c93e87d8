use std::net::SocketAddr;

use http::header::HOST;
use http::{HeaderMap, Request};
use url::Url;

pub const HEADER_X_FORWARDED_HOST: &str = "x-forwarded-host";
pub const HEADER_X_FORWARDED_FOR: &str = "x-forwarded-for";
pub const HEADER_X_FORWARDED_PROTO: &str = "x-forwarded-proto";
pub const HEADER_X_FORWARDED_SCHEME: &str = "x-forwarded-scheme";
pub const HEADER_X_FORWARDED_PATH: &str = "x-forwarded-path";
pub const HEADER_X_REAL_IP: &str = "x-real-ip";
pub const HEADER_X_CORRELATION_ID: &str = "x-correlation-id";
pub const HEADER_FORWARDED: &str = "forwarded";

/// Resolves references against the URL a client used to reach this
/// service, which may differ from the request URI behind a proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlResolver {
    base: Url,
}

impl UrlResolver {
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    pub fn external<B>(req: &Request<B>) -> Result<Self, url::ParseError> {
        external_url(req).map(Self::new)
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Join a relative reference onto the base; an unjoinable reference
    /// resolves to the base itself.
    pub fn resolve(&self, reference: &str) -> Url {
        self.base.join(reference).unwrap_or_else(|_| self.base.clone())
    }

    /// The base with its query replaced, with or without the leading `?`;
    /// an empty query removes it.
    pub fn with_query(&self, query: &str) -> Url {
        let query = query.trim_start_matches('?');
        let mut url = self.base.clone();
        url.set_query((!query.is_empty()).then_some(query));
        url
    }
}

/// Reconstruct the external URL of `req` from the forwarding headers,
/// falling back to the `Host` header and the request URI.
pub fn external_url<B>(req: &Request<B>) -> Result<Url, url::ParseError> {
    let headers = req.headers();
    let uri = req.uri();

    let scheme = header(headers, HEADER_X_FORWARDED_PROTO)
        .or_else(|| uri.scheme_str())
        .unwrap_or("http");
    let host = header(headers, HEADER_X_FORWARDED_HOST)
        .or_else(|| header(headers, HOST.as_str()))
        .or_else(|| uri.authority().map(|a| a.as_str()))
        .unwrap_or("localhost");
    let path = header(headers, HEADER_X_FORWARDED_PATH).unwrap_or_else(|| uri.path());

    let mut raw = format!("{scheme}://{host}{path}");
    if let Some(query) = uri.query().filter(|q| !q.is_empty()) {
        raw.push('?');
        raw.push_str(query);
    }
    Url::parse(&raw)
}

/// The originating client address: `X-Forwarded-For` when present,
/// otherwise the peer address the server attached to the request.
pub fn extract_remote<B>(req: &Request<B>) -> String {
    if let Some(forwarded) = header(req.headers(), HEADER_X_FORWARDED_FOR) {
        return forwarded.to_string();
    }
    req.extensions()
        .get::<SocketAddr>()
        .map(|peer| peer.ip().to_string())
        .unwrap_or_default()
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(uri: &str, headers: &[(&str, &str)]) -> Request<()> {
        let mut builder = Request::builder().uri(uri);
        for (k, v) in headers {
            builder = builder.header(*k, *v);
        }
        builder.body(()).unwrap()
    }

    #[test]
    fn host_header_and_request_path() {
        let req = request("/orders?limit=5", &[("host", "api.local:8080")]);
        assert_eq!(
            external_url(&req).unwrap().as_str(),
            "http://api.local:8080/orders?limit=5"
        );
    }

    #[test]
    fn forwarded_headers_win() {
        let req = request(
            "/orders?limit=5",
            &[
                ("host", "internal:8080"),
                ("x-forwarded-proto", "https"),
                ("x-forwarded-host", "shop.example.com"),
                ("x-forwarded-path", "/api/orders"),
            ],
        );
        assert_eq!(
            external_url(&req).unwrap().as_str(),
            "https://shop.example.com/api/orders?limit=5"
        );
    }

    #[test]
    fn absolute_uri_without_host_header() {
        let req = request("https://edge.example.com/x", &[]);
        assert_eq!(external_url(&req).unwrap().as_str(), "https://edge.example.com/x");

        let req = request("/x", &[]);
        assert_eq!(external_url(&req).unwrap().as_str(), "http://localhost/x");
    }

    #[test]
    fn resolve_relative_references() {
        let resolver = UrlResolver::new(Url::parse("https://h.example/api/orders?skip=2").unwrap());
        assert_eq!(resolver.resolve("/api/orders/7").as_str(), "https://h.example/api/orders/7");
        assert_eq!(resolver.resolve("?limit=1").as_str(), "https://h.example/api/orders?limit=1");
        assert_eq!(resolver.with_query("").as_str(), "https://h.example/api/orders");
        assert_eq!(resolver.with_query("a=b").as_str(), "https://h.example/api/orders?a=b");
        assert_eq!(resolver.with_query("?a=b").as_str(), "https://h.example/api/orders?a=b");
    }

    #[test]
    fn remote_prefers_forwarded_for() {
        let mut req = request("/", &[]);
        req.extensions_mut().insert("10.0.0.7:5123".parse::<SocketAddr>().unwrap());
        assert_eq!(extract_remote(&req), "10.0.0.7");

        let req = request("/", &[("x-forwarded-for", "203.0.113.9")]);
        assert_eq!(extract_remote(&req), "203.0.113.9");

        assert_eq!(extract_remote(&request("/", &[])), "");
    }
}
