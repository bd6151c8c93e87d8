use std::net::{AddrParseError, SocketAddr};
use std::num::ParseIntError;

pub const ENV_ADDR: &str = "HYPERITEM_ADDR";
pub const ENV_PAGE_SIZE: &str = "HYPERITEM_PAGE_SIZE";
pub const ENV_COLLECTION: &str = "HYPERITEM_COLLECTION";

const DEFAULT_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_PAGE_SIZE: u64 = 20;
const DEFAULT_COLLECTION: &str = "records";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("HYPERITEM_ADDR={value:?} is not a socket address: {source}")]
    Addr {
        value: String,
        #[source]
        source: AddrParseError,
    },

    #[error("HYPERITEM_PAGE_SIZE={value:?} is not a page size: {source}")]
    PageSize {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Runtime settings of the server binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub page_size: u64,
    pub collection: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source; unset keys take their
    /// defaults, malformed ones are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr = lookup(ENV_ADDR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr
            .parse()
            .map_err(|source| ConfigError::Addr { value: addr, source })?;

        let page_size = match lookup(ENV_PAGE_SIZE) {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::PageSize { value, source })?,
            None => DEFAULT_PAGE_SIZE,
        };

        let collection = lookup(ENV_COLLECTION)
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_COLLECTION.to_string());

        Ok(Self {
            addr,
            page_size,
            collection,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| env.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let c = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(c.addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(c.page_size, 20);
        assert_eq!(c.collection, "records");
    }

    #[test]
    fn overrides() {
        let c = ServerConfig::from_lookup(lookup(&[
            (ENV_ADDR, "127.0.0.1:9000"),
            (ENV_PAGE_SIZE, "50"),
            (ENV_COLLECTION, "orders"),
        ]))
        .unwrap();
        assert_eq!(c.addr.port(), 9000);
        assert_eq!(c.page_size, 50);
        assert_eq!(c.collection, "orders");
    }

    #[test]
    fn malformed_values_are_errors() {
        let err = ServerConfig::from_lookup(lookup(&[(ENV_PAGE_SIZE, "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::PageSize { .. }));
        assert!(err.to_string().contains("\"lots\""));

        let err = ServerConfig::from_lookup(lookup(&[(ENV_ADDR, "nowhere")])).unwrap_err();
        assert!(matches!(err, ConfigError::Addr { .. }));
    }
}
