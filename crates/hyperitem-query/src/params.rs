use url::form_urlencoded;

/// Decoded query-string pairs in their original order.
#[derive(Debug, Clone, Default)]
pub(crate) struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub(crate) fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    pub(crate) fn all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub(crate) fn first<'a>(&'a self, key: &'a str) -> Option<&'a str> {
        self.all(key).next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_returns_earliest_of_repeated_key() {
        let params = QueryParams::parse("?sort=a,ASC&limit=5&sort=b,DESC");
        let key = String::from("sort");
        assert_eq!(params.first(&key), Some("a,ASC"));
        assert_eq!(params.first("limit"), Some("5"));
        assert_eq!(params.first("skip"), None);
    }
}
