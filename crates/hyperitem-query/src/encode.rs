use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything but RFC 3986 unreserved characters gets percent-encoded, as
/// in RFC 6570 form-style query expansion.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Builds a `?k=v&k=v` query string. Keys are written as given; values are
/// encoded.
#[derive(Debug, Default)]
pub(crate) struct QueryWriter {
    out: String,
}

impl QueryWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn pair(&mut self, key: &str, value: &str) -> &mut Self {
        self.out.push(if self.out.is_empty() { '?' } else { '&' });
        self.out.push_str(key);
        self.out.push('=');
        self.out.extend(utf8_percent_encode(value, QUERY_VALUE));
        self
    }

    /// Exploded list: one `key=value` pair per element.
    pub(crate) fn list<S: AsRef<str>>(&mut self, key: &str, values: &[S]) -> &mut Self {
        for v in values {
            self.pair(key, v.as_ref());
        }
        self
    }

    /// Append an open template expression continuing the query, e.g.
    /// `{&filter*}`, or starting it when nothing was written.
    pub(crate) fn finish_template(self, variable: &str) -> String {
        let op = if self.out.is_empty() { '?' } else { '&' };
        format!("{}{{{op}{variable}}}", self.out)
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_writer_yields_empty_string() {
        assert_eq!(QueryWriter::new().finish(), "");
    }

    #[test]
    fn reserved_characters_are_encoded() {
        let mut w = QueryWriter::new();
        w.pair("filter", "name,eq,a b/c").pair("limit", "10");
        assert_eq!(w.finish(), "?filter=name%2Ceq%2Ca%20b%2Fc&limit=10");
    }

    #[test]
    fn unreserved_characters_pass_through() {
        let mut w = QueryWriter::new();
        w.pair("search", "a-b.c_d~e");
        assert_eq!(w.finish(), "?search=a-b.c_d~e");
    }

    #[test]
    fn template_continues_or_starts_query() {
        assert_eq!(QueryWriter::new().finish_template("search"), "{?search}");
        let mut w = QueryWriter::new();
        w.list("sort", &["name,ASC"]);
        assert_eq!(w.finish_template("filter*"), "?sort=name%2CASC{&filter*}");
    }
}
