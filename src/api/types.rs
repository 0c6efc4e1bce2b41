use url::form_urlencoded;

/// Query string of `GET /process`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessQuery {
    pub line: String,
}

impl ProcessQuery {
    /// Parse a raw query string. The first well-formed `line` pair wins;
    /// pairs with a broken percent escape or a `;` are skipped, and a missing
    /// `line` yields an empty one.
    pub fn parse(raw: Option<&str>) -> Self {
        let line = raw
            .into_iter()
            .flat_map(|q| q.split('&'))
            .filter(|pair| !pair.is_empty() && !pair.contains(';') && has_valid_escapes(pair))
            .filter_map(|pair| form_urlencoded::parse(pair.as_bytes()).next())
            .find(|(key, _)| key == "line")
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default();

        Self { line }
    }
}

/// Every `%` must be followed by two hex digits.
fn has_valid_escapes(pair: &str) -> bool {
    let bytes = pair.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            if !matches!(escape, Some([a, b]) if a.is_ascii_hexdigit() && b.is_ascii_hexdigit()) {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(raw: &str) -> String {
        ProcessQuery::parse(Some(raw)).line
    }

    #[test]
    fn test_first_line_wins() {
        assert_eq!(line("line=abc&line=def"), "abc");
        assert_eq!(line("other=1&line=x+y"), "x y");
    }

    #[test]
    fn test_malformed_pairs_skipped() {
        assert_eq!(line("line=%ZZ"), "");
        assert_eq!(line("line=%4"), "");
        assert_eq!(line("line=%ZZ&line=ok"), "ok");
        assert_eq!(line("line=a;b&line=c"), "c");
        assert_eq!(line("line=%C3%A9"), "é");
    }

    #[test]
    fn test_missing_line() {
        assert_eq!(ProcessQuery::parse(None), ProcessQuery::default());
        assert_eq!(line(""), "");
        assert_eq!(line("lines=abc"), "");
        assert_eq!(line("line"), "");
    }
}
