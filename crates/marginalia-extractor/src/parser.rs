//! Locate JSON candidates in raw model output

use memchr::memchr;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Fenced code block, optionally tagged `json`; group 1 is the interior
static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:[jJ][sS][oO][nN])?[ \t]*\r?\n?(.*?)```")
        .expect("fenced block pattern is valid")
});

/// Parse the whole text as one JSON value
pub(crate) fn parse_whole(text: &str) -> Result<Value, String> {
    serde_json::from_str(text).map_err(|e| e.to_string())
}

/// Interiors of every fenced code block, in document order
pub(crate) fn fenced_blocks(text: &str) -> impl Iterator<Item = &str> {
    FENCED_BLOCK
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parse exactly one JSON value starting at byte `start`
///
/// Returns the value and the byte offset just past it. Anything after the
/// value is ignored, so trailing prose does not spoil the parse.
pub(crate) fn parse_value_at(text: &str, start: usize) -> Result<(Value, usize), String> {
    let rest = text.get(start..).ok_or("start is not on a char boundary")?;
    let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<Value>();
    match stream.next() {
        Some(Ok(value)) => Ok((value, start + stream.byte_offset())),
        Some(Err(e)) => Err(e.to_string()),
        None => Err("no JSON value".to_string()),
    }
}

/// Objects embedded in prose, tried at each `{` in turn
///
/// Once an object parses, the braces inside it are not tried again, so a
/// well-formed payload is taken as a whole rather than as its nested parts.
/// At most `limit` positions are tried.
pub(crate) struct EmbeddedObjects<'a> {
    text: &'a str,
    pos: usize,
    remaining: usize,
}

impl<'a> EmbeddedObjects<'a> {
    pub(crate) fn new(text: &'a str, limit: usize) -> Self {
        Self {
            text,
            pos: 0,
            remaining: limit,
        }
    }
}

/// One embedded candidate: where it starts and how it parsed
pub(crate) type Candidate = (usize, Result<Value, String>);

impl Iterator for EmbeddedObjects<'_> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let start = self.pos + memchr(b'{', &self.text.as_bytes()[self.pos..])?;
        self.remaining -= 1;

        match parse_value_at(self.text, start) {
            Ok((value, end)) => {
                self.pos = end;
                Some((start, Ok(value)))
            }
            Err(reason) => {
                self.pos = start + 1;
                Some((start, Err(reason)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_whole() {
        assert_eq!(parse_whole("  {\"a\": 1}\n").unwrap(), json!({"a": 1}));
        assert!(parse_whole("Here you go: {\"a\": 1}").is_err());
    }

    #[test]
    fn test_fenced_blocks() {
        let text = "Intro\n```json\n{\"a\": 1}\n```\nmiddle\n```\n[2]\n```\n";
        let blocks: Vec<&str> = fenced_blocks(text).collect();
        assert_eq!(blocks, vec!["{\"a\": 1}\n", "[2]\n"]);
    }

    #[test]
    fn test_fenced_block_inline_and_uppercase() {
        let blocks: Vec<&str> = fenced_blocks("```JSON {\"a\": 1}```").collect();
        assert_eq!(blocks, vec!["{\"a\": 1}"]);
    }

    #[test]
    fn test_unterminated_fence_is_ignored() {
        assert_eq!(fenced_blocks("```json\n{\"a\": 1}").count(), 0);
    }

    #[test]
    fn test_parse_value_at_ignores_trailing_prose() {
        let text = "See {\"a\": \"}\"} and more }";
        let (value, end) = parse_value_at(text, 4).unwrap();
        assert_eq!(value, json!({"a": "}"}));
        assert_eq!(&text[end..], " and more }");
    }

    #[test]
    fn test_embedded_objects_skip_nested_braces() {
        let text = "x {\"a\": {\"b\": 1}} y {bad} z {\"c\": 2}";
        let found: Vec<(usize, bool)> = EmbeddedObjects::new(text, 10)
            .map(|(start, parsed)| (start, parsed.is_ok()))
            .collect();
        assert_eq!(found, vec![(2, true), (20, false), (28, true)]);
    }

    #[test]
    fn test_embedded_objects_limit() {
        assert_eq!(EmbeddedObjects::new("{ { { {", 2).count(), 2);
        assert_eq!(EmbeddedObjects::new("no braces", 5).count(), 0);
    }
}
