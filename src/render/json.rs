//! JSON encoding.
//!
//! Output is one compact document followed by a newline. String contents have
//! `<`, `>` and `&` escaped as `\u003c`, `\u003e`, `\u0026` unless HTML escaping
//! is turned off; U+2028 and U+2029 are always escaped so the output can be
//! embedded in a `<script>` block.

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use std::io;

/// Encode `value` as a newline-terminated JSON document.
pub fn encode<T>(value: &T, escape_html: bool) -> Result<Vec<u8>, serde_json::Error>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::with_capacity(128);
    let mut serializer = Serializer::with_formatter(&mut buf, SafeFormatter { escape_html });
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Compact layout; only string fragments are rewritten.
struct SafeFormatter {
    escape_html: bool,
}

impl Formatter for SafeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            let escaped = match ch {
                '<' if self.escape_html => "\\u003c",
                '>' if self.escape_html => "\\u003e",
                '&' if self.escape_html => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..i].as_bytes())?;
            writer.write_all(escaped.as_bytes())?;
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Message {
        id: u32,
        body: String,
    }

    #[test]
    fn test_compact_with_newline() {
        let out = encode(&Message { id: 7, body: "hi".into() }, true).unwrap();
        assert_eq!(out, b"{\"id\":7,\"body\":\"hi\"}\n");
    }

    #[test]
    fn test_escapes_html() {
        let out = encode("<a href=\"x\">&</a>", true).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\"\\u003ca href=\\\"x\\\"\\u003e\\u0026\\u003c/a\\u003e\"\n"
        );
    }

    #[test]
    fn test_html_escaping_can_be_disabled() {
        let out = encode("<b>&</b>", false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\"<b>&</b>\"\n");
    }

    #[test]
    fn test_line_separators_always_escaped() {
        let out = encode("a\u{2028}b\u{2029}", false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\"a\\u2028b\\u2029\"\n");
    }

    #[test]
    fn test_output_parses_back() {
        let out = encode(&serde_json::json!({"k": ["<x>", 1.5, null]}), true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["k"][0], "<x>");
    }
}
