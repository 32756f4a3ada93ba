//! XML encoding.
//!
//! Structs become an element named after the type with one child element per
//! field. Fields renamed with a leading `@` (`#[serde(rename = "@id")]`)
//! become attributes. Values without a type name (strings, numbers,
//! sequences) take the element name from the Rust type instead, so
//! `"hi"` becomes `<string>hi</string>` and `vec![1u8, 2]` becomes
//! `<u8>1</u8><u8>2</u8>`.

use std::any::type_name;

use quick_xml::DeError;
use serde::Serialize;

pub const DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Encode `value` with its type name as the root element.
pub fn encode<T>(value: &T, declaration: bool) -> Result<Vec<u8>, DeError>
where
    T: Serialize + ?Sized,
{
    match quick_xml::se::to_string(value) {
        Ok(body) => Ok(finish(body, declaration)),
        Err(DeError::Unsupported(reason)) if reason.contains("root tag") => {
            encode_with_root(value, &root_name(type_name::<T>()), declaration)
        }
        Err(err) => Err(err),
    }
}

/// Encode `value` under an explicit root element, for values without a type
/// name such as strings, numbers and maps.
pub fn encode_with_root<T>(
    value: &T,
    root: &str,
    declaration: bool,
) -> Result<Vec<u8>, quick_xml::DeError>
where
    T: Serialize + ?Sized,
{
    let body = quick_xml::se::to_string_with_root(root, value)?;
    Ok(finish(body, declaration))
}

/// Element name for a Rust type path. References and containers are peeled
/// down to the element type; `str`/`String` read as `string`.
fn root_name(path: &str) -> String {
    let path = path.trim_start_matches('&').trim_start_matches("mut ");

    if let Some(inner) = path.strip_prefix('[') {
        let end = inner.find(';').or_else(|| inner.rfind(']')).unwrap_or(inner.len());
        return root_name(&inner[..end]);
    }

    let (base, args) = match path.find('<') {
        Some(open) => (&path[..open], path[open + 1..].strip_suffix('>')),
        None => (path, None),
    };
    let name = base.rsplit("::").next().unwrap_or(base);
    match (name, args) {
        ("Vec" | "VecDeque" | "Box" | "Option", Some(inner)) => root_name(inner),
        ("str" | "String", _) => "string".to_string(),
        _ if is_xml_name(name) => name.to_string(),
        _ => "value".to_string(),
    }
}

fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn finish(body: String, declaration: bool) -> Vec<u8> {
    if declaration {
        let mut out = String::with_capacity(DECLARATION.len() + body.len());
        out.push_str(DECLARATION);
        out.push_str(&body);
        out.into_bytes()
    } else {
        body.into_bytes()
    }
}
