//! ASN.1 DER encoding.
//!
//! Types opt in by deriving `rasn::AsnType` and `rasn::Encode`; structs encode
//! as a SEQUENCE of their fields in declaration order.
//!
//! Rust `String` fields encode as UTF8String (tag `0x0c`); use the types in
//! `rasn::types` (`PrintableString`, `Ia5String`, ...) for other string kinds.

use rasn::error::EncodeError;
use rasn::Encode;

/// Encode `value` with the Distinguished Encoding Rules.
pub fn encode<T: Encode>(value: &T) -> Result<Vec<u8>, EncodeError> {
    rasn::der::encode(value)
}
