//! Response body encoders.
//!
//! # Responsibilities
//! - Encode handler values as JSON, XML or ASN.1 DER
//! - Name the MIME type that goes with each encoding
//!
//! # Design Decisions
//! - Encoders are pure functions returning bytes; the context decides
//!   when headers and body are written
//! - The format is chosen by the handler per call, never from `Accept`

pub mod asn1;
pub mod json;
pub mod xml;

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_XML: &str = "application/xml";
pub const TEXT_XML: &str = "text/xml";
pub const APPLICATION_ASN1: &str = "application/asn1";

/// Serialization formats a context can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Xml,
    Asn1,
}

impl Format {
    pub fn content_type(self) -> &'static str {
        match self {
            Format::Json => APPLICATION_JSON,
            Format::Xml => APPLICATION_XML,
            Format::Asn1 => APPLICATION_ASN1,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Format::Json => "json",
            Format::Xml => "xml",
            Format::Asn1 => "asn1",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "xml" => Ok(Format::Xml),
            "asn1" | "der" => Ok(Format::Asn1),
            other => Err(format!("unknown format: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_types() {
        assert_eq!(Format::Json.content_type(), "application/json");
        assert_eq!(Format::Xml.content_type(), "application/xml");
        assert_eq!(Format::Asn1.content_type(), "application/asn1");
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("JSON".parse::<Format>().unwrap(), Format::Json);
        assert_eq!("der".parse::<Format>().unwrap(), Format::Asn1);
        assert!("yaml".parse::<Format>().is_err());
        assert_eq!(Format::Xml.to_string(), "xml");
    }
}
