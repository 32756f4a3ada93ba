//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the demo
//! server and for request contexts. All types derive Serde traits for
//! deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ZenConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Per-request context behaviour (form limits, encoders).
    pub context: ContextConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Settings a `Context` reads from the request extensions.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ContextConfig {
    /// Form parsing limits.
    pub form: FormConfig,

    /// Encoder options.
    pub render: RenderConfig,
}

/// Form parsing configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct FormConfig {
    /// Largest urlencoded body that will be parsed, in bytes.
    pub max_body_bytes: usize,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 10 << 20,
        }
    }
}

/// Encoder configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Escape `<`, `>` and `&` inside JSON strings.
    pub escape_html: bool,

    /// Prefix XML bodies with an `<?xml ...?>` declaration.
    pub xml_declaration: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            escape_html: true,
            xml_declaration: false,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "zen=debug,tower_http=debug".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ZenConfig::default();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8080");
        assert_eq!(config.context.form.max_body_bytes, 10 * 1024 * 1024);
        assert!(config.context.render.escape_html);
        assert!(!config.context.render.xml_declaration);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ZenConfig = toml::from_str(
            r#"
            [context.render]
            xml_declaration = true
            "#,
        )
        .unwrap();
        assert!(config.context.render.xml_declaration);
        assert!(config.context.render.escape_html);
        assert_eq!(config.listener, ListenerConfig::default());
    }
}
