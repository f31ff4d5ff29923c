//! Configuration types for the conversion engine.

use crate::fault::FaultTranslator;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;

/// SOAP 1.2 envelope namespace, used by the default wrapper template.
pub const SOAP_ENVELOPE_NS: &str = "http://www.w3.org/2003/05/soap-envelope";

/// Default maximum tree depth for the normalizers.
pub const DEFAULT_MAX_DEPTH: usize = 30;

/// Options for the XML parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Keep the root element name as the top-level key of the tree.
    /// When false (the default), the root element's value is returned
    /// directly.
    pub explicit_root: bool,
    /// Drop element attributes instead of collecting them under
    /// `attribute_key`.
    pub ignore_attributes: bool,
    /// Trim whitespace around character data.
    pub trim_text: bool,
    /// Key under which element attributes are collected.
    pub attribute_key: String,
    /// Key under which mixed text content is collected.
    pub text_key: String,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            explicit_root: false,
            ignore_attributes: true,
            trim_text: true,
            attribute_key: "$".to_string(),
            text_key: "_".to_string(),
        }
    }
}

/// Options for the XML serializer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializerOptions {
    /// Indent output elements.
    pub pretty: bool,
    /// Number of spaces per indent level (only used when `pretty` is set).
    pub indent: usize,
    /// Emit an `<?xml version="1.0" encoding="UTF-8"?>` declaration.
    pub xml_declaration: bool,
    /// Key whose object value is written as element attributes.
    pub attribute_key: String,
    /// Key whose value is written as element text content.
    pub text_key: String,
    /// Root element name used when the tree has no single top-level key.
    pub root_name: String,
}

impl Default for SerializerOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: 2,
            xml_declaration: true,
            attribute_key: "$".to_string(),
            text_key: "_".to_string(),
            root_name: "root".to_string(),
        }
    }
}

/// Process-wide defaults for the conversion engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// XML parser options.
    pub parser: ParserOptions,
    /// XML serializer options.
    pub serializer: SerializerOptions,
    /// Wrapper template for outbound payloads. The first non-ignored key
    /// path (depth-first) is the payload slot.
    pub wrapper: JsonValue,
    /// Keys skipped when locating the payload slot. When absent, defaults
    /// to the serializer attribute key and the parser text key.
    pub ignored_keys: Option<Vec<String>>,
    /// Collapse single-element arrays after parsing.
    pub collapse_singleton_arrays: bool,
    /// Strip `prefix:` namespace segments from keys after parsing.
    pub strip_namespace_prefixes: bool,
    /// Maximum tree depth tolerated by the normalizers.
    pub max_depth: usize,
    /// Return the original XML text alongside the decoded tree.
    pub propagate_raw_xml: bool,
    /// Content types the boundary layer should accept for XML payloads.
    pub content_types: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parser: ParserOptions::default(),
            serializer: SerializerOptions::default(),
            wrapper: default_wrapper(),
            ignored_keys: None,
            collapse_singleton_arrays: true,
            strip_namespace_prefixes: false,
            max_depth: DEFAULT_MAX_DEPTH,
            propagate_raw_xml: false,
            content_types: vec![
                "application/xml".to_string(),
                "text/xml".to_string(),
            ],
        }
    }
}

impl EngineConfig {
    /// The effective ignored-key set for envelope wrapping.
    pub fn effective_ignored_keys(&self) -> Vec<String> {
        match &self.ignored_keys {
            Some(keys) => keys.clone(),
            None => vec![
                self.serializer.attribute_key.clone(),
                self.parser.text_key.clone(),
            ],
        }
    }
}

/// The default SOAP 1.2 envelope template.
///
/// The `$` attribute marker is an ignored key, so payloads land inside
/// `env:Body`.
pub fn default_wrapper() -> JsonValue {
    json!({
        "env:Envelope": {
            "$": { "xmlns:env": SOAP_ENVELOPE_NS },
            "env:Body": {}
        }
    })
}

/// Per-call configuration overrides.
///
/// Every field mirrors [`EngineConfig`] as an `Option`; absent fields
/// inherit the engine defaults. Resolution is shallow: a present field
/// replaces the default wholesale, with no deep merge inside parser or
/// serializer sub-configurations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOverrides {
    pub parser: Option<ParserOptions>,
    pub serializer: Option<SerializerOptions>,
    pub wrapper: Option<JsonValue>,
    pub ignored_keys: Option<Vec<String>>,
    pub collapse_singleton_arrays: Option<bool>,
    pub strip_namespace_prefixes: Option<bool>,
    pub max_depth: Option<usize>,
    pub propagate_raw_xml: Option<bool>,
    pub content_types: Option<Vec<String>>,
    /// Replacement fault translator for this call. Not part of the
    /// serialized configuration surface.
    #[serde(skip)]
    pub fault_translator: Option<Arc<dyn FaultTranslator>>,
}

/// Shallow-merge per-call overrides onto the engine defaults.
pub fn resolve(defaults: &EngineConfig, overrides: &ConversionOverrides) -> EngineConfig {
    EngineConfig {
        parser: overrides
            .parser
            .clone()
            .unwrap_or_else(|| defaults.parser.clone()),
        serializer: overrides
            .serializer
            .clone()
            .unwrap_or_else(|| defaults.serializer.clone()),
        wrapper: overrides
            .wrapper
            .clone()
            .unwrap_or_else(|| defaults.wrapper.clone()),
        ignored_keys: overrides
            .ignored_keys
            .clone()
            .or_else(|| defaults.ignored_keys.clone()),
        collapse_singleton_arrays: overrides
            .collapse_singleton_arrays
            .unwrap_or(defaults.collapse_singleton_arrays),
        strip_namespace_prefixes: overrides
            .strip_namespace_prefixes
            .unwrap_or(defaults.strip_namespace_prefixes),
        max_depth: overrides.max_depth.unwrap_or(defaults.max_depth),
        propagate_raw_xml: overrides
            .propagate_raw_xml
            .unwrap_or(defaults.propagate_raw_xml),
        content_types: overrides
            .content_types
            .clone()
            .unwrap_or_else(|| defaults.content_types.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.max_depth, 30);
        assert!(config.collapse_singleton_arrays);
        assert!(!config.strip_namespace_prefixes);
        assert!(!config.propagate_raw_xml);
        assert_eq!(
            config.content_types,
            vec!["application/xml".to_string(), "text/xml".to_string()]
        );
        assert!(!config.parser.explicit_root);
        assert!(config.parser.ignore_attributes);
    }

    #[test]
    fn test_effective_ignored_keys_default() {
        let config = EngineConfig::default();
        assert_eq!(
            config.effective_ignored_keys(),
            vec!["$".to_string(), "_".to_string()]
        );
    }

    #[test]
    fn test_effective_ignored_keys_override() {
        let config = EngineConfig {
            ignored_keys: Some(vec!["@attrs".to_string()]),
            ..EngineConfig::default()
        };
        assert_eq!(config.effective_ignored_keys(), vec!["@attrs".to_string()]);
    }

    #[test]
    fn test_config_parsing_yaml() {
        let yaml = r#"
parser:
  ignore_attributes: false
strip_namespace_prefixes: true
max_depth: 10
"#;
        let config: EngineConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(!config.parser.ignore_attributes);
        assert!(config.strip_namespace_prefixes);
        assert_eq!(config.max_depth, 10);
        // Untouched fields keep their defaults.
        assert!(config.collapse_singleton_arrays);
        assert_eq!(config.serializer.root_name, "root");
    }

    #[test]
    fn test_config_parsing_json() {
        let json_str = r#"{
            "wrapper": { "soap:Envelope": { "soap:Body": {} } },
            "ignored_keys": ["@"]
        }"#;
        let config: EngineConfig = serde_json::from_str(json_str).unwrap();
        assert!(config.wrapper.get("soap:Envelope").is_some());
        assert_eq!(config.ignored_keys, Some(vec!["@".to_string()]));
    }

    #[test]
    fn test_resolve_single_field() {
        let defaults = EngineConfig::default();
        let overrides = ConversionOverrides {
            collapse_singleton_arrays: Some(false),
            ..ConversionOverrides::default()
        };
        let effective = resolve(&defaults, &overrides);

        assert!(!effective.collapse_singleton_arrays);
        // Every other field is inherited unchanged.
        assert_eq!(effective.max_depth, defaults.max_depth);
        assert_eq!(effective.wrapper, defaults.wrapper);
        assert_eq!(effective.content_types, defaults.content_types);
        assert_eq!(
            effective.strip_namespace_prefixes,
            defaults.strip_namespace_prefixes
        );
    }

    #[test]
    fn test_resolve_sub_config_replaces_wholesale() {
        let defaults = EngineConfig::default();
        let overrides = ConversionOverrides {
            parser: Some(ParserOptions {
                ignore_attributes: false,
                ..ParserOptions::default()
            }),
            ..ConversionOverrides::default()
        };
        let effective = resolve(&defaults, &overrides);

        // The override sub-config is taken as a whole, not field-merged.
        assert!(!effective.parser.ignore_attributes);
        assert_eq!(effective.parser.attribute_key, "$");
    }

    #[test]
    fn test_resolve_empty_overrides_is_identity() {
        let defaults = EngineConfig {
            max_depth: 7,
            strip_namespace_prefixes: true,
            ..EngineConfig::default()
        };
        let effective = resolve(&defaults, &ConversionOverrides::default());
        assert_eq!(effective.max_depth, 7);
        assert!(effective.strip_namespace_prefixes);
    }

    #[test]
    fn test_default_wrapper_shape() {
        let wrapper = default_wrapper();
        let envelope = wrapper.get("env:Envelope").unwrap();
        assert!(envelope.get("$").is_some());
        assert!(envelope.get("env:Body").is_some());
    }
}
