//! Tree to XML serialization.

use crate::config::SerializerOptions;
use crate::error::EngineError;
use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::Writer;
use serde_json::Value as JsonValue;
use std::io::Write;

/// A configured XML serializer instance.
///
/// Like [`XmlParser`](crate::xml::XmlParser), the engine keeps one bound to
/// its default options and builds a fresh one for per-call overrides.
#[derive(Debug, Clone)]
pub struct XmlSerializer {
    options: SerializerOptions,
}

impl XmlSerializer {
    /// Create a serializer bound to the given options.
    pub fn new(options: SerializerOptions) -> Self {
        Self { options }
    }

    /// Serialize a tree to an XML string.
    ///
    /// A tree with a single top-level key uses that key as the document
    /// root; otherwise the configured `root_name` wraps the content.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Serialize` if writing fails; this should not
    /// occur for trees built from valid keys and values.
    pub fn serialize(&self, tree: &JsonValue) -> Result<String, EngineError> {
        let mut buf = Vec::with_capacity(256);
        self.write_document(&mut buf, tree)
            .map_err(|err| EngineError::Serialize(err.to_string()))?;
        String::from_utf8(buf).map_err(|err| EngineError::Serialize(err.to_string()))
    }

    fn write_document(&self, buf: &mut Vec<u8>, tree: &JsonValue) -> Result<(), quick_xml::Error> {
        let mut writer = if self.options.pretty {
            Writer::new_with_indent(buf, b' ', self.options.indent)
        } else {
            Writer::new(buf)
        };

        if self.options.xml_declaration {
            writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }

        match tree {
            JsonValue::Object(map) if map.len() == 1 => {
                for (name, value) in map {
                    self.write_value(&mut writer, name, value)?;
                }
                Ok(())
            }
            other => self.write_value(&mut writer, &self.options.root_name, other),
        }
    }

    fn write_value<W: Write>(
        &self,
        writer: &mut Writer<W>,
        name: &str,
        value: &JsonValue,
    ) -> Result<(), quick_xml::Error> {
        match value {
            JsonValue::Array(items) => {
                // A sequence renders as repeated sibling elements.
                for item in items {
                    self.write_value(writer, name, item)?;
                }
                Ok(())
            }
            JsonValue::Object(map) => {
                let attributes: Vec<(String, String)> =
                    match map.get(&self.options.attribute_key) {
                        Some(JsonValue::Object(attrs)) => attrs
                            .iter()
                            .map(|(key, value)| (key.clone(), scalar_text(value)))
                            .collect(),
                        _ => Vec::new(),
                    };

                let mut element = writer.create_element(name);
                for (key, value) in &attributes {
                    element = element.with_attribute((key.as_str(), value.as_str()));
                }

                let text = map.get(&self.options.text_key).map(scalar_text);
                let has_children = map
                    .keys()
                    .any(|key| *key != self.options.attribute_key && *key != self.options.text_key);

                if has_children {
                    element.write_inner_content(|w| {
                        if let Some(ref text) = text {
                            w.write_event(Event::Text(BytesText::new(text)))?;
                        }
                        for (key, value) in map {
                            if *key == self.options.attribute_key
                                || *key == self.options.text_key
                            {
                                continue;
                            }
                            self.write_value(w, key, value)?;
                        }
                        Ok::<(), quick_xml::Error>(())
                    })?;
                } else if let Some(text) = text {
                    element.write_text_content(BytesText::new(&text))?;
                } else {
                    element.write_empty()?;
                }
                Ok(())
            }
            JsonValue::Null => {
                writer.create_element(name).write_empty()?;
                Ok(())
            }
            scalar => {
                let text = scalar_text(scalar);
                writer
                    .create_element(name)
                    .write_text_content(BytesText::new(&text))?;
                Ok(())
            }
        }
    }
}

/// Render a scalar value as XML text content.
fn scalar_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn serializer() -> XmlSerializer {
        XmlSerializer::new(SerializerOptions {
            xml_declaration: false,
            ..SerializerOptions::default()
        })
    }

    #[test]
    fn test_single_key_is_document_root() {
        let xml = serializer()
            .serialize(&json!({"user": {"name": "alice"}}))
            .unwrap();
        assert_eq!(xml, "<user><name>alice</name></user>");
    }

    #[test]
    fn test_multi_key_tree_gets_root_wrapper() {
        let xml = serializer().serialize(&json!({"a": "1", "b": "2"})).unwrap();
        assert_eq!(xml, "<root><a>1</a><b>2</b></root>");
    }

    #[test]
    fn test_sequences_render_as_repeated_elements() {
        let xml = serializer()
            .serialize(&json!({"list": {"item": ["a", "b"]}}))
            .unwrap();
        assert_eq!(xml, "<list><item>a</item><item>b</item></list>");
    }

    #[test]
    fn test_attribute_key_renders_attributes() {
        let xml = serializer()
            .serialize(&json!({"user": {"$": {"id": "7"}, "name": "alice"}}))
            .unwrap();
        assert_eq!(xml, r#"<user id="7"><name>alice</name></user>"#);
    }

    #[test]
    fn test_text_key_renders_text_content() {
        let xml = serializer()
            .serialize(&json!({"user": {"$": {"id": "7"}, "_": "alice"}}))
            .unwrap();
        assert_eq!(xml, r#"<user id="7">alice</user>"#);
    }

    #[test]
    fn test_scalars_and_null() {
        let xml = serializer()
            .serialize(&json!({"m": {"n": 42, "b": true, "e": null}}))
            .unwrap();
        assert_eq!(xml, "<m><n>42</n><b>true</b><e/></m>");
    }

    #[test]
    fn test_special_characters_are_escaped() {
        let xml = serializer()
            .serialize(&json!({"m": "a < b & c"}))
            .unwrap();
        assert_eq!(xml, "<m>a &lt; b &amp; c</m>");
    }

    #[test]
    fn test_declaration_when_enabled() {
        let xml = XmlSerializer::new(SerializerOptions::default())
            .serialize(&json!({"m": "x"}))
            .unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    }

    #[test]
    fn test_empty_object_renders_empty_element() {
        let xml = serializer().serialize(&json!({"Body": {}})).unwrap();
        assert_eq!(xml, "<Body/>");
    }

    #[test]
    fn test_pretty_printing_indents() {
        let options = SerializerOptions {
            pretty: true,
            xml_declaration: false,
            ..SerializerOptions::default()
        };
        let xml = XmlSerializer::new(options)
            .serialize(&json!({"user": {"name": "alice"}}))
            .unwrap();
        assert!(xml.contains("\n  <name>alice</name>"));
    }
}
