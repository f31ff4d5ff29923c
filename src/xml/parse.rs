//! XML to tree parsing.

use crate::config::ParserOptions;
use crate::error::EngineError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value as JsonValue};

/// A configured XML parser instance.
///
/// Cheap to construct; the engine keeps one bound to its default options
/// and builds a fresh one whenever a per-call override supplies its own
/// parser sub-configuration.
#[derive(Debug, Clone)]
pub struct XmlParser {
    options: ParserOptions,
}

impl XmlParser {
    /// Create a parser bound to the given options.
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    /// Parse an XML document into a tree.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Parse` on malformed XML or a missing root
    /// element.
    pub fn parse(&self, xml: &str) -> Result<JsonValue, EngineError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(self.options.trim_text);

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    let name = qname_to_string(&start);
                    let value = self.read_element(&mut reader, &start)?;
                    return Ok(self.finish_root(name, value));
                }
                Event::Empty(start) => {
                    let name = qname_to_string(&start);
                    let attributes = self.collect_attributes(&start)?;
                    let value = self.assemble(attributes, Map::new(), String::new());
                    return Ok(self.finish_root(name, value));
                }
                Event::Eof => {
                    return Err(EngineError::Parse("missing root element".to_string()));
                }
                // Declaration, comments, processing instructions, doctype.
                _ => {}
            }
        }
    }

    fn finish_root(&self, name: String, value: JsonValue) -> JsonValue {
        if self.options.explicit_root {
            let mut root = Map::new();
            root.insert(name, value);
            JsonValue::Object(root)
        } else {
            value
        }
    }

    fn read_element(
        &self,
        reader: &mut Reader<&[u8]>,
        start: &BytesStart<'_>,
    ) -> Result<JsonValue, EngineError> {
        let attributes = self.collect_attributes(start)?;
        let mut children: Map<String, JsonValue> = Map::new();
        let mut text = String::new();

        loop {
            match reader.read_event()? {
                Event::Start(child) => {
                    let name = qname_to_string(&child);
                    let value = self.read_element(reader, &child)?;
                    append_child(&mut children, name, value);
                }
                Event::Empty(child) => {
                    let name = qname_to_string(&child);
                    let child_attributes = self.collect_attributes(&child)?;
                    let value = self.assemble(child_attributes, Map::new(), String::new());
                    append_child(&mut children, name, value);
                }
                Event::Text(t) => {
                    let unescaped = t
                        .unescape()
                        .map_err(|err| EngineError::Parse(err.to_string()))?;
                    text.push_str(&unescaped);
                }
                Event::CData(t) => {
                    text.push_str(&String::from_utf8_lossy(&t.into_inner()));
                }
                Event::End(_) => break,
                Event::Eof => {
                    return Err(EngineError::Parse(
                        "unexpected end of document".to_string(),
                    ));
                }
                _ => {}
            }
        }

        Ok(self.assemble(attributes, children, text))
    }

    fn collect_attributes(
        &self,
        start: &BytesStart<'_>,
    ) -> Result<Map<String, JsonValue>, EngineError> {
        let mut attributes = Map::new();
        if self.options.ignore_attributes {
            return Ok(attributes);
        }

        for attribute in start.attributes() {
            let attribute = attribute?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let raw = String::from_utf8_lossy(&attribute.value);
            let value = quick_xml::escape::unescape(&raw)
                .map_err(|err| EngineError::Parse(err.to_string()))?
                .into_owned();
            attributes.insert(key, JsonValue::String(value));
        }
        Ok(attributes)
    }

    /// Assemble an element's attributes, children, and text into a tree
    /// node. Text-only elements collapse to a plain string; otherwise
    /// attributes go under the attribute key and text under the text key,
    /// ahead of the child entries.
    fn assemble(
        &self,
        attributes: Map<String, JsonValue>,
        children: Map<String, JsonValue>,
        text: String,
    ) -> JsonValue {
        let text = if self.options.trim_text {
            text.trim().to_string()
        } else {
            text
        };

        if attributes.is_empty() && children.is_empty() {
            return JsonValue::String(text);
        }

        let mut node = Map::new();
        if !attributes.is_empty() {
            node.insert(
                self.options.attribute_key.clone(),
                JsonValue::Object(attributes),
            );
        }
        if !text.is_empty() {
            node.insert(self.options.text_key.clone(), JsonValue::String(text));
        }
        for (key, value) in children {
            node.insert(key, value);
        }
        JsonValue::Object(node)
    }
}

/// Element name including any namespace prefix (stripping is a separate,
/// configurable transform).
fn qname_to_string(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

/// Append a child value under its element name, accumulating repeated
/// elements into one array.
fn append_child(children: &mut Map<String, JsonValue>, name: String, value: JsonValue) {
    match children.get_mut(&name) {
        Some(JsonValue::Array(items)) => items.push(value),
        _ => {
            children.insert(name, JsonValue::Array(vec![value]));
        }
    }
}
