//! The conversion facade: decode, encode, and fault rendering.

use crate::config::{resolve, ConversionOverrides, EngineConfig};
use crate::error::EngineError;
use crate::fault::{DefaultFaultTranslator, ErrorDescriptor, FaultTranslator};
use crate::transform::{collapse_singleton_arrays, strip_namespace_prefixes, wrap};
use crate::xml::{XmlParser, XmlSerializer};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{debug, trace};

/// Result of decoding an XML payload.
#[derive(Debug, Clone)]
pub struct Decoded {
    /// The normalized tree.
    pub tree: JsonValue,
    /// The original XML text, present when `propagate_raw_xml` is enabled.
    pub raw_xml: Option<String>,
}

/// The bidirectional XML conversion engine.
///
/// Stateless per call: the default configuration, parser, serializer, and
/// fault translator are immutable reference data shared by concurrent
/// calls. Per-call overrides resolve against the defaults without touching
/// them; an override that supplies a parser or serializer sub-configuration
/// gets a fresh instance for that call only.
pub struct XmlEngine {
    defaults: EngineConfig,
    translator: Arc<dyn FaultTranslator>,
    parser: XmlParser,
    serializer: XmlSerializer,
}

impl XmlEngine {
    /// Create an engine with the given defaults and the default fault
    /// translator.
    pub fn new(config: EngineConfig) -> Self {
        let parser = XmlParser::new(config.parser.clone());
        let serializer = XmlSerializer::new(config.serializer.clone());

        debug!(
            max_depth = config.max_depth,
            collapse = config.collapse_singleton_arrays,
            strip = config.strip_namespace_prefixes,
            "Conversion engine initialized"
        );

        Self {
            defaults: config,
            translator: Arc::new(DefaultFaultTranslator),
            parser,
            serializer,
        }
    }

    /// Replace the engine's fault translator.
    pub fn with_fault_translator(mut self, translator: Arc<dyn FaultTranslator>) -> Self {
        self.translator = translator;
        self
    }

    /// The installed default configuration.
    pub fn defaults(&self) -> &EngineConfig {
        &self.defaults
    }

    /// Install a new default configuration, replacing the default parser
    /// and serializer instances along with it.
    pub fn install_defaults(&mut self, config: EngineConfig) {
        self.parser = XmlParser::new(config.parser.clone());
        self.serializer = XmlSerializer::new(config.serializer.clone());
        self.defaults = config;
    }

    /// Decode an XML payload into a normalized tree.
    ///
    /// Sequences parse, then (if enabled) singleton-array collapse, then
    /// (if enabled) namespace stripping.
    ///
    /// # Errors
    ///
    /// `ParseError` and `DepthExceeded` propagate unchanged.
    pub fn decode(
        &self,
        xml: &str,
        overrides: Option<&ConversionOverrides>,
    ) -> Result<Decoded, EngineError> {
        let options = self.resolve_options(overrides);

        let fresh;
        let parser = match overrides.and_then(|o| o.parser.as_ref()) {
            Some(parser_options) => {
                fresh = XmlParser::new(parser_options.clone());
                &fresh
            }
            None => &self.parser,
        };

        let mut tree = parser.parse(xml)?;

        if options.collapse_singleton_arrays {
            collapse_singleton_arrays(&mut tree, options.max_depth)?;
        }
        if options.strip_namespace_prefixes {
            strip_namespace_prefixes(&mut tree, options.max_depth)?;
        }

        trace!(bytes = xml.len(), "Decoded XML payload");

        let raw_xml = options.propagate_raw_xml.then(|| xml.to_string());
        Ok(Decoded { tree, raw_xml })
    }

    /// Wrap a tree in the configured envelope and serialize it to XML.
    pub fn encode(
        &self,
        tree: &JsonValue,
        overrides: Option<&ConversionOverrides>,
    ) -> Result<String, EngineError> {
        let options = self.resolve_options(overrides);
        let ignored_keys = options.effective_ignored_keys();

        let wrapped = wrap(tree, &options.wrapper, &ignored_keys);

        let fresh;
        let serializer = match overrides.and_then(|o| o.serializer.as_ref()) {
            Some(serializer_options) => {
                fresh = XmlSerializer::new(serializer_options.clone());
                &fresh
            }
            None => &self.serializer,
        };

        let xml = serializer.serialize(&wrapped)?;
        trace!(bytes = xml.len(), "Encoded XML payload");
        Ok(xml)
    }

    /// Translate an error descriptor into a fault tree.
    pub fn translate_fault(&self, error: &ErrorDescriptor) -> JsonValue {
        self.translator.translate(error)
    }

    /// Render an error descriptor as a wrapped XML fault document.
    pub fn encode_fault(
        &self,
        error: &ErrorDescriptor,
        overrides: Option<&ConversionOverrides>,
    ) -> Result<String, EngineError> {
        let translator = overrides
            .and_then(|o| o.fault_translator.clone())
            .unwrap_or_else(|| Arc::clone(&self.translator));

        let fault = translator.translate(error);
        debug!(status = error.status(), "Rendering fault response");
        self.encode(&fault, overrides)
    }

    fn resolve_options(&self, overrides: Option<&ConversionOverrides>) -> EngineConfig {
        match overrides {
            Some(overrides) => resolve(&self.defaults, overrides),
            None => self.defaults.clone(),
        }
    }
}

impl Default for XmlEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
