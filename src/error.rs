//! Error types for the conversion engine.

/// Errors surfaced by the conversion engine.
///
/// All three variants propagate unchanged to the caller; XML parsing and
/// serialization are deterministic, so the engine never retries.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The input XML was malformed.
    #[error("XML parse error: {0}")]
    Parse(String),

    /// A normalizer hit the maximum tree depth.
    ///
    /// This is a structural safety limit against adversarial nesting, not a
    /// user-visible transformation error. The tree is never silently
    /// truncated.
    #[error("maximum tree depth {max} exceeded")]
    DepthExceeded {
        /// The configured depth ceiling that was exceeded.
        max: usize,
    },

    /// A tree could not be serialized to XML.
    ///
    /// Should not occur for trees built by the engine itself; treat as a
    /// programming error if it does.
    #[error("XML serialize error: {0}")]
    Serialize(String),
}

impl From<quick_xml::Error> for EngineError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for EngineError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::Parse(err.to_string())
    }
}
