//! Bidirectional XML <-> JSON tree conversion engine.
//!
//! This crate normalizes the impedance mismatch between XML wire payloads
//! and an internal JSON-like tree, and re-wraps outbound trees into a fixed
//! XML envelope shape (SOAP-style fault/response wrappers):
//!
//! - Singleton-array collapse of the generic parser's output
//! - Namespace-prefix stripping from tree keys
//! - Payload insertion into a configurable wrapper template
//! - Error-descriptor translation into a fixed fault tree
//!
//! All recursive transforms run under a configurable depth bound so that
//! adversarially deep input fails fast instead of exhausting the stack.
//!
//! ## Configuration Example
//!
//! ```yaml
//! parser:
//!   ignore_attributes: true
//! strip_namespace_prefixes: true
//! max_depth: 30
//! wrapper:
//!   "env:Envelope":
//!     "$": { "xmlns:env": "http://www.w3.org/2003/05/soap-envelope" }
//!     "env:Body": {}
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod fault;
pub mod transform;
pub mod xml;

pub use config::{ConversionOverrides, EngineConfig, ParserOptions, SerializerOptions};
pub use engine::{Decoded, XmlEngine};
pub use error::EngineError;
pub use fault::{DefaultFaultTranslator, ErrorDescriptor, FaultTranslator};
