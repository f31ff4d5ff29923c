//! Generic XML parsing and serialization over `serde_json::Value` trees.
//!
//! The mapping is deliberately schema-free: every child element lands in an
//! array under its element name (repeated elements accumulate), text-only
//! elements become strings, attributes are collected under the configured
//! attribute key, and mixed text under the text key. Singleton-array
//! collapse and namespace stripping are separate, configurable transforms
//! in [`crate::transform`].

mod parse;
mod serialize;

pub use parse::XmlParser;
pub use serialize::XmlSerializer;
