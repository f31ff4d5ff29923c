//! Tree transformations applied between the XML layer and the caller.
//!
//! The two normalizers ([`collapse_singleton_arrays`] and
//! [`strip_namespace_prefixes`]) mutate a tree in place and share a uniform
//! depth guard: depth increments once per descent into any child structure,
//! and exceeding the configured maximum aborts the whole operation with
//! [`EngineError::DepthExceeded`](crate::error::EngineError::DepthExceeded).
//! [`wrap`] builds a new tree from a cloned template and never mutates its
//! inputs.

mod collapse;
mod envelope;
mod namespace;

pub use collapse::collapse_singleton_arrays;
pub use envelope::wrap;
pub use namespace::strip_namespace_prefixes;
