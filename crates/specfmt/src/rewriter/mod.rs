//! Moves inline response schemas of an OpenAPI document into `components.schemas`.
//!
//! The walker drives a single pass over `paths`. For every inline JSON
//! response schema it derives a name, then either registers the schema as a
//! new component, reuses a structurally identical one, or splits the
//! `allOf` object-with-alternatives idiom into two components.

mod alternatives;
mod fingerprint;
mod naming;
mod registry;
mod report;
mod walker;

pub use alternatives::{build_composite_schema, find_alternatives_base, is_alternatives_composition};
pub use fingerprint::Fingerprint;
pub use naming::{capitalize_segments, derive_response_name, derive_schema_name};
pub use registry::{Componentized, SchemaRegistry};
pub use report::{RewriteEvent, RewriteReport};
pub use walker::refactor_inline_response_schemas;

#[cfg(test)]
mod tests;
