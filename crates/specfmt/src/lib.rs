//! Rewrites inline OpenAPI response schemas into shared `components.schemas`
//! entries so code generators see named, deduplicated types.

#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]

pub mod document;
pub mod error;
pub mod rewriter;
pub mod ui;

pub use document::{Document, Node};
pub use error::{FormatError, StructureError};
