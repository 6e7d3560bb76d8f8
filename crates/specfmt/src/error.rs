use std::path::PathBuf;

use strum::Display;

/// The parsed input is YAML but not a document the rewriter can walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StructureError {
  #[strum(to_string = "expected top-level mapping")]
  ExpectedMapping,
  #[strum(to_string = "missing or invalid 'paths' section")]
  MissingPaths,
}

impl std::error::Error for StructureError {}

/// Every failure of a format run. All of them abort the run before the
/// output file is touched.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
  #[error("open input {}: {source}", path.display())]
  Read { path: PathBuf, source: fmmap::error::Error },

  #[error("write output {}: {source}", path.display())]
  Write { path: PathBuf, source: std::io::Error },

  #[error("decode YAML: {0}")]
  Decode(#[source] saphyr_parser::ScanError),

  #[error("decode YAML: input is not UTF-8: {0}")]
  NotUtf8(#[source] std::str::Utf8Error),

  #[error(transparent)]
  Structure(#[from] StructureError),

  #[error("encode YAML: {0}")]
  Encode(#[source] std::fmt::Error),
}
