mod builder;
mod emitter;
pub mod loader;
mod scalar;

pub use loader::{SpecLoader, emit_yaml, parse_yaml};
pub use scalar::{Comments, Scalar, ScalarStyle, resolve_plain};

pub(crate) const STR_TAG: &str = "!!str";
pub(crate) const NULL_TAG: &str = "!!null";
pub(crate) const BOOL_TAG: &str = "!!bool";
pub(crate) const INT_TAG: &str = "!!int";
pub(crate) const FLOAT_TAG: &str = "!!float";
pub(crate) const SEQ_TAG: &str = "!!seq";
pub(crate) const MAP_TAG: &str = "!!map";

const REF_KEY: &str = "$ref";
pub(crate) const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// A node of a parsed YAML document.
///
/// Mappings are kept as ordered key/value pairs so that a rewritten document
/// serializes back in the order it was read, duplicate keys included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
  Scalar(Scalar),
  Sequence(Vec<Node>),
  Mapping(Vec<(Node, Node)>),
}

impl Node {
  pub fn string(value: impl Into<String>) -> Self {
    Self::Scalar(Scalar::new(STR_TAG, value, ScalarStyle::Auto))
  }

  pub const fn empty_mapping() -> Self {
    Self::Mapping(Vec::new())
  }

  /// Builds a mapping from string keys, keeping the given order.
  pub fn mapping<K: Into<String>>(entries: impl IntoIterator<Item = (K, Node)>) -> Self {
    Self::Mapping(
      entries
        .into_iter()
        .map(|(key, value)| (Self::string(key), value))
        .collect(),
    )
  }

  /// Builds `{$ref: "#/components/schemas/<name>"}`.
  pub fn schema_ref(name: &str) -> Self {
    Self::mapping([(REF_KEY, Self::string(format!("{SCHEMA_REF_PREFIX}{name}")))])
  }

  pub const fn is_mapping(&self) -> bool {
    matches!(self, Self::Mapping(_))
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::Scalar(scalar) => Some(scalar.value.as_str()),
      _ => None,
    }
  }

  pub fn as_sequence(&self) -> Option<&[Node]> {
    match self {
      Self::Sequence(items) => Some(items),
      _ => None,
    }
  }

  pub fn entries(&self) -> &[(Node, Node)] {
    match self {
      Self::Mapping(entries) => entries,
      _ => &[],
    }
  }

  /// Returns the value of the first entry whose key is `key`.
  pub fn get(&self, key: &str) -> Option<&Node> {
    self
      .entries()
      .iter()
      .find(|(k, _)| k.as_str() == Some(key))
      .map(|(_, v)| v)
  }

  pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
    match self {
      Self::Mapping(entries) => entries
        .iter_mut()
        .find(|(k, _)| k.as_str() == Some(key))
        .map(|(_, v)| v),
      _ => None,
    }
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.get(key).is_some()
  }

  /// Scalar text stored under `key`, if any.
  pub fn get_str(&self, key: &str) -> Option<&str> {
    self.get(key).and_then(Node::as_str)
  }

  /// Appends `key: value`. Does not check for an existing entry.
  ///
  /// Non-mapping nodes are left unchanged.
  pub fn push_entry(&mut self, key: impl Into<String>, value: Node) {
    if let Self::Mapping(entries) = self {
      entries.push((Self::string(key), value));
    }
  }

  /// Returns the mapping stored under `key`, creating it when absent.
  ///
  /// A non-mapping receiver, or a non-mapping value under `key`, is replaced
  /// by an empty mapping first.
  pub fn ensure_mapping(&mut self, key: &str) -> &mut Node {
    if !self.is_mapping() {
      *self = Self::empty_mapping();
    }

    match self {
      Self::Mapping(entries) => {
        let index = match entries.iter().position(|(k, _)| k.as_str() == Some(key)) {
          Some(index) => index,
          None => {
            entries.push((Self::string(key), Self::empty_mapping()));
            entries.len() - 1
          }
        };

        let value = &mut entries[index].1;
        if !value.is_mapping() {
          *value = Self::empty_mapping();
        }
        value
      }
      other => other,
    }
  }

  /// A mapping holding exactly one entry keyed `$ref`.
  pub fn is_ref_only(&self) -> bool {
    matches!(self, Self::Mapping(entries) if entries.len() == 1 && entries[0].0.as_str() == Some(REF_KEY))
  }

  /// Replaces the contents of this node with a reference to the named component schema.
  pub fn make_ref_only(&mut self, name: &str) {
    *self = Self::schema_ref(name);
  }

  /// The `#/components/schemas/` target of a reference-only mapping.
  pub fn ref_target(&self) -> Option<&str> {
    if !self.is_ref_only() {
      return None;
    }
    self.get_str(REF_KEY)?.strip_prefix(SCHEMA_REF_PREFIX)
  }
}

/// A parsed document: one root node owned by the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
  pub root: Node,
  /// Comment lines after the last node, written back at the end.
  pub trailing_comments: Vec<String>,
}

impl Document {
  pub const fn new(root: Node) -> Self {
    Self {
      root,
      trailing_comments: Vec::new(),
    }
  }
}

#[cfg(test)]
mod tests;
