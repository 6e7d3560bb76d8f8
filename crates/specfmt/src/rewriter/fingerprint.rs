use std::{fmt, hash::Hash};

use crate::document::{MAP_TAG, Node, SEQ_TAG};

const SEQUENCE_KIND: u8 = 2;
const MAPPING_KIND: u8 = 4;
const SCALAR_KIND: u8 = 8;

/// Structural digest of a [`Node`].
///
/// Sensitive to node kind, tag, scalar text, child order and child count.
/// Two schemas that only differ in key order are different fingerprints.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
  pub fn of(node: &Node) -> Self {
    Self::of_optional(Some(node))
  }

  /// An absent node digests to a marker no present node can produce.
  pub fn of_optional(node: Option<&Node>) -> Self {
    let mut out = String::new();
    write_node(&mut out, node);
    Self(out)
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl Hash for Fingerprint {
  /// Feeds the BLAKE3 digest of the fingerprint text to the hasher.
  fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
    let hash = blake3::hash(self.0.as_bytes());
    hash.as_bytes().hash(state);
  }
}

impl fmt::Display for Fingerprint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

fn write_node(out: &mut String, node: Option<&Node>) {
  let Some(node) = node else {
    out.push_str("nil;");
    return;
  };

  match node {
    Node::Scalar(scalar) => write_header(out, SCALAR_KIND, &scalar.tag, &scalar.value),
    Node::Sequence(items) => {
      write_header(out, SEQUENCE_KIND, SEQ_TAG, "");
      write_children(out, items.iter());
    }
    Node::Mapping(entries) => {
      write_header(out, MAPPING_KIND, MAP_TAG, "");
      write_children(out, entries.iter().flat_map(|(key, value)| [key, value]));
    }
  }
}

fn write_header(out: &mut String, kind: u8, tag: &str, value: &str) {
  out.push_str(&format!("K:{kind};T:{tag};V:{value:?};"));
}

fn write_children<'a>(out: &mut String, children: impl Iterator<Item = &'a Node>) {
  let mut children = children.peekable();
  if children.peek().is_none() {
    return;
  }

  out.push('[');
  for child in children {
    write_node(out, Some(child));
    out.push('|');
  }
  out.push(']');
}
