use std::collections::{BTreeSet, HashMap};

use super::fingerprint::Fingerprint;
use crate::document::Node;

const DEFAULT_NAME_HINT: &str = "InlineSchema";

/// What [`SchemaRegistry::componentize`] did with a use site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Componentized {
  /// A new entry was added to `components.schemas`.
  Created(String),
  /// A structurally identical schema was already registered under this name.
  Reused(String),
}

impl Componentized {
  pub fn name(&self) -> &str {
    match self {
      Self::Created(name) | Self::Reused(name) => name,
    }
  }
}

/// Name-keyed index over the `components.schemas` mapping of one document.
///
/// The registry is the only writer to that mapping during a run. Every name it
/// tracks is physically present in the mapping; entries are only ever
/// appended.
#[derive(Debug)]
pub struct SchemaRegistry<'a> {
  schemas: &'a mut Node,
  by_fingerprint: HashMap<Fingerprint, String>,
  existing_names: BTreeSet<String>,
}

impl<'a> SchemaRegistry<'a> {
  /// Seeds the registry from the entries already present in `schemas`.
  ///
  /// When several existing schemas share a fingerprint the last one wins.
  pub fn new(schemas: &'a mut Node) -> Self {
    let mut by_fingerprint = HashMap::new();
    let mut existing_names = BTreeSet::new();

    for (key, schema) in schemas.entries() {
      let Some(name) = key.as_str() else {
        continue;
      };
      existing_names.insert(name.to_string());
      by_fingerprint.insert(Fingerprint::of(schema), name.to_string());
    }

    Self {
      schemas,
      by_fingerprint,
      existing_names,
    }
  }

  /// Moves an inline schema into `components.schemas` and rewrites the use
  /// site into a `$ref`.
  ///
  /// Returns `None` without touching anything when `schema` is not a mapping
  /// or is already reference-only.
  pub fn componentize(&mut self, schema: &mut Node, name_hint: &str) -> Option<Componentized> {
    if !schema.is_mapping() || schema.is_ref_only() {
      return None;
    }

    let fingerprint = Fingerprint::of(schema);

    if let Some(existing) = self.by_fingerprint.get(&fingerprint) {
      let existing = existing.clone();
      schema.make_ref_only(&existing);
      return Some(Componentized::Reused(existing));
    }

    let candidate = if name_hint.is_empty() { DEFAULT_NAME_HINT } else { name_hint };
    let name = self.ensure_unique_name(candidate, &fingerprint);

    if self.contains(&name) {
      // The entry under `name` already holds this exact schema.
      self.by_fingerprint.insert(fingerprint, name.clone());
      schema.make_ref_only(&name);
      return Some(Componentized::Reused(name));
    }

    // Replace the use site first and keep the original content for the component.
    let content = std::mem::replace(schema, Node::schema_ref(&name));
    self.insert_with_fingerprint(name.clone(), content, fingerprint);

    Some(Componentized::Created(name))
  }

  /// Whether an entry named `name` is present in `components.schemas`.
  pub fn contains(&self, name: &str) -> bool {
    self.schemas.contains_key(name)
  }

  /// Appends `schema` under `name` and registers both name and fingerprint.
  ///
  /// The caller is responsible for `name` not being taken yet.
  pub fn insert(&mut self, name: &str, schema: Node) {
    let fingerprint = Fingerprint::of(&schema);
    self.insert_with_fingerprint(name.to_string(), schema, fingerprint);
  }

  fn insert_with_fingerprint(&mut self, name: String, schema: Node, fingerprint: Fingerprint) {
    self.schemas.push_entry(name.clone(), schema);
    self.existing_names.insert(name.clone());
    self.by_fingerprint.insert(fingerprint, name);
  }

  /// Picks `base` when it is free, or already holds this exact schema, and
  /// otherwise the first free `base2`, `base3`, ...
  fn ensure_unique_name(&self, base: &str, fingerprint: &Fingerprint) -> String {
    if Fingerprint::of_optional(self.schemas.get(base)) == *fingerprint {
      return base.to_string();
    }

    if !self.existing_names.contains(base) {
      return base.to_string();
    }

    let mut suffix = 2;
    loop {
      let name = format!("{base}{suffix}");
      if !self.existing_names.contains(&name) {
        return name;
      }
      suffix += 1;
    }
  }
}
