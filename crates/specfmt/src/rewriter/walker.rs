use super::{
  alternatives::{composite_name, find_alternatives_base, rewrite_alternatives},
  naming::{derive_response_name, derive_schema_name},
  registry::{Componentized, SchemaRegistry},
  report::{RewriteEvent, RewriteReport},
};
use crate::{
  document::{Document, Node},
  error::StructureError,
};

const PATHS_KEY: &str = "paths";
const COMPONENTS_KEY: &str = "components";
const SCHEMAS_KEY: &str = "schemas";

const HTTP_METHODS: &[&str] = &["get", "post", "put", "delete", "patch", "options", "head"];

/// JSON media types that are rewritten, in lookup order. Only the first one
/// present on a response is considered.
const JSON_CONTENT_TYPES: &[&str] = &[
  "application/json; charset=UTF-8",
  "application/json",
  "application/json; charset=utf-8",
];

/// Moves every inline JSON response schema of `document` into
/// `components.schemas` and replaces it with a `$ref`.
///
/// `components` and `components.schemas` are created when missing. Fails when
/// the root is not a mapping or there is no `paths` mapping; the document must
/// then be discarded.
pub fn refactor_inline_response_schemas(document: &mut Document) -> Result<RewriteReport, StructureError> {
  let root = &mut document.root;
  if !root.is_mapping() {
    return Err(StructureError::ExpectedMapping);
  }
  if !root.get(PATHS_KEY).is_some_and(Node::is_mapping) {
    return Err(StructureError::MissingPaths);
  }

  root.ensure_mapping(COMPONENTS_KEY);
  let (paths, schemas) = split_sections(root).ok_or(StructureError::MissingPaths)?;

  let mut walker = DocumentWalker {
    registry: SchemaRegistry::new(schemas),
    report: RewriteReport::default(),
  };
  walker.walk_paths(paths);

  Ok(walker.report)
}

/// Borrows `paths` and `components.schemas` out of the root mapping at the same time.
fn split_sections(root: &mut Node) -> Option<(&mut Node, &mut Node)> {
  let Node::Mapping(entries) = root else {
    return None;
  };

  let mut paths = None;
  let mut components = None;
  for (key, value) in entries.iter_mut() {
    match key.as_str() {
      Some(PATHS_KEY) if paths.is_none() => paths = Some(value),
      Some(COMPONENTS_KEY) if components.is_none() => components = Some(value),
      _ => {}
    }
  }

  Some((paths?, components?.ensure_mapping(SCHEMAS_KEY)))
}

fn json_schema_mut(response: &mut Node) -> Option<&mut Node> {
  let content = response.get_mut("content").filter(|content| content.is_mapping())?;
  let content_type = JSON_CONTENT_TYPES
    .iter()
    .find(|content_type| content.contains_key(content_type))?;
  let media_type = content.get_mut(content_type).filter(|media_type| media_type.is_mapping())?;
  media_type.get_mut("schema").filter(|schema| schema.is_mapping())
}

/// Where a response schema lives, used for naming and narration.
struct ResponseSite<'s> {
  path: &'s str,
  method: &'s str,
  operation_id: &'s str,
  status: &'s str,
}

struct DocumentWalker<'a> {
  registry: SchemaRegistry<'a>,
  report: RewriteReport,
}

impl DocumentWalker<'_> {
  fn walk_paths(&mut self, paths: &mut Node) {
    let Node::Mapping(path_items) = paths else {
      return;
    };

    for (path_key, path_item) in path_items.iter_mut() {
      let path = path_key.as_str().unwrap_or_default();
      let Node::Mapping(operations) = path_item else {
        continue;
      };

      for (method_key, operation) in operations.iter_mut() {
        let Some(method) = method_key.as_str().filter(|method| HTTP_METHODS.contains(method)) else {
          continue;
        };
        if !operation.is_mapping() {
          continue;
        }
        self.walk_operation(path, method, operation);
      }
    }
  }

  fn walk_operation(&mut self, path: &str, method: &str, operation: &mut Node) {
    self.report.record_operation();

    let operation_id = operation.get_str("operationId").unwrap_or_default().to_string();
    let Some(Node::Mapping(responses)) = operation.get_mut("responses") else {
      return;
    };

    for (status_key, response) in responses.iter_mut() {
      let site = ResponseSite {
        path,
        method,
        operation_id: &operation_id,
        status: status_key.as_str().unwrap_or_default(),
      };
      if self.process_response(&site, response) {
        self.report.record_rewrite();
      }
    }
  }

  fn process_response(&mut self, site: &ResponseSite<'_>, response: &mut Node) -> bool {
    let Some(schema) = json_schema_mut(response) else {
      return false;
    };
    if schema.is_ref_only() {
      return false;
    }

    let alternatives_base = find_alternatives_base(schema).cloned();
    match alternatives_base {
      Some(base) => self.handle_alternatives(site, schema, &base),
      None => self.componentize(site, schema),
    }
  }

  fn componentize(&mut self, site: &ResponseSite<'_>, schema: &mut Node) -> bool {
    let name_hint = derive_response_name(site.path, site.method, site.operation_id, site.status);
    self.report.record_event(RewriteEvent::FoundInlineSchema {
      method: site.method.to_string(),
      path: site.path.to_string(),
      status: site.status.to_string(),
      name: name_hint.clone(),
    });

    match self.registry.componentize(schema, &name_hint) {
      Some(Componentized::Created(name)) => {
        self.report.record_created(&name);
        true
      }
      Some(Componentized::Reused(name)) => {
        self.report.record_reused(&name);
        true
      }
      None => false,
    }
  }

  fn handle_alternatives(&mut self, site: &ResponseSite<'_>, schema: &mut Node, base: &Node) -> bool {
    let base_name = derive_schema_name(site.operation_id);
    if base_name.is_empty() {
      return self.componentize(site, schema);
    }

    self.report.record_event(RewriteEvent::FoundAlternativesPattern {
      method: site.method.to_string(),
      path: site.path.to_string(),
      status: site.status.to_string(),
      base: base_name.clone(),
      composite: composite_name(&base_name),
    });

    let rewrite = rewrite_alternatives(&mut self.registry, schema, base, &base_name);
    if rewrite.created_base {
      self.report.record_created(&rewrite.base_name);
    }
    if rewrite.created_composite {
      self.report.record_created(&rewrite.composite_name);
    }
    self.report.record_alternatives();

    true
  }
}
