use super::registry::SchemaRegistry;
use crate::document::Node;

const ALL_OF_KEY: &str = "allOf";
const ALTERNATIVES_PROPERTY: &str = "alternatives";
const ALTERNATIVES_DESCRIPTION: &str = "An array of other possible matches";
const COMPOSITE_SUFFIX: &str = "WithAlternatives";

/// Components touched by [`rewrite_alternatives`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternativesRewrite {
  pub base_name: String,
  pub composite_name: String,
  pub created_base: bool,
  pub created_composite: bool,
}

/// Returns the shared object schema of an `allOf: [object, object-with-alternatives]`
/// composition, or `None` when `schema` has any other shape.
pub fn find_alternatives_base(schema: &Node) -> Option<&Node> {
  match schema.get(ALL_OF_KEY)?.as_sequence()? {
    [base, extension] if is_alternatives_composition(base, extension) => Some(base),
    _ => None,
  }
}

/// `Airport` becomes `AirportWithAlternatives`.
pub fn composite_name(base_name: &str) -> String {
  format!("{base_name}{COMPOSITE_SUFFIX}")
}

/// Recognizes an object `base` combined with an object `extension` whose
/// `properties.alternatives` is an array of objects.
pub fn is_alternatives_composition(base: &Node, extension: &Node) -> bool {
  if !base.is_mapping() || !extension.is_mapping() {
    return false;
  }
  if !has_type(base, "object") || !has_type(extension, "object") {
    return false;
  }

  let Some(alternatives) = extension
    .get("properties")
    .filter(|properties| properties.is_mapping())
    .and_then(|properties| properties.get(ALTERNATIVES_PROPERTY))
    .filter(|alternatives| alternatives.is_mapping())
  else {
    return false;
  };

  if !has_type(alternatives, "array") {
    return false;
  }

  alternatives
    .get("items")
    .is_some_and(|items| items.is_mapping() && has_type(items, "object"))
}

fn has_type(node: &Node, expected: &str) -> bool {
  node.get_str("type") == Some(expected)
}

/// Splits the idiom into `<base_name>` and `<base_name>WithAlternatives`
/// components and points `schema` at the composite.
///
/// Components that already exist under either name are left as they are, so a
/// second run over the same document adds nothing.
pub fn rewrite_alternatives(
  registry: &mut SchemaRegistry<'_>,
  schema: &mut Node,
  base: &Node,
  base_name: &str,
) -> AlternativesRewrite {
  let composite_name = composite_name(base_name);

  let created_base = !registry.contains(base_name);
  if created_base {
    registry.insert(base_name, base.clone());
  }

  let created_composite = !registry.contains(&composite_name);
  if created_composite {
    registry.insert(&composite_name, build_composite_schema(base_name));
  }

  schema.make_ref_only(&composite_name);

  AlternativesRewrite {
    base_name: base_name.to_string(),
    composite_name,
    created_base,
    created_composite,
  }
}

/// ```yaml
/// allOf:
/// - $ref: '#/components/schemas/<base_name>'
/// - type: object
///   properties:
///     alternatives:
///       type: array
///       description: An array of other possible matches
///       items:
///         $ref: '#/components/schemas/<base_name>'
/// ```
pub fn build_composite_schema(base_name: &str) -> Node {
  let alternatives = Node::mapping([
    ("type", Node::string("array")),
    ("description", Node::string(ALTERNATIVES_DESCRIPTION)),
    ("items", Node::schema_ref(base_name)),
  ]);

  let extension = Node::mapping([
    ("type", Node::string("object")),
    ("properties", Node::mapping([(ALTERNATIVES_PROPERTY, alternatives)])),
  ]);

  Node::mapping([(
    ALL_OF_KEY,
    Node::Sequence(vec![Node::schema_ref(base_name), extension]),
  )])
}
