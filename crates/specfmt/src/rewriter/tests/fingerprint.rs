use std::collections::HashSet;

use super::support::node;
use crate::{document::Node, rewriter::Fingerprint};

#[test]
fn test_scalar_fingerprint_format() {
  let fingerprint = Fingerprint::of(&Node::string("object"));
  assert_eq!(fingerprint.as_str(), r#"K:8;T:!!str;V:"object";"#);
}

#[test]
fn test_mapping_fingerprint_format() {
  let fingerprint = Fingerprint::of(&node("type: object\n"));
  assert_eq!(
    fingerprint.as_str(),
    r#"K:4;T:!!map;V:"";[K:8;T:!!str;V:"type";|K:8;T:!!str;V:"object";|]"#
  );
}

#[test]
fn test_empty_containers_have_no_child_brackets() {
  assert_eq!(Fingerprint::of(&Node::empty_mapping()).as_str(), r#"K:4;T:!!map;V:"";"#);
  assert_eq!(Fingerprint::of(&Node::Sequence(vec![])).as_str(), r#"K:2;T:!!seq;V:"";"#);
}

#[test]
fn test_missing_node_marker() {
  assert_eq!(Fingerprint::of_optional(None).as_str(), "nil;");
  assert_ne!(Fingerprint::of_optional(None), Fingerprint::of(&Node::string("")));
}

#[test]
fn test_scalar_values_are_quoted() {
  let plain = Fingerprint::of(&Node::string("a|b"));
  let escaped = Fingerprint::of(&Node::string("say \"hi\""));
  assert_eq!(plain.as_str(), r#"K:8;T:!!str;V:"a|b";"#);
  assert_eq!(escaped.as_str(), r#"K:8;T:!!str;V:"say \"hi\"";"#);
}

#[test]
fn test_identical_structures_match() {
  let first = node("type: object\nproperties:\n  id:\n    type: integer\n");
  let second = node("type: object\nproperties:\n  id:\n    type: integer\n");
  assert_eq!(Fingerprint::of(&first), Fingerprint::of(&second));
}

#[test]
fn test_key_order_matters() {
  let first = node("type: object\ndescription: a pet\n");
  let second = node("description: a pet\ntype: object\n");
  assert_ne!(Fingerprint::of(&first), Fingerprint::of(&second));
}

#[test]
fn test_scalar_tag_matters() {
  let quoted = node("maximum: '10'\n");
  let integer = node("maximum: 10\n");
  assert_ne!(Fingerprint::of(&quoted), Fingerprint::of(&integer));
}

#[test]
fn test_sequence_order_and_length_matter() {
  let ab = node("required: [a, b]\n");
  let ba = node("required: [b, a]\n");
  let abc = node("required: [a, b, c]\n");
  assert_ne!(Fingerprint::of(&ab), Fingerprint::of(&ba));
  assert_ne!(Fingerprint::of(&ab), Fingerprint::of(&abc));
}

#[test]
fn test_ref_and_inline_are_different() {
  let reference = node("$ref: '#/components/schemas/Pet'\n");
  let inline = node("type: object\n");
  assert_ne!(Fingerprint::of(&reference), Fingerprint::of(&inline));
}

#[test]
fn test_kind_matters() {
  let scalar = node("items: x\n");
  let sequence = node("items: [x]\n");
  assert_ne!(Fingerprint::of(&scalar), Fingerprint::of(&sequence));
}

#[test]
fn test_hash_agrees_with_equality() {
  let fingerprints: HashSet<Fingerprint> = ["type: object\n", "type: object\n", "type: array\n"]
    .into_iter()
    .map(|input| Fingerprint::of(&node(input)))
    .collect();
  assert_eq!(fingerprints.len(), 2);
}

#[test]
fn test_quoting_and_comments_do_not_matter() {
  let plain = node("type: object # pet\n");
  let quoted = node("# shape\ntype: \"object\"\n");
  assert_eq!(Fingerprint::of(&plain), Fingerprint::of(&quoted));
}
