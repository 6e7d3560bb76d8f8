use crate::document::{Node, Scalar, ScalarStyle, parse_yaml, resolve_plain};

#[test]
fn test_resolve_plain_follows_core_schema() {
  let cases = [
    ("", "!!null"),
    ("~", "!!null"),
    ("Null", "!!null"),
    ("TRUE", "!!bool"),
    ("false", "!!bool"),
    ("on", "!!str"),
    ("yes", "!!str"),
    ("42", "!!int"),
    ("-7", "!!int"),
    ("+7", "!!int"),
    ("0x1F", "!!int"),
    ("0o17", "!!int"),
    ("007", "!!int"),
    ("12345678901234567890123", "!!int"),
    ("0x", "!!str"),
    ("0o8", "!!str"),
    ("1.10", "!!float"),
    ("1e3", "!!float"),
    (".5", "!!float"),
    ("5.", "!!float"),
    ("-2.5E-3", "!!float"),
    (".inf", "!!float"),
    ("-.Inf", "!!float"),
    (".NaN", "!!float"),
    ("1e", "!!str"),
    (".", "!!str"),
    ("1.2.3", "!!str"),
    ("object", "!!str"),
  ];
  for (input, expected) in cases {
    assert_eq!(resolve_plain(input), expected, "failed for input {input:?}");
  }
}

#[test]
fn test_explicit_tag_only_when_text_resolves_differently() {
  let integer = Scalar::new("!!int", "10", ScalarStyle::Plain);
  assert!(!integer.needs_explicit_tag(true));
  assert!(integer.needs_explicit_tag(false));

  let text = Scalar::new("!!str", "10", ScalarStyle::SingleQuoted);
  assert!(text.needs_explicit_tag(true));
  assert!(!text.needs_explicit_tag(false));

  assert!(Scalar::new("!!binary", "aGVsbG8=", ScalarStyle::Plain).needs_explicit_tag(true));
}

#[test]
fn test_equality_ignores_presentation() {
  let parsed = parse_yaml("# pet\nname: 'Rex' # good boy\n").unwrap().root;
  assert_eq!(parsed, Node::mapping([("name", Node::string("Rex"))]));
  assert_ne!(
    Scalar::new("!!int", "10", ScalarStyle::Plain),
    Scalar::new("!!str", "10", ScalarStyle::Plain)
  );
}
