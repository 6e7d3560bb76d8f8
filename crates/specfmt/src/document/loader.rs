use std::path::{Path, PathBuf};

use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};

use super::{Document, builder::TreeBuilder, emitter::Emitter};
use crate::error::FormatError;

pub struct SpecLoader {
  file: AsyncMmapFile,
}

impl SpecLoader {
  pub async fn open(path: &Path) -> Result<Self, FormatError> {
    let file = AsyncMmapFile::open(path).await.map_err(|source| FormatError::Read {
      path: PathBuf::from(path),
      source,
    })?;

    Ok(Self { file })
  }

  pub fn parse(&self) -> Result<Document, FormatError> {
    let source = std::str::from_utf8(self.file.as_slice()).map_err(FormatError::NotUtf8)?;
    parse_yaml(source)
  }
}

/// Parses YAML (or JSON) text into a [`Document`].
///
/// Only the first document of a multi-document stream is read.
pub fn parse_yaml(input: &str) -> Result<Document, FormatError> {
  TreeBuilder::new(input).build().map_err(FormatError::Decode)
}

/// Serializes a [`Document`] as block-style YAML, keeping mapping order,
/// scalar text, quoting and comments.
pub fn emit_yaml(document: &Document) -> Result<String, FormatError> {
  let mut emitter = Emitter::new(String::new());
  emitter.document(document).map_err(FormatError::Encode)?;
  Ok(emitter.into_inner())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::document::{Node, ScalarStyle};

  fn round_trip(input: &str) -> String {
    emit_yaml(&parse_yaml(input).unwrap()).unwrap()
  }

  fn scalar<'d>(document: &'d Document, key: &str) -> &'d crate::document::Scalar {
    match document.root.get(key) {
      Some(Node::Scalar(scalar)) => scalar,
      other => panic!("expected scalar for {key}, got {other:?}"),
    }
  }

  #[test]
  fn test_parse_keeps_mapping_order() {
    let document = parse_yaml("zeta: 1\nalpha: 2\nmiddle: 3\n").unwrap();
    let keys: Vec<_> = document.root.entries().iter().filter_map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, ["zeta", "alpha", "middle"]);
  }

  #[test]
  fn test_parse_tags_scalars() {
    let document = parse_yaml("a: text\nb: 200\nc: 1.5\nd: true\ne: ~\nf: '200'\ng:\nh: 0x1F\n").unwrap();
    let cases = [
      ("a", "!!str"),
      ("b", "!!int"),
      ("c", "!!float"),
      ("d", "!!bool"),
      ("e", "!!null"),
      ("f", "!!str"),
      ("g", "!!null"),
      ("h", "!!int"),
    ];
    for (key, tag) in cases {
      assert_eq!(scalar(&document, key).tag, tag, "tag of {key}");
    }
    assert_eq!(document.root.get_str("f"), Some("200"));
    assert_eq!(document.root.get_str("g"), Some(""));
  }

  #[test]
  fn test_parse_records_quoting_style() {
    let document = parse_yaml("a: plain\nb: 'single'\nc: \"double\"\nd: |\n  literal\ne: >\n  folded\n").unwrap();
    let cases = [
      ("a", ScalarStyle::Plain),
      ("b", ScalarStyle::SingleQuoted),
      ("c", ScalarStyle::DoubleQuoted),
      ("d", ScalarStyle::Literal),
      ("e", ScalarStyle::Folded),
    ];
    for (key, style) in cases {
      assert_eq!(scalar(&document, key).style, style, "style of {key}");
    }
    assert_eq!(document.root.get_str("d"), Some("literal\n"));
  }

  #[test]
  fn test_scalar_text_is_written_back_verbatim() {
    let input = "\
info:
  version: 1.10
x: 0x1F
y: 1e3
w: 007
count: 3
ratio: 0.5
enabled: false
nothing: null
tilde: ~
empty:
code: '404'
name: pet
";
    assert_eq!(round_trip(input), input);
  }

  #[test]
  fn test_comment_closing_a_nested_block_moves_to_the_next_key() {
    assert_eq!(
      round_trip("info:\n  version: 1.10\n  # keep me\nx: 0x1F\ny: 1e3\nw: 007\n"),
      "info:\n  version: 1.10\n# keep me\nx: 0x1F\ny: 1e3\nw: 007\n"
    );
  }

  #[test]
  fn test_quoted_strings_stay_quoted() {
    let input = "a: 'on'\nb: 'yes'\nc: \"no\"\nd: 'it''s'\ne: \"tab\\there\"\n";
    assert_eq!(round_trip(input), input);
  }

  #[test]
  fn test_wide_integer_is_kept_as_text() {
    let input = "minimum: -12345678901234567890123\nmaximum: 12345678901234567890123\n";
    let document = parse_yaml(input).unwrap();
    assert_eq!(scalar(&document, "maximum").tag, "!!int");
    assert_eq!(document.root.get_str("maximum"), Some("12345678901234567890123"));
    assert_eq!(emit_yaml(&document).unwrap(), input);
  }

  #[test]
  fn test_comments_are_written_back() {
    let input = "\
# leading
openapi: 3.0.0 # version
info:
  # about the api
  title: Pets
  version: 1.0.0
paths: # none yet
  /pets:
    get:
      tags:
        # first tag
        - pets
        - animals # second
# trailing
";
    assert_eq!(round_trip(input), input);
  }

  #[test]
  fn test_comments_after_quoted_and_flow_values() {
    let input = "\
a: 'on' # quoted
b: \"x # not a comment\" # real
c: [x, y] # list
d: 'it''s' # apostrophe
";
    assert_eq!(
      round_trip(input),
      "\
a: 'on' # quoted
b: \"x # not a comment\" # real
c: # list
  - x
  - y
d: 'it''s' # apostrophe
"
    );
  }

  #[test]
  fn test_emit_nested_structures() {
    let input = "\
paths:
  /pets:
    get:
      tags:
        - pets
      parameters:
        - name: limit
          in: query
        - - nested
          - list
      responses: {}
      security: []
";
    assert_eq!(round_trip(input), input);
  }

  #[test]
  fn test_flow_collections_are_written_as_blocks() {
    assert_eq!(
      round_trip("tags: [pets, animals]\nmeta: {a: 1}\n"),
      "tags:\n  - pets\n  - animals\nmeta:\n  a: 1\n"
    );
  }

  #[test]
  fn test_block_scalars_round_trip() {
    let input = "\
literal: |
  line one
    indented
  line three
strip: |-
  no newline
keep: |+
  kept

folded: >
  first paragraph

  second paragraph
";
    let document = parse_yaml(input).unwrap();
    assert_eq!(document.root.get_str("literal"), Some("line one\n  indented\nline three\n"));
    assert_eq!(document.root.get_str("keep"), Some("kept\n\n"));
    assert_eq!(document.root.get_str("folded"), Some("first paragraph\nsecond paragraph\n"));
    assert_eq!(round_trip(input), input);
  }

  #[test]
  fn test_folded_lines_are_joined() {
    let output = round_trip("description: >\n  a long\n  sentence\n");
    assert_eq!(output, "description: >\n  a long sentence\n");
    assert_eq!(
      parse_yaml(&output).unwrap().root.get_str("description"),
      Some("a long sentence\n")
    );
  }

  #[test]
  fn test_in_memory_strings_are_quoted_when_needed() {
    let mut document = parse_yaml("a: 1\n").unwrap();
    for (key, value) in [
      ("ref", "#/components/schemas/Pet"),
      ("status", "200"),
      ("flag", "on"),
      ("word", "true"),
      ("text", "An array of other possible matches"),
      ("colon", "a: b"),
      ("multi", "one\ntwo"),
    ] {
      document.root.push_entry(key, Node::string(value));
    }

    assert_eq!(
      emit_yaml(&document).unwrap(),
      "\
a: 1
ref: '#/components/schemas/Pet'
status: '200'
flag: on
word: 'true'
text: An array of other possible matches
colon: 'a: b'
multi: \"one\\ntwo\"
"
    );
  }

  #[test]
  fn test_duplicate_keys_are_kept() {
    let document = parse_yaml("a: 1\na: 2\n").unwrap();
    assert_eq!(document.root.entries().len(), 2);
    assert_eq!(document.root.get_str("a"), Some("1"));
    assert_eq!(emit_yaml(&document).unwrap(), "a: 1\na: 2\n");
  }

  #[test]
  fn test_json_input_is_accepted() {
    let document = parse_yaml(r#"{"openapi": "3.0.0", "paths": {}}"#).unwrap();
    assert_eq!(document.root.get_str("openapi"), Some("3.0.0"));
    assert!(document.root.get("paths").is_some_and(Node::is_mapping));
    assert_eq!(emit_yaml(&document).unwrap(), "\"openapi\": \"3.0.0\"\n\"paths\": {}\n");
  }

  #[test]
  fn test_scalar_tags_survive() {
    let input = "value: !custom hello\nblob: !!binary aGVsbG8=\nforced: !!str 123\n";
    let document = parse_yaml(input).unwrap();
    assert_eq!(scalar(&document, "value").tag, "!custom");
    assert_eq!(scalar(&document, "blob").tag, "!!binary");
    assert_eq!(scalar(&document, "forced").tag, "!!str");
    assert_eq!(emit_yaml(&document).unwrap(), input);
  }

  #[test]
  fn test_collection_tags_are_dropped() {
    assert_eq!(round_trip("a: !!set {x: null}\n"), "a:\n  x: null\n");
    assert_eq!(round_trip("b: !pairs\n  - one\n"), "b:\n  - one\n");
  }

  #[test]
  fn test_aliases_are_expanded() {
    assert_eq!(
      round_trip("base: &base\n  type: object\ncopy: *base\n"),
      "base:\n  type: object\ncopy:\n  type: object\n"
    );
  }

  #[test]
  fn test_only_first_document_is_read() {
    let document = parse_yaml("---\na: 1\n---\nb: 2\n").unwrap();
    assert_eq!(document.root.entries().len(), 1);
    assert_eq!(document.root.get_str("a"), Some("1"));
  }

  #[test]
  fn test_malformed_yaml_is_decode_error() {
    let err = parse_yaml("paths: [unclosed\n").unwrap_err();
    assert!(matches!(err, FormatError::Decode(_)));
    assert!(err.to_string().starts_with("decode YAML:"));
  }
}
