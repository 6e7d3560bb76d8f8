use std::fmt::{self, Write};

use super::{Document, NULL_TAG, Node, STR_TAG, Scalar, ScalarStyle, resolve_plain};

const INDENT: usize = 2;

/// Characters that cannot start a plain scalar.
const INDICATORS: &str = "-?:,[]{}#&*!|>'\"%@`";

/// Writes a [`Document`] as block-style YAML with two-space indentation.
///
/// Scalars parsed from a file are written back with their original text and
/// quoting. Scalars created in memory are written plain when that reads back
/// as the same value, quoted otherwise.
pub(super) struct Emitter<W> {
  out: W,
}

impl<W: Write> Emitter<W> {
  pub(super) const fn new(out: W) -> Self {
    Self { out }
  }

  pub(super) fn into_inner(self) -> W {
    self.out
  }

  pub(super) fn document(&mut self, document: &Document) -> fmt::Result {
    match &document.root {
      Node::Mapping(entries) if !entries.is_empty() => self.mapping(entries, 0, false)?,
      Node::Sequence(items) if !items.is_empty() => self.sequence(items, 0, false)?,
      Node::Mapping(_) => self.out.write_str("{}\n")?,
      Node::Sequence(_) => self.out.write_str("[]\n")?,
      Node::Scalar(scalar) => {
        self.head_comments(&scalar.comments.head, 0)?;
        self.out.write_str(&render_inline(scalar))?;
        self.line_comment(scalar.comments.line.as_deref())?;
      }
    }
    self.head_comments(&document.trailing_comments, 0)
  }

  /// Entries of a block mapping at column `indent`. With `first_inline` the
  /// first entry continues the current line, after a `- `.
  fn mapping(&mut self, entries: &[(Node, Node)], indent: usize, first_inline: bool) -> fmt::Result {
    for (index, (key, value)) in entries.iter().enumerate() {
      if index > 0 || !first_inline {
        if let Node::Scalar(key) = key {
          self.head_comments(&key.comments.head, indent)?;
        }
        self.indent(indent)?;
      }
      self.entry(key, value, indent)?;
    }
    Ok(())
  }

  fn entry(&mut self, key: &Node, value: &Node, indent: usize) -> fmt::Result {
    if let Node::Scalar(key) = key {
      self.out.write_str(&render_inline(key))?;
      self.out.write_char(':')?;
      return self.after_indicator(value, indent, key.comments.line.as_deref());
    }

    self.out.write_char('?')?;
    self.after_indicator(key, indent, None)?;
    self.indent(indent)?;
    self.out.write_char(':')?;
    self.after_indicator(value, indent, None)
  }

  fn sequence(&mut self, items: &[Node], indent: usize, first_inline: bool) -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
      if index > 0 || !first_inline {
        self.head_comments(leading_comments(item), indent)?;
        self.indent(indent)?;
      }
      self.out.write_char('-')?;
      match item {
        Node::Mapping(entries) if !entries.is_empty() => {
          self.out.write_char(' ')?;
          self.mapping(entries, indent + INDENT, true)?;
        }
        Node::Sequence(items) if !items.is_empty() => {
          self.out.write_char(' ')?;
          self.sequence(items, indent + INDENT, true)?;
        }
        _ => self.after_indicator(item, indent, None)?,
      }
    }
    Ok(())
  }

  /// Writes `node` after a `key:`, `?` or `-` written at column `indent`.
  /// `comment` is a trailing comment carried by the key.
  fn after_indicator(&mut self, node: &Node, indent: usize, comment: Option<&str>) -> fmt::Result {
    match node {
      Node::Scalar(scalar) => self.scalar_value(scalar, indent + INDENT, comment),
      Node::Mapping(entries) if entries.is_empty() => {
        self.out.write_str(" {}")?;
        self.line_comment(comment)
      }
      Node::Sequence(items) if items.is_empty() => {
        self.out.write_str(" []")?;
        self.line_comment(comment)
      }
      Node::Mapping(entries) => {
        self.line_comment(comment)?;
        self.mapping(entries, indent + INDENT, false)
      }
      Node::Sequence(items) => {
        self.line_comment(comment)?;
        self.sequence(items, indent + INDENT, false)
      }
    }
  }

  fn scalar_value(&mut self, scalar: &Scalar, block_indent: usize, key_comment: Option<&str>) -> fmt::Result {
    let comment = scalar.comments.line.as_deref().or(key_comment);

    if let Some(block) = BlockScalar::of(scalar) {
      self.out.write_char(' ')?;
      if scalar.tag != STR_TAG {
        write!(self.out, "{} ", scalar.tag)?;
      }
      self.out.write_str(&block.header())?;
      self.line_comment(comment)?;
      return self.block_lines(&block.lines, block_indent);
    }

    let text = render_inline(scalar);
    if !text.is_empty() {
      self.out.write_char(' ')?;
      self.out.write_str(&text)?;
    }
    self.line_comment(comment)
  }

  fn block_lines(&mut self, lines: &[&str], indent: usize) -> fmt::Result {
    for line in lines {
      if !line.is_empty() {
        self.indent(indent)?;
        self.out.write_str(line)?;
      }
      self.out.write_char('\n')?;
    }
    Ok(())
  }

  /// Ends the current line, with `comment` when there is one.
  fn line_comment(&mut self, comment: Option<&str>) -> fmt::Result {
    if let Some(comment) = comment {
      write!(self.out, " {comment}")?;
    }
    self.out.write_char('\n')
  }

  fn head_comments(&mut self, comments: &[String], indent: usize) -> fmt::Result {
    for comment in comments {
      self.indent(indent)?;
      self.out.write_str(comment)?;
      self.out.write_char('\n')?;
    }
    Ok(())
  }

  fn indent(&mut self, indent: usize) -> fmt::Result {
    write!(self.out, "{:indent$}", "")
  }
}

/// Comments written above an item; for collections, those of their first key
/// or item, which is written on the same line as the `-`.
fn leading_comments(node: &Node) -> &[String] {
  match node {
    Node::Scalar(scalar) => &scalar.comments.head,
    Node::Mapping(entries) => match entries.first() {
      Some((Node::Scalar(key), _)) => &key.comments.head,
      _ => &[],
    },
    Node::Sequence(items) => match items.first() {
      Some(item) => leading_comments(item),
      None => &[],
    },
  }
}

/// A `|` or `>` scalar split into its content lines.
struct BlockScalar<'a> {
  folded: bool,
  chomping: &'static str,
  indentation_indicator: bool,
  lines: Vec<&'a str>,
}

impl<'a> BlockScalar<'a> {
  /// `None` when the scalar is not block styled or its text cannot be written
  /// as a block.
  fn of(scalar: &'a Scalar) -> Option<Self> {
    if !matches!(scalar.style, ScalarStyle::Literal | ScalarStyle::Folded) {
      return None;
    }

    let content = scalar.value.trim_end_matches('\n');
    if content.is_empty() || content.chars().any(|c| c.is_control() && c != '\n' && c != '\t') {
      return None;
    }

    let chomping = match scalar.value.len() - content.len() {
      0 => "-",
      1 => "",
      _ => "+",
    };
    let segments: Vec<&str> = content.split('\n').collect();
    let mut lines = Vec::new();

    let folded = scalar.style == ScalarStyle::Folded && is_foldable(&segments);
    if folded {
      // A single line break folds into a space, so every break in the text
      // is written as an empty line.
      for (index, segment) in segments.iter().enumerate() {
        lines.push(*segment);
        if !segment.is_empty() && index + 1 < segments.len() {
          lines.push("");
        }
      }
    } else {
      lines.extend(segments.iter().copied());
    }

    let kept_breaks = (scalar.value.len() - content.len()).saturating_sub(1);
    lines.extend(std::iter::repeat_n("", kept_breaks));

    let indentation_indicator = content
      .split('\n')
      .find(|line| !line.is_empty())
      .is_some_and(|line| line.starts_with([' ', '\t']));

    Some(Self {
      folded,
      chomping,
      indentation_indicator,
      lines,
    })
  }

  fn header(&self) -> String {
    let style = if self.folded { '>' } else { '|' };
    let indicator = if self.indentation_indicator { INDENT.to_string() } else { String::new() };
    format!("{style}{indicator}{}", self.chomping)
  }
}

fn is_foldable(segments: &[&str]) -> bool {
  segments.first().is_some_and(|first| !first.is_empty())
    && segments
      .iter()
      .all(|segment| segment.trim_matches([' ', '\t']).len() == segment.len())
}

/// Single-line rendering of a scalar, tag included when it cannot be inferred.
fn render_inline(scalar: &Scalar) -> String {
  let style = inline_style(scalar);
  let text = match style {
    ScalarStyle::Plain => scalar.value.clone(),
    ScalarStyle::SingleQuoted => format!("'{}'", scalar.value.replace('\'', "''")),
    _ => double_quoted(&scalar.value),
  };

  if scalar.needs_explicit_tag(style == ScalarStyle::Plain) {
    if text.is_empty() {
      scalar.tag.clone()
    } else {
      format!("{} {text}", scalar.tag)
    }
  } else {
    text
  }
}

fn inline_style(scalar: &Scalar) -> ScalarStyle {
  let value = &scalar.value;
  match scalar.style {
    ScalarStyle::Plain if !value.contains('\n') => ScalarStyle::Plain,
    ScalarStyle::SingleQuoted if is_single_quotable(value) => ScalarStyle::SingleQuoted,
    ScalarStyle::Auto if value.is_empty() && scalar.tag == NULL_TAG => ScalarStyle::Plain,
    ScalarStyle::Auto if is_plain_safe(value) && (scalar.tag != STR_TAG || resolve_plain(value) == STR_TAG) => {
      ScalarStyle::Plain
    }
    ScalarStyle::Auto if is_single_quotable(value) => ScalarStyle::SingleQuoted,
    _ => ScalarStyle::DoubleQuoted,
  }
}

fn is_plain_safe(value: &str) -> bool {
  let mut chars = value.chars();
  let Some(first) = chars.next() else {
    return false;
  };

  if INDICATORS.contains(first) {
    let continues = matches!(first, '-' | '?' | ':') && chars.next().is_some_and(|next| !next.is_whitespace());
    if !continues {
      return false;
    }
  }

  !value.starts_with(char::is_whitespace)
    && !value.ends_with(char::is_whitespace)
    && !value.ends_with(':')
    && !value.contains(": ")
    && !value.contains(" #")
    && !value.chars().any(char::is_control)
}

fn is_single_quotable(value: &str) -> bool {
  !value.chars().any(char::is_control)
}

fn double_quoted(value: &str) -> String {
  let mut out = String::with_capacity(value.len() + 2);
  out.push('"');
  for c in value.chars() {
    match c {
      '"' => out.push_str("\\\""),
      '\\' => out.push_str("\\\\"),
      '\n' => out.push_str("\\n"),
      '\t' => out.push_str("\\t"),
      '\r' => out.push_str("\\r"),
      '\0' => out.push_str("\\0"),
      c if c.is_control() => out.push_str(&format!("\\u{:04X}", u32::from(c))),
      c => out.push(c),
    }
  }
  out.push('"');
  out
}
