use std::collections::HashMap;

use saphyr_parser::{Event, Parser, ScalarStyle as EventStyle, ScanError, Span, Tag};

use super::{Document, NULL_TAG, Node, STR_TAG, Scalar, ScalarStyle, resolve_plain};

const CORE_SCHEMA_HANDLE: &str = "tag:yaml.org,2002:";

enum Frame {
  Sequence { items: Vec<Node>, anchor: usize },
  Mapping { entries: Vec<(Node, Node)>, key: Option<Node>, anchor: usize },
}

/// Builds a [`Node`] tree from parser events, keeping scalar text, quoting
/// style, explicit tags and comments.
///
/// Only the first document of a stream is read. Aliases are expanded into
/// copies of the anchored node.
pub(super) struct TreeBuilder<'s> {
  source: &'s str,
  lines: Vec<&'s str>,
  stack: Vec<Frame>,
  anchors: HashMap<usize, Node>,
  root: Option<Node>,
  /// Last source line whose content has been consumed by an event.
  consumed_line: usize,
  pending_comments: Vec<String>,
}

impl<'s> TreeBuilder<'s> {
  pub(super) fn new(source: &'s str) -> Self {
    Self {
      source,
      lines: source.lines().collect(),
      stack: Vec::new(),
      anchors: HashMap::new(),
      root: None,
      consumed_line: 0,
      pending_comments: Vec::new(),
    }
  }

  pub(super) fn build(mut self) -> Result<Document, ScanError> {
    for event in Parser::new_from_str(self.source) {
      let (event, span) = event?;
      match event {
        Event::Scalar(value, style, anchor, tag) => self.scalar(&value, style, anchor, tag.as_deref(), span),
        Event::SequenceStart(anchor, _) => {
          self.collect_comments(span.start.line());
          self.stack.push(Frame::Sequence {
            items: Vec::new(),
            anchor,
          });
        }
        Event::MappingStart(anchor, _) => {
          self.collect_comments(span.start.line());
          self.stack.push(Frame::Mapping {
            entries: Vec::new(),
            key: None,
            anchor,
          });
        }
        Event::SequenceEnd | Event::MappingEnd => self.end_collection(span),
        Event::Alias(id) => {
          let node = self
            .anchors
            .get(&id)
            .cloned()
            .ok_or_else(|| ScanError::new_str(span.start, "alias refers to a node that is not complete"))?;
          self.consumed_line = self.consumed_line.max(span.end.line());
          self.push(node);
        }
        Event::DocumentEnd if self.root.is_some() => break,
        _ => {}
      }
    }

    let mut trailing_comments = std::mem::take(&mut self.pending_comments);
    trailing_comments.extend(self.comment_lines(self.consumed_line + 1, self.lines.len() + 1));

    let root = self
      .root
      .unwrap_or_else(|| Node::Scalar(Scalar::new(NULL_TAG, "", ScalarStyle::Plain)));
    Ok(Document { root, trailing_comments })
  }

  fn scalar(&mut self, text: &str, style: EventStyle, anchor: usize, tag: Option<&Tag>, span: Span) {
    self.collect_comments(span.start.line());

    let empty = span.start.index() == span.end.index();
    // Empty values (`key:`) come through as `~` with an empty span.
    let value = if empty && style == EventStyle::Plain && text == "~" { "" } else { text };
    let style = match style {
      EventStyle::Plain => ScalarStyle::Plain,
      EventStyle::SingleQuoted => ScalarStyle::SingleQuoted,
      EventStyle::DoubleQuoted => ScalarStyle::DoubleQuoted,
      EventStyle::Literal => ScalarStyle::Literal,
      EventStyle::Folded => ScalarStyle::Folded,
    };
    let tag = match tag {
      Some(tag) => tag_text(tag),
      None if style == ScalarStyle::Plain => resolve_plain(value).to_string(),
      None => STR_TAG.to_string(),
    };

    let mut scalar = Scalar::new(tag, value, style);
    if self.takes_head_comments() {
      scalar.comments.head = std::mem::take(&mut self.pending_comments);
    }
    if !empty {
      let end = match style {
        ScalarStyle::SingleQuoted => self.closing_quote(span, '\''),
        ScalarStyle::DoubleQuoted => self.closing_quote(span, '"'),
        ScalarStyle::Literal | ScalarStyle::Folded => None,
        _ => Some((span.end.line(), span.end.col())),
      };
      scalar.comments.line = end.and_then(|(line, col)| self.comment_after(line, col));
    }
    self.consume(span);

    let node = Node::Scalar(scalar);
    if anchor != 0 {
      self.anchors.insert(anchor, node.clone());
    }
    self.push(node);
  }

  fn end_collection(&mut self, span: Span) {
    let (node, anchor) = match self.stack.pop() {
      Some(Frame::Sequence { items, anchor }) => (Node::Sequence(items), anchor),
      Some(Frame::Mapping { entries, anchor, .. }) => (Node::Mapping(entries), anchor),
      None => return,
    };
    if anchor != 0 {
      self.anchors.insert(anchor, node.clone());
    }

    // Flow collections end on a `]` or `}` that can carry a trailing comment.
    if span.start.index() != span.end.index() {
      let comment = self.comment_after(span.start.line(), span.start.col() + 1);
      self.consume(span);
      if let Some(comment) = comment
        && let Some(Frame::Mapping {
          key: Some(Node::Scalar(key)),
          ..
        }) = self.stack.last_mut()
        && key.comments.line.is_none()
      {
        key.comments.line = Some(comment);
      }
    }

    self.push(node);
  }

  fn push(&mut self, node: Node) {
    match self.stack.last_mut() {
      None => {
        if self.root.is_none() {
          self.root = Some(node);
        }
      }
      Some(Frame::Sequence { items, .. }) => items.push(node),
      Some(Frame::Mapping { entries, key, .. }) => match key.take() {
        Some(key) => entries.push((key, node)),
        None => *key = Some(node),
      },
    }
  }

  /// Keys and sequence items carry comments written above them; mapping
  /// values leave them for the next key.
  fn takes_head_comments(&self) -> bool {
    match self.stack.last() {
      None | Some(Frame::Sequence { .. }) => true,
      Some(Frame::Mapping { key, .. }) => key.is_none(),
    }
  }

  fn collect_comments(&mut self, start_line: usize) {
    if start_line > self.consumed_line + 1 {
      let comments = self.comment_lines(self.consumed_line + 1, start_line);
      self.pending_comments.extend(comments);
      self.consumed_line = start_line - 1;
    }
  }

  /// Whole-line comments on the 1-based lines `from..to`.
  fn comment_lines(&self, from: usize, to: usize) -> Vec<String> {
    (from..to)
      .filter_map(|line| self.line(line))
      .map(str::trim)
      .filter(|line| line.starts_with('#'))
      .map(ToString::to_string)
      .collect()
  }

  /// A `# ...` comment on `line` after char column `col`, skipping the `:` of
  /// a key.
  fn comment_after(&self, line: usize, col: usize) -> Option<String> {
    let rest: String = self.line(line)?.chars().skip(col).collect();
    let rest = rest.trim_start();
    let rest = rest.strip_prefix(':').map_or(rest, str::trim_start);
    rest.starts_with('#').then(|| rest.trim_end().to_string())
  }

  /// Line and column just past the closing quote of a quoted scalar. Their
  /// spans also cover the blanks and comment that follow.
  fn closing_quote(&self, span: Span, quote: char) -> Option<(usize, usize)> {
    let line_number = span.end.line();
    let skip = if span.start.line() == line_number { span.start.col() + 1 } else { 0 };
    let mut chars = self.line(line_number)?.chars().enumerate().skip(skip).peekable();

    while let Some((col, c)) = chars.next() {
      match c {
        '\\' if quote == '"' => {
          chars.next();
        }
        '\'' if quote == '\'' && chars.peek().is_some_and(|&(_, next)| next == '\'') => {
          chars.next();
        }
        c if c == quote => return Some((line_number, col + 1)),
        _ => {}
      }
    }
    None
  }

  fn consume(&mut self, span: Span) {
    let end_line = span.end.line();
    // Block scalars end at the start of the line after their content.
    let ends_before_line = span.end.line() > span.start.line()
      && self
        .line(end_line)
        .is_none_or(|line| line.chars().take(span.end.col()).all(char::is_whitespace));
    let consumed = if ends_before_line { end_line - 1 } else { end_line };
    self.consumed_line = self.consumed_line.max(consumed);
  }

  fn line(&self, line: usize) -> Option<&'s str> {
    line.checked_sub(1).and_then(|index| self.lines.get(index)).copied()
  }
}

fn tag_text(tag: &Tag) -> String {
  if tag.handle == CORE_SCHEMA_HANDLE {
    format!("!!{}", tag.suffix)
  } else if tag.handle == "!" || tag.handle.is_empty() {
    format!("!{}", tag.suffix)
  } else {
    format!("!<{}{}>", tag.handle, tag.suffix)
  }
}
