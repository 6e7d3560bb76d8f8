use super::{BOOL_TAG, FLOAT_TAG, INT_TAG, NULL_TAG, STR_TAG};

/// How a scalar was written in the source, or should be written on output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScalarStyle {
  /// Created in memory; the emitter picks plain or quoted.
  #[default]
  Auto,
  Plain,
  SingleQuoted,
  DoubleQuoted,
  Literal,
  Folded,
}

/// Comments attached to a scalar.
///
/// `head` holds whole-line comments written above the scalar, `line` the
/// comment trailing it on the same line. Both keep their leading `#`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comments {
  pub head: Vec<String>,
  pub line: Option<String>,
}

/// A scalar leaf: its resolved tag and its text exactly as written.
///
/// Equality looks at `tag` and `value` only; style and comments are
/// presentation.
#[derive(Debug, Clone)]
pub struct Scalar {
  pub tag: String,
  pub value: String,
  pub style: ScalarStyle,
  pub comments: Comments,
}

impl Scalar {
  pub fn new(tag: impl Into<String>, value: impl Into<String>, style: ScalarStyle) -> Self {
    Self {
      tag: tag.into(),
      value: value.into(),
      style,
      comments: Comments::default(),
    }
  }

  /// Whether the tag differs from what a reader would infer from the text
  /// alone, so it has to be written out.
  pub fn needs_explicit_tag(&self, rendered_plain: bool) -> bool {
    let implicit = if rendered_plain { resolve_plain(&self.value) } else { STR_TAG };
    self.tag != implicit
  }
}

impl PartialEq for Scalar {
  fn eq(&self, other: &Self) -> bool {
    self.tag == other.tag && self.value == other.value
  }
}

impl Eq for Scalar {}

/// Resolves the tag of an untagged plain scalar using the YAML 1.2 core schema.
pub fn resolve_plain(value: &str) -> &'static str {
  match value {
    "" | "~" | "null" | "Null" | "NULL" => NULL_TAG,
    "true" | "True" | "TRUE" | "false" | "False" | "FALSE" => BOOL_TAG,
    ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" | "-.inf" | "-.Inf" | "-.INF" | ".nan" | ".NaN"
    | ".NAN" => FLOAT_TAG,
    _ if is_int(value) => INT_TAG,
    _ if is_float(value) => FLOAT_TAG,
    _ => STR_TAG,
  }
}

fn is_int(value: &str) -> bool {
  if let Some(hex) = value.strip_prefix("0x") {
    return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());
  }
  if let Some(octal) = value.strip_prefix("0o") {
    return !octal.is_empty() && octal.chars().all(|c| matches!(c, '0'..='7'));
  }

  let digits = value.strip_prefix(['-', '+']).unwrap_or(value);
  !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// `[-+]?(\.[0-9]+|[0-9]+(\.[0-9]*)?)([eE][-+]?[0-9]+)?`
fn is_float(value: &str) -> bool {
  let unsigned = value.strip_prefix(['-', '+']).unwrap_or(value);
  let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
    Some((mantissa, exponent)) => (mantissa, Some(exponent)),
    None => (unsigned, None),
  };

  let mantissa_ok = match mantissa.split_once('.') {
    Some((whole, fraction)) => {
      (!whole.is_empty() || !fraction.is_empty())
        && whole.chars().all(|c| c.is_ascii_digit())
        && fraction.chars().all(|c| c.is_ascii_digit())
    }
    None => !mantissa.is_empty() && mantissa.chars().all(|c| c.is_ascii_digit()),
  };

  let exponent_ok = exponent.is_none_or(|exponent| {
    let digits = exponent.strip_prefix(['-', '+']).unwrap_or(exponent);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
  });

  mantissa_ok && exponent_ok
}
