/// Operation id prefixes stripped before naming, in priority order.
///
/// Matching is case-insensitive and requires the trailing underscore, so
/// camelCase ids such as `getAirport` keep their verb.
const VERB_PREFIXES: &[&str] = &[
  "get_", "post_", "put_", "delete_", "patch_", "options_", "head_", "list_", "create_", "update_", "remove_",
];

const FALLBACK_BASE_NAME: &str = "Response";
const DEFAULT_STATUS: &str = "Default";
const RESPONSE_SUFFIX: &str = "Response";

/// Derives a component name for an inline response schema.
///
/// The operation id is preferred; without one the path segments and method are
/// used. The capitalized status code and `Response` are always appended.
///
/// ```text
/// ("/airports/{id}", "get", "get_airport", "200")  -> Airport200Response
/// ("/flights/{id}/track", "get", "", "200")        -> FlightsIdTrackGet200Response
/// ("/", "get", "", "")                              -> GetDefaultResponse
/// ```
pub fn derive_response_name(path: &str, method: &str, operation_id: &str, status: &str) -> String {
  let mut base = derive_schema_name(operation_id);
  if base.is_empty() {
    base = derive_name_from_path_and_method(path, method);
  }
  if base.is_empty() {
    base = FALLBACK_BASE_NAME.to_string();
  }

  let status = if status.is_empty() { DEFAULT_STATUS } else { status };

  format!("{base}{}{RESPONSE_SUFFIX}", capitalize_segments(status))
}

/// Derives a schema name from an operation id alone.
///
/// Strips one verb prefix and capitalizes the remaining segments:
/// `get_airport_info` becomes `AirportInfo`. Returns an empty string when
/// nothing is left.
pub fn derive_schema_name(operation_id: &str) -> String {
  capitalize_segments(strip_verb_prefix(operation_id))
}

fn strip_verb_prefix(operation_id: &str) -> &str {
  VERB_PREFIXES
    .iter()
    .find(|prefix| {
      operation_id
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
    .map_or(operation_id, |prefix| &operation_id[prefix.len()..])
}

fn derive_name_from_path_and_method(path: &str, method: &str) -> String {
  let mut name: String = path
    .split('/')
    .filter(|segment| !segment.is_empty())
    .map(|segment| {
      let segment = segment
        .strip_prefix('{')
        .and_then(|inner| inner.strip_suffix('}'))
        .unwrap_or(segment);
      capitalize_segments(segment)
    })
    .collect();

  name.push_str(&capitalize_segments(&method.to_lowercase()));
  name
}

/// Splits on `_` and `-`, uppercases the first character of every segment and
/// joins them without a separator. The rest of each segment is left untouched.
pub fn capitalize_segments(input: &str) -> String {
  input
    .split(['_', '-'])
    .filter(|segment| !segment.is_empty())
    .map(capitalize_first)
    .collect()
}

/// Upper-cases the first char when it has a single-char upper case form;
/// chars such as `ß` that only expand to several chars are kept.
fn capitalize_first(segment: &str) -> String {
  let mut chars = segment.chars();
  let Some(first) = chars.next() else {
    return String::new();
  };

  let mut upper = first.to_uppercase();
  let first = match (upper.next(), upper.next()) {
    (Some(single), None) => single,
    _ => first,
  };
  std::iter::once(first).chain(chars).collect()
}
