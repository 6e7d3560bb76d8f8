use crate::document::{Document, Node, parse_yaml};

pub(super) fn parse(input: &str) -> Document {
  parse_yaml(input).expect("failed to parse test document")
}

pub(super) fn node(input: &str) -> Node {
  parse(input).root
}

pub(super) fn schemas(document: &Document) -> &Node {
  document
    .root
    .get("components")
    .and_then(|components| components.get("schemas"))
    .expect("document has no components.schemas")
}

pub(super) fn schema_names(document: &Document) -> Vec<&str> {
  schemas(document).entries().iter().filter_map(|(key, _)| key.as_str()).collect()
}

pub(super) fn response_schema<'d>(
  document: &'d Document,
  path: &str,
  method: &str,
  status: &str,
  content_type: &str,
) -> &'d Node {
  document
    .root
    .get("paths")
    .and_then(|paths| paths.get(path))
    .and_then(|item| item.get(method))
    .and_then(|operation| operation.get("responses"))
    .and_then(|responses| responses.get(status))
    .and_then(|response| response.get("content"))
    .and_then(|content| content.get(content_type))
    .and_then(|media_type| media_type.get("schema"))
    .unwrap_or_else(|| panic!("no schema at {method} {path} {status} {content_type}"))
}

pub(super) fn json_response_schema<'d>(document: &'d Document, path: &str, method: &str, status: &str) -> &'d Node {
  response_schema(document, path, method, status, "application/json")
}

pub(super) const AIRPORT_SPEC: &str = r#"
openapi: 3.0.0
info:
  title: Flights
  version: 1.0.0
paths:
  /airports/{id}:
    get:
      operationId: get_airport
      responses:
        '200':
          description: An airport
          content:
            application/json; charset=UTF-8:
              schema:
                allOf:
                - type: object
                  properties:
                    code:
                      type: string
                    name:
                      type: string
                - type: object
                  properties:
                    alternatives:
                      type: array
                      items:
                        type: object
                        properties:
                          code:
                            type: string
                          name:
                            type: string
"#;
