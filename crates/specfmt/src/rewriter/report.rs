use strum::Display;

/// Something the rewriter did, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum RewriteEvent {
  #[strum(to_string = "Found inline schema at {method} {path} {status} -> creating {name}")]
  FoundInlineSchema {
    method: String,
    path: String,
    status: String,
    name: String,
  },
  #[strum(to_string = "Found inline allOf pattern at {method} {path} {status} -> creating {base} and {composite}")]
  FoundAlternativesPattern {
    method: String,
    path: String,
    status: String,
    base: String,
    composite: String,
  },
  #[strum(to_string = "Created components/schemas/{name}")]
  CreatedSchema { name: String },
  #[strum(to_string = "Reusing existing schema {name} (fingerprint match)")]
  ReusedSchema { name: String },
}

impl RewriteEvent {
  /// Detail lines are printed indented under the `Found ...` line they belong to.
  pub const fn is_detail(&self) -> bool {
    matches!(self, Self::CreatedSchema { .. } | Self::ReusedSchema { .. })
  }
}

/// Outcome of one pass over a document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RewriteReport {
  pub operations_visited: usize,
  pub responses_rewritten: usize,
  pub schemas_created: usize,
  pub schemas_reused: usize,
  pub alternatives_rewritten: usize,
  pub events: Vec<RewriteEvent>,
}

impl RewriteReport {
  /// Whether any schema in the document was rewritten.
  pub const fn changed(&self) -> bool {
    self.responses_rewritten > 0
  }

  pub fn record_operation(&mut self) {
    self.operations_visited += 1;
  }

  pub fn record_rewrite(&mut self) {
    self.responses_rewritten += 1;
  }

  pub fn record_alternatives(&mut self) {
    self.alternatives_rewritten += 1;
  }

  pub fn record_created(&mut self, name: &str) {
    self.schemas_created += 1;
    self.events.push(RewriteEvent::CreatedSchema { name: name.to_string() });
  }

  pub fn record_reused(&mut self, name: &str) {
    self.schemas_reused += 1;
    self.events.push(RewriteEvent::ReusedSchema { name: name.to_string() });
  }

  pub fn record_event(&mut self, event: RewriteEvent) {
    self.events.push(event);
  }
}
