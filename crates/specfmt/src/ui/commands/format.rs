use std::path::PathBuf;

use chrono::{Local, Timelike};
use crossterm::style::Stylize;

use crate::{
  document::{Document, SpecLoader, emit_yaml},
  error::FormatError,
  rewriter::{RewriteReport, refactor_inline_response_schemas},
  ui::{Colors, FormatCommand},
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
  pub dry_run: bool,
  pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
  pub input: PathBuf,
  pub output: PathBuf,
  pub options: FormatOptions,
}

impl FormatConfig {
  pub fn from_command(command: FormatCommand) -> Self {
    let FormatCommand {
      input,
      output,
      dry_run,
      verbose,
    } = command;

    let output = output.unwrap_or_else(|| input.clone());

    Self {
      input,
      output,
      options: FormatOptions { dry_run, verbose },
    }
  }

  async fn load_document(&self) -> Result<Document, FormatError> {
    SpecLoader::open(&self.input).await?.parse()
  }

  async fn write_output(&self, yaml: String) -> Result<(), FormatError> {
    let to_write_error = |source| FormatError::Write {
      path: self.output.clone(),
      source,
    };

    if let Some(parent) = self.output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
      tokio::fs::create_dir_all(parent).await.map_err(to_write_error)?;
    }
    tokio::fs::write(&self.output, yaml).await.map_err(to_write_error)
  }
}

/// How a format run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatOutcome {
  DryRun { changed: bool },
  Unchanged,
  Written,
}

struct FormatLogger<'a> {
  config: &'a FormatConfig,
  colors: &'a Colors,
}

impl<'a> FormatLogger<'a> {
  fn new(config: &'a FormatConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
  }

  fn detail(&self, message: &str) {
    println!("           {message}");
  }

  fn stat(&self, label: &str, value: String) {
    println!(
      "            {:<25} {}",
      label.with(self.colors.label()),
      value.with(self.colors.value())
    );
  }

  fn log_loading(&self) {
    if self.config.options.verbose {
      self.info(
        &format!("Loading OpenAPI spec from: {}", self.config.input.display())
          .with(self.colors.primary())
          .to_string(),
      );
    }
  }

  fn print_report(&self, report: &RewriteReport) {
    if !self.config.options.verbose {
      return;
    }

    for event in &report.events {
      if event.is_detail() {
        self.detail(&event.to_string().with(self.colors.detail()).to_string());
      } else {
        self.info(&event.to_string().with(self.colors.primary()).to_string());
      }
    }

    self.stat("Operations visited:", report.operations_visited.to_string());
    self.stat("Responses rewritten:", report.responses_rewritten.to_string());
    self.stat("Schemas created:", report.schemas_created.to_string());
    if report.schemas_reused > 0 {
      self.stat("Schemas reused:", report.schemas_reused.to_string());
    }
    if report.alternatives_rewritten > 0 {
      self.stat("Alternatives split:", report.alternatives_rewritten.to_string());
    }
  }

  fn log_dry_run(&self, changed: bool) {
    self.info(
      &format!("Dry-run: changes detected = {changed}")
        .with(self.colors.accent())
        .to_string(),
    );
  }

  fn log_unchanged(&self) {
    if self.config.options.verbose {
      self.info(&"No changes needed".with(self.colors.success()).to_string());
    }
  }

  fn log_written(&self) {
    if self.config.options.verbose {
      self.info(
        &format!("Wrote refactored spec to {}", self.config.output.display())
          .with(self.colors.success())
          .to_string(),
      );
    }
  }
}

/// Runs one pass over `config.input` and writes the result to `config.output`.
///
/// The output file is only touched once the rewrite and the YAML encoding have
/// both succeeded, and not at all when nothing changed or on a dry run.
pub async fn format_spec(config: &FormatConfig, colors: &Colors) -> Result<FormatOutcome, FormatError> {
  let logger = FormatLogger::new(config, colors);

  logger.log_loading();
  let mut document = config.load_document().await?;

  let report = refactor_inline_response_schemas(&mut document)?;
  logger.print_report(&report);

  let changed = report.changed();
  if config.options.dry_run {
    logger.log_dry_run(changed);
    return Ok(FormatOutcome::DryRun { changed });
  }
  if !changed {
    logger.log_unchanged();
    return Ok(FormatOutcome::Unchanged);
  }

  let yaml = emit_yaml(&document)?;
  config.write_output(yaml).await?;
  logger.log_written();

  Ok(FormatOutcome::Written)
}
