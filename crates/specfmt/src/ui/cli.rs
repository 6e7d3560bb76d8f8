use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "specfmt")]
#[command(author, version, about = "OpenAPI spec formatter for better code generation")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Refactor inline response schemas into components/schemas
  Format(FormatCommand),
}

#[derive(Args, Debug, Clone)]
pub struct FormatCommand {
  /// OpenAPI YAML file to format
  #[arg(value_name = "INPUT", value_parser = existing_file)]
  pub input: PathBuf,

  /// Output file (defaults to the input file, rewritten in place)
  #[arg(short, long, value_name = "FILE")]
  pub output: Option<PathBuf>,

  /// Do not write the file, only report whether changes would be made
  #[arg(long, default_value_t = false)]
  pub dry_run: bool,

  /// Print every schema that is created or reused
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,
}

fn existing_file(value: &str) -> Result<PathBuf, String> {
  let path = PathBuf::from(value);
  if path.is_file() {
    Ok(path)
  } else {
    Err(format!("'{value}' is not an existing file"))
  }
}
