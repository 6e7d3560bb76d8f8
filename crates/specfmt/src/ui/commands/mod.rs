pub mod format;

pub use format::{FormatConfig, FormatOutcome, format_spec};
