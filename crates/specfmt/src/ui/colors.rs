use std::io::IsTerminal;

use clap::{ValueEnum, builder::styling::Ansi256Color};
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeMode {
  Dark,
  Light,
  Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
  Dark,
  Light,
}

/// What a piece of terminal output is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
  Timestamp,
  Primary,
  Accent,
  Detail,
  Success,
  Label,
  Value,
}

pub struct Colors {
  enabled: bool,
  theme: Theme,
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    Self { enabled, theme }
  }

  const fn color(&self, role: Role) -> Color {
    if !self.enabled {
      return Color::Reset;
    }

    let (r, g, b) = match (self.theme, role) {
      (Theme::Dark, Role::Timestamp | Role::Detail | Role::Success) => (118, 166, 166),
      (Theme::Dark, Role::Primary) => (191, 126, 4),
      (Theme::Dark, Role::Accent) => (166, 84, 55),
      (Theme::Dark, Role::Label) => (217, 164, 4),
      (Theme::Dark, Role::Value) => (242, 211, 56),
      (Theme::Light, Role::Timestamp) => (92, 62, 38),
      (Theme::Light, Role::Primary) => (70, 42, 25),
      (Theme::Light, Role::Accent) => (211, 99, 70),
      (Theme::Light, Role::Detail) => (40, 111, 170),
      (Theme::Light, Role::Success) => (34, 142, 90),
      (Theme::Light, Role::Label) => (176, 103, 66),
      (Theme::Light, Role::Value) => (199, 146, 76),
    };
    Color::Rgb { r, g, b }
  }

  pub const fn timestamp(&self) -> Color {
    self.color(Role::Timestamp)
  }

  pub const fn primary(&self) -> Color {
    self.color(Role::Primary)
  }

  /// Reused schemas and dry-run notices.
  pub const fn accent(&self) -> Color {
    self.color(Role::Accent)
  }

  /// Indented per-schema lines under a `Found ...` line.
  pub const fn detail(&self) -> Color {
    self.color(Role::Detail)
  }

  pub const fn success(&self) -> Color {
    self.color(Role::Success)
  }

  pub const fn label(&self) -> Color {
    self.color(Role::Label)
  }

  pub const fn value(&self) -> Color {
    self.color(Role::Value)
  }

  const fn to_clap(color: Color) -> Option<clap::builder::styling::Color> {
    use clap::builder::styling::{AnsiColor, Color as ClapColor, RgbColor};

    match color {
      Color::Black => Some(ClapColor::Ansi(AnsiColor::Black)),
      Color::Blue | Color::DarkBlue => Some(ClapColor::Ansi(AnsiColor::Blue)),
      Color::Cyan | Color::DarkCyan => Some(ClapColor::Ansi(AnsiColor::Cyan)),
      Color::DarkGreen | Color::Green => Some(ClapColor::Ansi(AnsiColor::Green)),
      Color::DarkGrey | Color::Grey => Some(ClapColor::Ansi(AnsiColor::BrightBlack)),
      Color::DarkMagenta | Color::Magenta => Some(ClapColor::Ansi(AnsiColor::Magenta)),
      Color::DarkRed | Color::Red => Some(ClapColor::Ansi(AnsiColor::Red)),
      Color::DarkYellow | Color::Yellow => Some(ClapColor::Ansi(AnsiColor::Yellow)),
      Color::White => Some(ClapColor::Ansi(AnsiColor::White)),
      Color::AnsiValue(val) => Some(ClapColor::Ansi256(Ansi256Color(val))),
      Color::Rgb { r, g, b } => Some(ClapColor::Rgb(RgbColor(r, g, b))),
      Color::Reset => None,
    }
  }

  pub const fn clap_styles() -> clap::builder::Styles {
    use clap::builder::styling::{Style, Styles};

    let colors = Self::new(true, Theme::Dark);

    Styles::styled()
      .header(Style::new().bold().underline().fg_color(Self::to_clap(colors.label())))
      .usage(Style::new().bold().fg_color(Self::to_clap(colors.label())))
      .literal(Style::new().fg_color(Self::to_clap(colors.success())))
      .placeholder(Style::new().fg_color(Self::to_clap(colors.detail())))
      .error(Style::new().bold().fg_color(Self::to_clap(colors.accent())))
      .valid(Style::new().fg_color(Self::to_clap(colors.success())))
      .invalid(Style::new().bold().fg_color(Self::to_clap(colors.accent())))
  }
}

pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stdout().is_terminal(),
  }
}

pub fn detect_theme(mode: ThemeMode) -> Theme {
  match mode {
    ThemeMode::Dark => Theme::Dark,
    ThemeMode::Light => Theme::Light,
    ThemeMode::Auto => detect_terminal_theme(),
  }
}

fn detect_terminal_theme() -> Theme {
  if let Ok(colorfgbg) = std::env::var("COLORFGBG")
    && let Some(bg) = colorfgbg.split(';').next_back()
    && let Ok(bg_num) = bg.parse::<u8>()
  {
    return if bg_num >= 8 { Theme::Light } else { Theme::Dark };
  }

  if let Ok(term_program) = std::env::var("TERM_PROGRAM")
    && (term_program == "Apple_Terminal" || term_program == "iTerm.app")
    && let Ok(profile) = std::env::var("ITERM_PROFILE")
    && profile.to_lowercase().contains("light")
  {
    return Theme::Light;
  }

  Theme::Dark
}
