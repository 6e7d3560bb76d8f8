use clap::Parser;
use specfmt::ui::{self, Cli, Colors, Commands, colors};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  let colors = Colors::new(colors::colors_enabled(cli.color), colors::detect_theme(cli.theme));

  match cli.command {
    Commands::Format(command) => {
      let config = ui::commands::FormatConfig::from_command(command);
      ui::commands::format_spec(&config, &colors).await?;
    }
  }

  Ok(())
}
