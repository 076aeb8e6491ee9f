use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use snake_tui::game::{GameConfig, GameSpeed};
use snake_tui::modes::PlayMode;

#[derive(Parser)]
#[command(name = "snake-tui")]
#[command(version, about = "Snake in the terminal, on a wrap-around board")]
struct Cli {
    /// Board width; the board is always square
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u16).range(5..=15))]
    width: u16,

    /// Starting speed
    #[arg(long, value_enum, default_value = "normal")]
    speed: GameSpeed,
}

#[tokio::main]
async fn main() -> Result<()> {
    // The TUI draws to stderr; diagnostics go to stdout, gated by RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stdout)
        .init();

    let cli = Cli::parse();
    let config = GameConfig::new(cli.width, cli.speed)?;

    let mut play_mode = PlayMode::new(config);
    play_mode.run().await?;

    Ok(())
}
