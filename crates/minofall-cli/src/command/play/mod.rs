use std::{fs, path::PathBuf};

use anyhow::Context as _;
use minofall_engine::{GameConfig, GameSession};

use crate::{command::play::app::PlayApp, tui::Tui};

mod app;
mod keymap;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// JSON file with game settings; missing fields keep their defaults
    #[clap(long)]
    config: Option<PathBuf>,
    /// Board width in cells
    #[clap(long)]
    width: Option<usize>,
    /// Board height in cells
    #[clap(long)]
    height: Option<usize>,
    /// Automatic drop interval in milliseconds
    #[clap(long)]
    drop_ms: Option<u64>,
    /// Seed for the piece generator (random when omitted)
    #[clap(long)]
    seed: Option<u64>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let config = load_config(arg)?;
    let session = match arg.seed {
        Some(seed) => GameSession::with_seed(config, seed),
        None => GameSession::new(config),
    }
    .context("failed to start game session")?;

    let mut app = PlayApp::new(session);
    Tui::new().run(&mut app)
}

/// Merges defaults, the config file and command-line overrides, in that order.
fn load_config(arg: &PlayArg) -> anyhow::Result<GameConfig> {
    let PlayArg {
        config: path,
        width,
        height,
        drop_ms,
        seed: _,
    } = arg;

    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse config file {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    if let Some(width) = width {
        config.width = *width;
    }
    if let Some(height) = height {
        config.height = *height;
    }
    if let Some(drop_ms) = drop_ms {
        config.drop_interval_ms = *drop_ms;
    }
    config.validate().context("invalid game configuration")?;
    tracing::debug!(?config, "game configuration");
    Ok(config)
}
