//=========================================================================
// Rotorfort
//=========================================================================
//
// Usage:
//   rotorfort [CONFIG.toml]
//
// Without an argument the config comes from $ROTORFORT_CONFIG, then
// ./rotorfort.toml, then built-in defaults. Log filtering follows
// RUST_LOG (default: info).
//
//=========================================================================

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;

use rotorfort::config::GameConfig;
use rotorfort::game::{self, GameAction, GameSceneKey};
use rotorfort::EngineBuilder;

/// Fly a helicopter through a generated fortress.
#[derive(Clone, Debug, Parser)]
#[command(version)]
struct Args {
    /// TOML config file. Omitted sections keep their defaults.
    #[arg(env = "ROTORFORT_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = GameConfig::load(args.config.as_deref()).context("could not load configuration")?;

    info!(
        "Starting {} (world {}x{}, seed {})",
        config.window.title, config.world.width, config.world.height, config.world.seed
    );

    EngineBuilder::<GameSceneKey, GameAction>::new()
        .with_tps(config.engine.tps)
        .with_channel_capacity(config.engine.channel_capacity)
        .with_window(config.window.title.clone(), config.window.width, config.window.height)
        .build()
        .init(|systems, _ctx| game::install(systems, &config))
        .run()
        .context("engine stopped with an error")?;

    Ok(())
}

//=========================================================================
// Unit Tests
//=========================================================================
