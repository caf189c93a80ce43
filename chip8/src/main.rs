use clap::Parser;
use log::LevelFilter;

mod audio;
mod config;
mod keymap;
mod run;

use config::Config;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // RUST_LOG still takes precedence over the flag
    let level = if config.debug {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    run::run(&config)
}
