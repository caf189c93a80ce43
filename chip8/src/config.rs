use std::path::PathBuf;

use clap::Parser;

use chipvm_core::CLOCK_SPEED;

const DEFAULT_SCALE: u32 = 10;
const MAX_CLOCK_SPEED: i64 = 1_000_000;

/// Runs a CHIP-8 program in a window.
///
/// Keypad: 1234 / QWER / ASDF / ZXCV. Hold Space to fast-forward, Escape quits.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Config {
    /// Path to a raw CHIP-8 ROM
    pub rom: PathBuf,

    /// Log every executed instruction
    #[arg(short, long)]
    pub debug: bool,

    /// Instructions executed per second
    #[arg(
        short,
        long,
        default_value_t = CLOCK_SPEED,
        value_parser = clap::value_parser!(u32).range(1..=MAX_CLOCK_SPEED)
    )]
    pub clock_speed: u32,

    /// Window pixels per CHIP-8 pixel
    #[arg(short, long, default_value_t = DEFAULT_SCALE)]
    pub scale: u32,
}
