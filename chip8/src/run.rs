use std::fs::File;
use std::io::BufReader;
use std::time::{Duration, Instant};

use anyhow::{Context, Error};
use log::{info, warn};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chipvm_core::{Audio, Chip8, Clock, Command, Mute, TIMER_FREQUENCY};
use chipvm_display::Display;

use crate::audio::Beeper;
use crate::config::Config;
use crate::keymap::keymap;

/// How much faster the machine runs while fast-forwarding.
const FAST_FORWARD: u32 = 5;
/// Sleep between passes of the event loop.
const IDLE: Duration = Duration::from_millis(1);

pub fn run(config: &Config) -> anyhow::Result<()> {
    let mut chip8 = Chip8::new();

    // Load ROM
    let file = File::open(&config.rom)
        .with_context(|| format!("unable to open {}", config.rom.display()))?;
    chip8.load_rom(&mut BufReader::new(file))?;

    // Get SDL2 context
    let sdl = sdl2::init().map_err(Error::msg)?;
    let mut display = Display::new(&sdl, config.scale).map_err(Error::msg)?;
    let mut audio: Box<dyn Audio> = match Beeper::new(&sdl) {
        Ok(beeper) => Box::new(beeper),
        Err(e) => {
            warn!("no audio, continuing muted: {}", e);
            Box::new(Mute)
        }
    };
    let mut events = sdl.event_pump().map_err(Error::msg)?;

    let mut clock = Clock::new(config.clock_speed, TIMER_FREQUENCY);
    let mut last_pass = Instant::now();

    // Whether or not the configured clock speed should be exceeded
    let mut fast_forward = false;

    'event: loop {
        // Handle input; all machine mutations go through `apply`
        for event in events.poll_iter() {
            let command = match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(Keycode::Space),
                    ..
                } => {
                    fast_forward = true;
                    continue;
                }
                Event::KeyUp {
                    keycode: Some(Keycode::Space),
                    ..
                } => {
                    fast_forward = false;
                    continue;
                }
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => match keymap(key) {
                    Some(code) => Command::KeyDown(code),
                    None => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match keymap(key) {
                    Some(code) => Command::KeyUp(code),
                    None => continue,
                },
                _ => continue,
            };
            chip8.apply(command, audio.as_mut())?;
        }

        // Update state
        let now = Instant::now();
        let mut elapsed = now - last_pass;
        last_pass = now;
        if fast_forward {
            elapsed *= FAST_FORWARD;
        }
        let ticks = clock.advance(elapsed);
        for _ in 0..ticks.steps {
            chip8.apply(Command::Step, audio.as_mut())?;
        }
        for _ in 0..ticks.timer_ticks {
            chip8.apply(Command::Tick, audio.as_mut())?;
        }

        // Only redraw frames the machine reports as changed
        if let Some(frame) = chip8.take_frame() {
            display.render(&frame).map_err(Error::msg)?;
        }

        std::thread::sleep(IDLE);
    }

    info!("stopped at pc {:#05X}", chip8.state().pc);
    Ok(())
}
