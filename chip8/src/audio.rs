use std::time::Duration;

use log::warn;
use sdl2::audio::{AudioQueue, AudioSpecDesired};

use chipvm_core::Audio;

const SAMPLE_RATE: i32 = 44_100;
const TONE_HZ: u32 = 440;
const AMPLITUDE: i16 = i16::MAX / 8;
const BEEP_LENGTH: Duration = Duration::from_millis(100);

/// Plays a short square wave burst through SDL2 every time the sound timer
/// runs out.
pub struct Beeper {
    queue: AudioQueue<i16>,
    burst: Vec<i16>,
}

impl Beeper {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, String> {
        let audio = sdl.audio()?;
        let desired = AudioSpecDesired {
            freq: Some(SAMPLE_RATE),
            channels: Some(1),
            samples: None,
        };
        let queue = audio.open_queue::<i16, _>(None, &desired)?;
        let burst = square_wave(queue.spec().freq, TONE_HZ, BEEP_LENGTH);
        queue.resume();
        Ok(Beeper { queue, burst })
    }
}

impl Audio for Beeper {
    fn beep(&mut self) {
        if let Err(e) = self.queue.queue_audio(&self.burst) {
            warn!("unable to queue beep: {}", e);
        }
    }
}

/// One mono burst of a square wave.
fn square_wave(sample_rate: i32, tone: u32, length: Duration) -> Vec<i16> {
    let samples = (sample_rate.max(0) as u128 * length.as_millis() / 1000) as usize;
    let half_period = (sample_rate.max(1) as u32 / tone / 2).max(1) as usize;
    (0..samples)
        .map(|i| {
            if (i / half_period) % 2 == 0 {
                AMPLITUDE
            } else {
                -AMPLITUDE
            }
        })
        .collect()
}
