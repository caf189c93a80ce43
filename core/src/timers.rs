use log::debug;

/// The audio collaborator; told when the sound timer runs out.
pub trait Audio {
    fn beep(&mut self);
}

/// Silently drops every beep.
pub struct Mute;

impl Audio for Mute {
    fn beep(&mut self) {}
}

/// # Timers
/// Two 8-bit counters that count down to zero at 60Hz, independently of
/// how fast instructions are executed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    /// Decrements both timers toward zero.
    ///
    /// Returns true when the sound timer just ran out, i.e. it was exactly 1.
    pub fn tick(&mut self) -> bool {
        self.delay = self.delay.saturating_sub(1);

        let beep = self.sound == 1;
        self.sound = self.sound.saturating_sub(1);
        if beep {
            debug!("sound timer expired");
        }
        beep
    }
}
