use log::debug;

use crate::constants::KEY_COUNT;

/// Whether instruction execution is blocked on `Fx0A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyWait {
    Running,
    /// Waiting for any key; its code goes into this register.
    AwaitingKey(usize),
}

/// # Keypad
/// The pressed state of the 16 hex keys plus the latch set by `Fx0A`.
///
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Keypad {
    pressed: [bool; KEY_COUNT],
    wait: KeyWait,
}

impl Keypad {
    pub fn new() -> Self {
        Keypad {
            pressed: [false; KEY_COUNT],
            wait: KeyWait::Running,
        }
    }

    /// Only the low nibble of `key` is significant.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed[usize::from(key & 0xF)]
    }

    /// Marks `key` as down. If the latch was set it is released and the
    /// register awaiting the key is returned.
    pub fn press(&mut self, key: u8) -> Option<usize> {
        self.pressed[usize::from(key & 0xF)] = true;
        match self.wait {
            KeyWait::AwaitingKey(register) => {
                self.wait = KeyWait::Running;
                debug!("key {:X} resolved wait for V{:X}", key, register);
                Some(register)
            }
            KeyWait::Running => None,
        }
    }

    pub fn release(&mut self, key: u8) {
        self.pressed[usize::from(key & 0xF)] = false;
    }

    pub fn await_key(&mut self, register: usize) {
        debug!("awaiting key for V{:X}", register);
        self.wait = KeyWait::AwaitingKey(register);
    }

    pub fn wait(&self) -> KeyWait {
        self.wait
    }

    pub fn is_waiting(&self) -> bool {
        self.wait != KeyWait::Running
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}
