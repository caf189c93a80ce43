use std::io::Read;

use log::{error, trace, warn};

use crate::constants::{KEY_COUNT, ROM_CAPACITY};
use crate::error::{Error, Result};
use crate::frame_buffer::Frame;
use crate::instruction::Instruction;
use crate::keypad::KeyWait;
use crate::operations;
use crate::state::State;
use crate::timers::Audio;

/// Everything the host can ask the machine to do.
///
/// Feeding all of these through `Chip8::apply` from one owner keeps every
/// mutation on a single timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Execute at most one instruction.
    Step,
    /// Count the timers down once.
    Tick,
    KeyDown(u8),
    KeyUp(u8),
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - stepping the CPU one instruction at a time
/// - ticking its timers
/// - taking the frame buffer for rendering once it has changed
///
/// A fatal error halts the machine; it refuses to step again afterwards.
pub struct Chip8 {
    state: State,
    halted: bool,
}

impl Chip8 {
    pub fn new() -> Self {
        Chip8 {
            state: State::new(),
            halted: false,
        }
    }

    /// Load a rom from a reader
    ///
    /// # Arguments
    /// * `reader` a source of raw ROM bytes, with no header
    ///
    /// Reads at most one byte more than fits, enough to tell it is too large.
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<()> {
        let mut rom = Vec::new();
        reader
            .take(ROM_CAPACITY as u64 + 1)
            .read_to_end(&mut rom)?;
        self.load_program(&rom)
    }

    /// Copies raw program bytes to 0x200.
    pub fn load_program(&mut self, rom: &[u8]) -> Result<()> {
        self.state.memory.load_rom(rom)
    }

    pub fn apply(&mut self, command: Command, audio: &mut dyn Audio) -> Result<()> {
        match command {
            Command::Step => return self.step(),
            Command::Tick => self.tick(audio),
            Command::KeyDown(key) => self.key_press(key),
            Command::KeyUp(key) => self.key_release(key),
        }
        Ok(())
    }

    /// Returns the frame if the display should be redrawn, and marks it drawn
    pub fn take_frame(&mut self) -> Option<Frame> {
        self.state.frame_buffer.take_frame()
    }

    /// Set the pressed status of key
    ///
    /// If the machine is waiting on `Fx0A` the key is written to the waiting
    /// register and execution moves past the `Fx0A`.
    ///
    /// # Arguments
    /// * `key` the keypad code, 0x0..=0xF
    pub fn key_press(&mut self, key: u8) {
        if usize::from(key) >= KEY_COUNT {
            warn!("ignoring press of unknown key {:#X}", key);
            return;
        }
        if let Some(register) = self.state.keypad.press(key) {
            self.state.v[register] = key;
            self.state.pc += 0x2;
        }
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the keypad code, 0x0..=0xF
    pub fn key_release(&mut self, key: u8) {
        if usize::from(key) >= KEY_COUNT {
            warn!("ignoring release of unknown key {:#X}", key);
            return;
        }
        self.state.keypad.release(key);
    }

    /// Advances the CPU by a single instruction
    /// - does nothing while awaiting a keypress
    /// - fetches, decodes and executes the opcode at pc
    /// - halts the machine on any fault
    pub fn step(&mut self) -> Result<()> {
        if self.halted {
            return Err(Error::Halted);
        }
        if self.state.keypad.is_waiting() {
            return Ok(());
        }

        let pc = self.state.pc;
        let opcode = match self.state.memory.fetch(pc) {
            Some(opcode) => opcode,
            None => return self.halt(Error::Fetch { pc }),
        };

        let result = Instruction::decode(opcode).and_then(|instruction| {
            trace!(
                "{} {:?} v{:02X?} i{:03X} pc{:03X}",
                opcode,
                instruction,
                self.state.v,
                self.state.i,
                pc
            );
            operations::execute(instruction, &mut self.state)
        });

        match result {
            Ok(()) => Ok(()),
            Err(fault) => self.halt(Error::Execute {
                pc,
                opcode: opcode.into(),
                fault,
            }),
        }
    }

    /// Counts the delay and sound timers down, beeping if sound just ran out.
    ///
    /// Timers keep running while the CPU waits for a key.
    pub fn tick(&mut self, audio: &mut dyn Audio) {
        if self.state.timers.tick() {
            audio.beep();
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn key_wait(&self) -> KeyWait {
        self.state.keypad.wait()
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    fn halt(&mut self, err: Error) -> Result<()> {
        error!("halting: {}", err);
        self.halted = true;
        Err(err)
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
