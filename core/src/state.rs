use crate::constants::{PROGRAM_START, REGISTER_COUNT};
use crate::frame_buffer::FrameBuffer;
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::stack::CallStack;
use crate::timers::Timers;

/// The complete Chip-8 machine state
///
/// ## CPU
/// Registers
/// - (v) 16 8-bit registers (V0..VF)
///     - VF is also written as the carry, borrow and collision flag
/// - (i) a 16-bit address register, only ever holding 12-bit values
///
/// Counter
/// - (pc) a 16-bit program counter, starting at 0x200
///
/// Timers
/// - delay and sound, counting down at 60Hz
///
/// ## Memory
/// - 4096 bytes with the font at 0x000 and the program at 0x200
/// - a call stack of up to 16 return addresses
/// - a 64x32 frame buffer
///
/// ## Input
/// - the pressed status of keys 0..F
/// - the latch that blocks execution until a key is pressed
#[derive(Clone)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub stack: CallStack,
    pub memory: Memory,
    pub frame_buffer: FrameBuffer,
    pub timers: Timers,
    pub keypad: Keypad,
}

impl State {
    pub fn new() -> Self {
        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            stack: CallStack::new(),
            memory: Memory::new(),
            frame_buffer: FrameBuffer::new(),
            timers: Timers::default(),
            keypad: Keypad::new(),
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
