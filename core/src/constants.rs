/// Bytes of addressable memory.
pub const MEMORY_SIZE: usize = 4096;

/// The highest valid memory address; every address is logically 12 bits.
pub const MAX_ADDRESS: u16 = 0x0FFF;

/// ROMs are copied here and execution begins here.
pub const PROGRAM_START: u16 = 0x200;

/// The most bytes a ROM can occupy.
pub const ROM_CAPACITY: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Number of general purpose registers (V0..VF).
pub const REGISTER_COUNT: usize = 16;

/// VF doubles as the carry, borrow and collision flag.
pub const FLAG_REGISTER: usize = 0xF;

/// Maximum subroutine nesting.
pub const STACK_DEPTH: usize = 16;

/// Keys on the hexadecimal keypad.
pub const KEY_COUNT: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Default instructions executed per second.
pub const CLOCK_SPEED: u32 = 500;

/// Rate at which the delay and sound timers count down.
pub const TIMER_FREQUENCY: u32 = 60;

/// Bytes per font glyph; `Fx29` relies on glyph `d` starting at `d * GLYPH_SIZE`.
pub const GLYPH_SIZE: u16 = 5;

/// # Sprite sheet
/// Built-in 4x5 glyphs for the hex digits 0..F, loaded at 0x000.
///
/// Each byte is one row; only the high nibble is lit.
/// ```text
/// 0xF0  ████
/// 0x90  █  █
/// 0x90  █  █
/// 0x90  █  █
/// 0xF0  ████
/// ```
#[rustfmt::skip]
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
