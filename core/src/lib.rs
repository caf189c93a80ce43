pub use chip8::{Chip8, Command};
pub use clock::{Clock, Ticks};
pub use constants::{CLOCK_SPEED, TIMER_FREQUENCY};
pub use error::{Error, Fault, Result};
pub use frame_buffer::Frame;
pub use keypad::KeyWait;
pub use timers::{Audio, Mute};

mod chip8;
mod clock;
pub mod constants;
pub mod error;
pub mod frame_buffer;
pub mod instruction;
pub mod keypad;
pub mod memory;
pub mod opcode;
mod operations;
pub mod stack;
pub mod state;
pub mod timers;
