use std::fmt;

/// # Opcodes
///
/// A 16 bit big-endian instruction word. Its nibbles are conventionally named:
/// - `[f___]` the family; selects a broad group of instructions
/// - `[_x__]` the register Vx, or the last register of the range V0..Vx
/// - `[__y_]` the register Vy
/// - `[___n]` a 4-bit immediate, or the variant within a family
/// - `[__nn]` an 8-bit immediate
/// - `[_nnn]` a 12-bit address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode(pub u16);

impl Opcode {
    /// Combines two consecutive memory bytes, high byte first.
    pub fn from_bytes(high: u8, low: u8) -> Self {
        Opcode(u16::from_be_bytes([high, low]))
    }

    /// All four nibbles, most significant first.
    pub fn nibbles(self) -> (u8, u8, u8, u8) {
        (self.family(), self.x() as u8, self.y() as u8, self.n())
    }

    pub fn family(self) -> u8 {
        (self.0 >> 12) as u8
    }

    pub fn x(self) -> usize {
        usize::from((self.0 & 0x0F00) >> 8)
    }

    pub fn y(self) -> usize {
        usize::from((self.0 & 0x00F0) >> 4)
    }

    pub fn n(self) -> u8 {
        (self.0 & 0x000F) as u8
    }

    pub fn nn(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    pub fn nnn(self) -> u16 {
        self.0 & 0x0FFF
    }
}

impl From<Opcode> for u16 {
    fn from(op: Opcode) -> u16 {
        op.0
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}
