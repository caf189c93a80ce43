use crate::error::Fault;
use crate::opcode::Opcode;

/// A decoded instruction with its operands already extracted.
///
/// Register operands are indices into V0..VF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0` clear the screen
    Clear,
    /// `00EE` return from subroutine
    Return,
    /// `1nnn` PC = nnn
    Jump(u16),
    /// `2nnn` push PC; PC = nnn
    Call(u16),
    /// `3xnn` skip if Vx == nn
    SkipEqual { x: usize, nn: u8 },
    /// `4xnn` skip if Vx != nn
    SkipNotEqual { x: usize, nn: u8 },
    /// `5xy0` skip if Vx == Vy
    SkipRegistersEqual { x: usize, y: usize },
    /// `6xnn` Vx = nn
    Load { x: usize, nn: u8 },
    /// `7xnn` Vx += nn, VF untouched
    AddByte { x: usize, nn: u8 },
    /// `8xy0` Vx = Vy
    Move { x: usize, y: usize },
    /// `8xy1` Vx |= Vy
    Or { x: usize, y: usize },
    /// `8xy2` Vx &= Vy
    And { x: usize, y: usize },
    /// `8xy3` Vx ^= Vy
    Xor { x: usize, y: usize },
    /// `8xy4` Vx += Vy; VF = carry
    Add { x: usize, y: usize },
    /// `8xy5` Vx -= Vy; VF = !borrow
    Sub { x: usize, y: usize },
    /// `8xy6` Vx >>= 1; VF = shifted out bit
    ShiftRight { x: usize },
    /// `8xy7` Vx = Vy - Vx; VF = !borrow
    SubReverse { x: usize, y: usize },
    /// `8xyE` Vx <<= 1; VF = shifted out bit
    ShiftLeft { x: usize },
    /// `9xy0` skip if Vx != Vy
    SkipRegistersNotEqual { x: usize, y: usize },
    /// `Annn` I = nnn
    LoadIndex(u16),
    /// `Bnnn` PC = V0 + nnn
    JumpOffset(u16),
    /// `Cxnn` Vx = random & nn
    Random { x: usize, nn: u8 },
    /// `Dxyn` draw n rows from I at (Vx, Vy)
    Draw { x: usize, y: usize, n: u8 },
    /// `Ex9E` skip if key Vx is down
    SkipKeyPressed { x: usize },
    /// `ExA1` skip if key Vx is up
    SkipKeyReleased { x: usize },
    /// `Fx07` Vx = DT
    ReadDelay { x: usize },
    /// `Fx0A` block until a key is pressed, then Vx = key
    WaitKey { x: usize },
    /// `Fx15` DT = Vx
    SetDelay { x: usize },
    /// `Fx18` ST = Vx
    SetSound { x: usize },
    /// `Fx1E` I += Vx; VF = overflow past 0xFFF
    AddIndex { x: usize },
    /// `Fx29` I = address of glyph Vx
    LoadGlyph { x: usize },
    /// `Fx33` mem[I..I+3] = bcd(Vx)
    Bcd { x: usize },
    /// `Fx55` mem[I..=I+x] = V0..=Vx
    Store { x: usize },
    /// `Fx65` V0..=Vx = mem[I..=I+x]
    Restore { x: usize },
}

impl Instruction {
    /// Decodes an opcode. Anything outside the base CHIP-8 set is a fault,
    /// including `0nnn` machine code calls.
    pub fn decode(op: Opcode) -> Result<Self, Fault> {
        use Instruction::*;

        let (x, y, n, nn, nnn) = (op.x(), op.y(), op.n(), op.nn(), op.nnn());
        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Clear,
            (0x0, 0x0, 0xE, 0xE) => Return,
            (0x1, ..) => Jump(nnn),
            (0x2, ..) => Call(nnn),
            (0x3, ..) => SkipEqual { x, nn },
            (0x4, ..) => SkipNotEqual { x, nn },
            (0x5, .., 0x0) => SkipRegistersEqual { x, y },
            (0x6, ..) => Load { x, nn },
            (0x7, ..) => AddByte { x, nn },
            (0x8, .., 0x0) => Move { x, y },
            (0x8, .., 0x1) => Or { x, y },
            (0x8, .., 0x2) => And { x, y },
            (0x8, .., 0x3) => Xor { x, y },
            (0x8, .., 0x4) => Add { x, y },
            (0x8, .., 0x5) => Sub { x, y },
            (0x8, .., 0x6) => ShiftRight { x },
            (0x8, .., 0x7) => SubReverse { x, y },
            (0x8, .., 0xE) => ShiftLeft { x },
            (0x9, .., 0x0) => SkipRegistersNotEqual { x, y },
            (0xA, ..) => LoadIndex(nnn),
            (0xB, ..) => JumpOffset(nnn),
            (0xC, ..) => Random { x, nn },
            (0xD, ..) => Draw { x, y, n },
            (0xE, _, 0x9, 0xE) => SkipKeyPressed { x },
            (0xE, _, 0xA, 0x1) => SkipKeyReleased { x },
            (0xF, _, 0x0, 0x7) => ReadDelay { x },
            (0xF, _, 0x0, 0xA) => WaitKey { x },
            (0xF, _, 0x1, 0x5) => SetDelay { x },
            (0xF, _, 0x1, 0x8) => SetSound { x },
            (0xF, _, 0x1, 0xE) => AddIndex { x },
            (0xF, _, 0x2, 0x9) => LoadGlyph { x },
            (0xF, _, 0x3, 0x3) => Bcd { x },
            (0xF, _, 0x5, 0x5) => Store { x },
            (0xF, _, 0x6, 0x5) => Restore { x },
            _ => return Err(Fault::UnknownOpcode),
        };
        Ok(instruction)
    }
}
