use log::debug;

use crate::constants::{FLAG_REGISTER, GLYPH_SIZE, MAX_ADDRESS};
use crate::error::Fault;
use crate::instruction::Instruction;
use crate::state::State;

/// Applies one decoded instruction to the machine state.
///
/// Every fallible instruction validates its addresses before it writes
/// anything, so a fault leaves `state` untouched.
pub fn execute(instruction: Instruction, state: &mut State) -> Result<(), Fault> {
    use Instruction::*;

    match instruction {
        Clear => state.clear(),
        Return => state.ret()?,
        Jump(nnn) => state.pc = nnn,
        Call(nnn) => state.call(nnn)?,
        SkipEqual { x, nn } => state.skip_if(state.v[x] == nn),
        SkipNotEqual { x, nn } => state.skip_if(state.v[x] != nn),
        SkipRegistersEqual { x, y } => state.skip_if(state.v[x] == state.v[y]),
        SkipRegistersNotEqual { x, y } => state.skip_if(state.v[x] != state.v[y]),
        Load { x, nn } => state.load(x, nn),
        AddByte { x, nn } => state.load(x, state.v[x].wrapping_add(nn)),
        Move { x, y } => state.load(x, state.v[y]),
        Or { x, y } => state.alu(x, y, |vx, vy| (vx | vy, None)),
        And { x, y } => state.alu(x, y, |vx, vy| (vx & vy, None)),
        Xor { x, y } => state.alu(x, y, |vx, vy| (vx ^ vy, None)),
        Add { x, y } => state.alu(x, y, |vx, vy| {
            let (sum, carry) = vx.overflowing_add(vy);
            (sum, Some(u8::from(carry)))
        }),
        Sub { x, y } => state.alu(x, y, |vx, vy| {
            let (difference, borrow) = vx.overflowing_sub(vy);
            (difference, Some(u8::from(!borrow)))
        }),
        SubReverse { x, y } => state.alu(x, y, |vx, vy| {
            let (difference, borrow) = vy.overflowing_sub(vx);
            (difference, Some(u8::from(!borrow)))
        }),
        ShiftRight { x } => state.alu(x, x, |vx, _| (vx >> 1, Some(vx & 0x1))),
        ShiftLeft { x } => state.alu(x, x, |vx, _| (vx << 1, Some(vx >> 7))),
        LoadIndex(nnn) => state.load_index(nnn),
        JumpOffset(nnn) => state.jump_offset(nnn)?,
        Random { x, nn } => state.load(x, rand::random::<u8>() & nn),
        Draw { x, y, n } => state.draw(x, y, n)?,
        SkipKeyPressed { x } => state.skip_if(state.keypad.is_pressed(state.v[x])),
        SkipKeyReleased { x } => state.skip_if(!state.keypad.is_pressed(state.v[x])),
        ReadDelay { x } => state.load(x, state.timers.delay),
        // pc stays put; resolving the wait advances it
        WaitKey { x } => state.keypad.await_key(x),
        SetDelay { x } => {
            state.timers.delay = state.v[x];
            state.next();
        }
        SetSound { x } => {
            state.timers.sound = state.v[x];
            state.next();
        }
        AddIndex { x } => state.add_index(x),
        LoadGlyph { x } => state.load_index(u16::from(state.v[x]) * GLYPH_SIZE),
        Bcd { x } => state.bcd(x)?,
        Store { x } => state.store(x)?,
        Restore { x } => state.restore(x)?,
    }
    Ok(())
}

impl State {
    /// pc += 2
    fn next(&mut self) {
        self.pc += 0x2;
    }

    /// pc += 4 if condition else 2
    fn skip_if(&mut self, condition: bool) {
        self.pc += if condition { 0x4 } else { 0x2 };
    }

    /// clear
    fn clear(&mut self) {
        debug!("clear screen");
        self.frame_buffer.clear();
        self.next();
    }

    /// PC = STACK.pop() + 2
    fn ret(&mut self) -> Result<(), Fault> {
        self.pc = self.stack.pop()? + 0x2;
        Ok(())
    }

    /// STACK.push(PC); PC = nnn
    fn call(&mut self, nnn: u16) -> Result<(), Fault> {
        self.stack.push(self.pc)?;
        self.pc = nnn;
        Ok(())
    }

    /// Vx = nn
    fn load(&mut self, x: usize, nn: u8) {
        self.v[x] = nn;
        self.next();
    }

    /// Vx = f(Vx, Vy), then VF = flag if there is one
    fn alu(&mut self, x: usize, y: usize, f: impl FnOnce(u8, u8) -> (u8, Option<u8>)) {
        let (result, flag) = f(self.v[x], self.v[y]);
        self.v[x] = result;
        if let Some(flag) = flag {
            self.v[FLAG_REGISTER] = flag;
        }
        self.next();
    }

    /// I = nnn
    fn load_index(&mut self, nnn: u16) {
        self.i = nnn;
        self.next();
    }

    /// PC = V0 + nnn
    fn jump_offset(&mut self, nnn: u16) -> Result<(), Fault> {
        let target = u16::from(self.v[0x0]) + nnn;
        if target > MAX_ADDRESS {
            return Err(Fault::AddressOutOfBounds {
                address: usize::from(target),
            });
        }
        self.pc = target;
        Ok(())
    }

    /// I += Vx; VF = 1 if the sum passed 0xFFF
    fn add_index(&mut self, x: usize) {
        let sum = self.i + u16::from(self.v[x]);
        self.i = sum & MAX_ADDRESS;
        self.v[FLAG_REGISTER] = u8::from(sum > MAX_ADDRESS);
        self.next();
    }

    /// draw_sprite(x=Vx y=Vy rows=mem[I..I+n]); VF = collision
    fn draw(&mut self, x: usize, y: usize, n: u8) -> Result<(), Fault> {
        let rows = self.memory.slice(usize::from(self.i), usize::from(n))?;
        let collision =
            self.frame_buffer
                .draw_sprite(usize::from(self.v[x]), usize::from(self.v[y]), rows);
        self.v[FLAG_REGISTER] = u8::from(collision);
        self.next();
        Ok(())
    }

    /// mem[I..I+3] = bcd(Vx)
    fn bcd(&mut self, x: usize) -> Result<(), Fault> {
        let value = self.v[x];
        self.memory
            .slice_mut(usize::from(self.i), 3)?
            .copy_from_slice(&[value / 100, value / 10 % 10, value % 10]);
        self.next();
        Ok(())
    }

    /// mem[I..=I+x] = V0..=Vx
    fn store(&mut self, x: usize) -> Result<(), Fault> {
        self.memory
            .slice_mut(usize::from(self.i), x + 1)?
            .copy_from_slice(&self.v[..=x]);
        self.next();
        Ok(())
    }

    /// V0..=Vx = mem[I..=I+x]
    fn restore(&mut self, x: usize) -> Result<(), Fault> {
        let bytes = self.memory.slice(usize::from(self.i), x + 1)?;
        self.v[..=x].copy_from_slice(bytes);
        self.next();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
    use crate::keypad::KeyWait;
    use crate::opcode::Opcode;

    fn run(op: u16, state: &mut State) -> Result<(), Fault> {
        execute(Instruction::decode(Opcode(op))?, state)
    }

    fn write(state: &mut State, address: usize, bytes: &[u8]) {
        state
            .memory
            .slice_mut(address, bytes.len())
            .unwrap()
            .copy_from_slice(bytes);
    }

    #[test]
    fn test_00e0_cls() {
        let mut state = State::new();
        state.frame_buffer.draw_sprite(0, 0, &[0xFF]);
        run(0x00E0, &mut state).unwrap();
        assert!(state.frame_buffer.pixels().iter().flatten().all(|&p| p == 0));
        assert!(state.frame_buffer.is_dirty());
        assert_eq!(state.pc, 0x202);
    }

    #[test]
    fn test_00ee_ret() {
        let mut state = State::new();
        state.stack.push(0xABC).unwrap();
        run(0x00EE, &mut state).unwrap();
        assert_eq!(state.stack.depth(), 0);
        // the call itself is skipped over
        assert_eq!(state.pc, 0xABC + 0x2);
    }

    #[test]
    fn test_00ee_ret_underflow() {
        let mut state = State::new();
        assert_eq!(run(0x00EE, &mut state), Err(Fault::StackUnderflow));
        assert_eq!(state.pc, 0x200);
    }

    #[test]
    fn test_1nnn_jp() {
        let mut state = State::new();
        run(0x1ABC, &mut state).unwrap();
        assert_eq!(state.pc, 0x0ABC);
    }

    #[test]
    fn test_2nnn_call() {
        let mut state = State::new();
        state.pc = 0x0ABC;
        run(0x2123, &mut state).unwrap();
        assert_eq!(state.stack.depth(), 1);
        assert_eq!(state.stack.top(), Some(0x0ABC));
        assert_eq!(state.pc, 0x0123);
    }

    #[test]
    fn test_2nnn_call_overflow() {
        let mut state = State::new();
        for _ in 0..16 {
            run(0x2200, &mut state).unwrap();
        }
        assert_eq!(run(0x2300, &mut state), Err(Fault::StackOverflow));
        assert_eq!(state.pc, 0x200);
        assert_eq!(state.stack.depth(), 16);
    }

    #[test]
    fn test_3xnn_se() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        run(0x3111, &mut state).unwrap();
        assert_eq!(state.pc, 0x0204);
        run(0x3112, &mut state).unwrap();
        assert_eq!(state.pc, 0x0206);
    }

    #[test]
    fn test_4xnn_sne() {
        let mut state = State::new();
        run(0x4111, &mut state).unwrap();
        assert_eq!(state.pc, 0x0204);
        run(0x4100, &mut state).unwrap();
        assert_eq!(state.pc, 0x0206);
    }

    #[test]
    fn test_5xy0_se() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x11;
        run(0x5120, &mut state).unwrap();
        assert_eq!(state.pc, 0x0204);
        run(0x5130, &mut state).unwrap();
        assert_eq!(state.pc, 0x0206);
    }

    #[test]
    fn test_9xy0_sne() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        run(0x9120, &mut state).unwrap();
        assert_eq!(state.pc, 0x0204);
        state.v[0x2] = 0x11;
        run(0x9120, &mut state).unwrap();
        assert_eq!(state.pc, 0x0206);
    }

    #[test]
    fn test_6xnn_ld_every_register_and_byte() {
        let mut state = State::new();
        for r in 0..16u16 {
            for nn in 0..=255u16 {
                run(0x6000 | r << 8 | nn, &mut state).unwrap();
                assert_eq!(state.v[r as usize], nn as u8);
            }
        }
    }

    #[test]
    fn test_7xnn_add_wraps_without_flag() {
        let mut state = State::new();
        state.v[0x1] = 0xFF;
        state.v[0xF] = 0x7;
        run(0x7102, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x01);
        assert_eq!(state.v[0xF], 0x7);
    }

    #[test]
    fn test_8xy0_ld() {
        let mut state = State::new();
        state.v[0x2] = 0x1;
        run(0x8120, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x1);
    }

    #[test]
    fn test_8xy1_8xy2_8xy3_logic() {
        let mut state = State::new();
        state.v[0x2] = 0x3;

        state.v[0x1] = 0x6;
        run(0x8121, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x7);

        state.v[0x1] = 0x6;
        run(0x8122, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x2);

        state.v[0x1] = 0x6;
        run(0x8123, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x5);
    }

    #[test]
    fn test_8xy4_add_sets_carry_for_every_pair() {
        let mut state = State::new();
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                state.v[0x1] = a;
                state.v[0x2] = b;
                run(0x8124, &mut state).unwrap();
                assert_eq!(state.v[0x1], a.wrapping_add(b));
                assert_eq!(state.v[0xF], u8::from(u16::from(a) + u16::from(b) > 255));
            }
        }
    }

    #[test]
    fn test_8xy5_sub() {
        let mut state = State::new();
        state.v[0x1] = 0x33;
        state.v[0x2] = 0x11;
        run(0x8125, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x22);
        assert_eq!(state.v[0xF], 0x1);

        state.v[0x1] = 0x11;
        state.v[0x2] = 0x12;
        run(0x8125, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0xFF);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy7_subn() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x33;
        run(0x8127, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x22);
        assert_eq!(state.v[0xF], 0x1);

        state.v[0x1] = 0x12;
        state.v[0x2] = 0x11;
        run(0x8127, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0xFF);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy6_shr() {
        let mut state = State::new();
        state.v[0x1] = 0x5;
        run(0x8106, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x2);
        assert_eq!(state.v[0xF], 0x1);
        run(0x8106, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x1);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xye_shl() {
        let mut state = State::new();
        state.v[0x1] = 0xFF;
        run(0x810E, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0xFE);
        assert_eq!(state.v[0xF], 0x1);
        state.v[0x1] = 0x4;
        run(0x810E, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0x8);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_flag_wins_when_vf_is_the_target() {
        let mut state = State::new();
        state.v[0xF] = 0xFF;
        state.v[0x1] = 0x01;
        run(0x8F14, &mut state).unwrap();
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_annn_ld() {
        let mut state = State::new();
        run(0xAABC, &mut state).unwrap();
        assert_eq!(state.i, 0xABC);
    }

    #[test]
    fn test_bnnn_jp() {
        let mut state = State::new();
        state.v[0x0] = 0x2;
        run(0xBABC, &mut state).unwrap();
        assert_eq!(state.pc, 0xABE);
    }

    #[test]
    fn test_bnnn_jp_past_memory_faults() {
        let mut state = State::new();
        state.v[0x0] = 0x2;
        assert_eq!(
            run(0xBFFF, &mut state),
            Err(Fault::AddressOutOfBounds { address: 0x1001 })
        );
        assert_eq!(state.pc, 0x200);
    }

    #[test]
    fn test_cxnn_rnd_is_masked() {
        let mut state = State::new();
        for _ in 0..64 {
            run(0xC10F, &mut state).unwrap();
            assert_eq!(state.v[0x1] & 0xF0, 0);
        }
        run(0xC100, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0);
    }

    #[test]
    fn test_dxyn_drw_draws() {
        let mut state = State::new();
        state.v[0x0] = 0x1;
        // Draw the 0x0 sprite with a 1x 1y offset
        run(0xD005, &mut state).unwrap();
        let mut expected = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        expected[1][1..5].copy_from_slice(&[1, 1, 1, 1]);
        expected[2][1..5].copy_from_slice(&[1, 0, 0, 1]);
        expected[3][1..5].copy_from_slice(&[1, 0, 0, 1]);
        expected[4][1..5].copy_from_slice(&[1, 0, 0, 1]);
        expected[5][1..5].copy_from_slice(&[1, 1, 1, 1]);
        assert_eq!(state.frame_buffer.pixels(), &expected);
        assert_eq!(state.v[0xF], 0x0);
        assert!(state.frame_buffer.is_dirty());
    }

    #[test]
    fn test_dxyn_drw_twice_restores_and_collides() {
        let mut state = State::new();
        state.frame_buffer.draw_sprite(40, 20, &[0xAA, 0x55]);
        let before = *state.frame_buffer.pixels();
        state.i = 0x300;
        write(&mut state, 0x300, &[0xFF, 0x3C, 0x81]);
        state.v[0x3] = 38;
        state.v[0x4] = 19;

        run(0xD343, &mut state).unwrap();
        assert_ne!(state.frame_buffer.pixels(), &before);
        run(0xD343, &mut state).unwrap();
        assert_eq!(state.frame_buffer.pixels(), &before);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_dxyn_drw_wraps_from_large_coordinates() {
        let mut state = State::new();
        state.i = 0x200;
        write(&mut state, 0x200, &[0x80]);
        state.v[0x1] = 127;
        state.v[0x2] = 33;
        run(0xD121, &mut state).unwrap();
        assert_eq!(state.frame_buffer.pixel(63, 1), 1);
    }

    #[test]
    fn test_dxyn_drw_past_memory_faults() {
        let mut state = State::new();
        state.i = 0xFFE;
        assert_eq!(
            run(0xD003, &mut state),
            Err(Fault::AddressOutOfBounds { address: 0x1000 })
        );
        assert!(!state.frame_buffer.is_dirty());
        assert_eq!(state.pc, 0x200);
    }

    #[test]
    fn test_ex9e_exa1_keys() {
        let mut state = State::new();
        state.v[0x1] = 0xE;
        run(0xE19E, &mut state).unwrap();
        assert_eq!(state.pc, 0x0202);
        run(0xE1A1, &mut state).unwrap();
        assert_eq!(state.pc, 0x0206);

        state.keypad.press(0xE);
        run(0xE19E, &mut state).unwrap();
        assert_eq!(state.pc, 0x020A);
        run(0xE1A1, &mut state).unwrap();
        assert_eq!(state.pc, 0x020C);
    }

    #[test]
    fn test_ex9e_exa1_use_low_nibble_of_vx() {
        let mut state = State::new();
        state.v[0x1] = 0x3E;
        state.keypad.press(0xE);
        run(0xE19E, &mut state).unwrap();
        assert_eq!(state.pc, 0x0204);
        run(0xE1A1, &mut state).unwrap();
        assert_eq!(state.pc, 0x0206);
    }

    #[test]
    fn test_fx07_ld() {
        let mut state = State::new();
        state.timers.delay = 0xF;
        run(0xF107, &mut state).unwrap();
        assert_eq!(state.v[0x1], 0xF);
    }

    #[test]
    fn test_fx0a_sets_latch_without_advancing() {
        let mut state = State::new();
        run(0xF10A, &mut state).unwrap();
        assert_eq!(state.keypad.wait(), KeyWait::AwaitingKey(0x1));
        assert_eq!(state.pc, 0x200);
    }

    #[test]
    fn test_fx15_fx18_ld_timers() {
        let mut state = State::new();
        state.v[0x1] = 0xF;
        run(0xF115, &mut state).unwrap();
        run(0xF118, &mut state).unwrap();
        assert_eq!(state.timers.delay, 0xF);
        assert_eq!(state.timers.sound, 0xF);
        assert_eq!(state.pc, 0x204);
    }

    #[test]
    fn test_fx1e_add() {
        let mut state = State::new();
        state.i = 0x1;
        state.v[0x1] = 0x1;
        run(0xF11E, &mut state).unwrap();
        assert_eq!(state.i, 0x2);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_fx1e_add_overflow() {
        let mut state = State::new();
        state.i = 0xFFF;
        state.v[0x1] = 0x3;
        run(0xF11E, &mut state).unwrap();
        assert_eq!(state.i, 0x002);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_fx29_ld() {
        let mut state = State::new();
        state.v[0x1] = 0x2;
        run(0xF129, &mut state).unwrap();
        assert_eq!(state.i, 0xA);
    }

    #[test]
    fn test_fx33_bcd() {
        let mut state = State::new();
        // 0x7B -> 123
        state.v[0x1] = 0x7B;
        state.i = 0x200;
        run(0xF133, &mut state).unwrap();
        assert_eq!(state.memory.slice(0x200, 3), Ok(&[0x1, 0x2, 0x3][..]));
    }

    #[test]
    fn test_fx55_ld() {
        let mut state = State::new();
        state.i = 0x200;
        state.v[0x0..0x5].copy_from_slice(&[0x1, 0x2, 0x3, 0x4, 0x5]);
        run(0xF455, &mut state).unwrap();
        assert_eq!(
            state.memory.slice(0x200, 6),
            Ok(&[0x1, 0x2, 0x3, 0x4, 0x5, 0x0][..])
        );
        assert_eq!(state.i, 0x200);
    }

    #[test]
    fn test_fx65_ld() {
        let mut state = State::new();
        state.i = 0x200;
        write(&mut state, 0x200, &[0x1, 0x2, 0x3, 0x4, 0x5, 0x6]);
        run(0xF465, &mut state).unwrap();
        assert_eq!(state.v[0x0..0x6], [0x1, 0x2, 0x3, 0x4, 0x5, 0x0]);
    }

    #[test]
    fn test_fx55_past_memory_faults() {
        let mut state = State::new();
        state.i = 0xFFE;
        state.v[0x0..0x3].copy_from_slice(&[0x9, 0x9, 0x9]);
        assert_eq!(
            run(0xF255, &mut state),
            Err(Fault::AddressOutOfBounds { address: 0x1000 })
        );
        assert_eq!(state.memory.slice(0xFFE, 2), Ok(&[0x0, 0x0][..]));
    }

    #[test]
    fn test_fx65_past_memory_faults() {
        let mut state = State::new();
        state.i = 0xFFE;
        state.v[0x0..0x3].copy_from_slice(&[0x9, 0x9, 0x9]);
        assert_eq!(
            run(0xF265, &mut state),
            Err(Fault::AddressOutOfBounds { address: 0x1000 })
        );
        assert_eq!(state.v[0x0..0x3], [0x9, 0x9, 0x9]);
        assert_eq!(state.pc, 0x200);
    }

    #[test]
    fn test_fx33_past_memory_faults() {
        let mut state = State::new();
        state.i = 0xFFE;
        state.v[0x1] = 0xFF;
        assert_eq!(
            run(0xF133, &mut state),
            Err(Fault::AddressOutOfBounds { address: 0x1000 })
        );
        assert_eq!(state.memory.slice(0xFFE, 2), Ok(&[0x0, 0x0][..]));
        assert_eq!(state.pc, 0x200);
    }
}
