use crate::constants::STACK_DEPTH;
use crate::error::Fault;

/// Return addresses for subroutine calls, capped at `STACK_DEPTH` frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallStack {
    frames: [u16; STACK_DEPTH],
    depth: usize,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack {
            frames: [0; STACK_DEPTH],
            depth: 0,
        }
    }

    pub fn push(&mut self, address: u16) -> Result<(), Fault> {
        let slot = self.frames.get_mut(self.depth).ok_or(Fault::StackOverflow)?;
        *slot = address;
        self.depth += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, Fault> {
        if self.depth == 0 {
            return Err(Fault::StackUnderflow);
        }
        self.depth -= 1;
        Ok(self.frames[self.depth])
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The most recently pushed address.
    pub fn top(&self) -> Option<u16> {
        self.depth.checked_sub(1).map(|i| self.frames[i])
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_then_pop() {
        let mut stack = CallStack::new();
        stack.push(0x200).unwrap();
        stack.push(0x300).unwrap();
        assert_eq!(stack.top(), Some(0x300));
        assert_eq!(stack.pop(), Ok(0x300));
        assert_eq!(stack.pop(), Ok(0x200));
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_pop_empty_underflows() {
        let mut stack = CallStack::new();
        assert_eq!(stack.pop(), Err(Fault::StackUnderflow));
        assert_eq!(stack.top(), None);
    }

    #[test]
    fn test_push_past_capacity_overflows_without_mutating() {
        let mut stack = CallStack::new();
        for frame in 0..STACK_DEPTH as u16 {
            stack.push(frame).unwrap();
        }
        let full = stack;
        assert_eq!(stack.push(0xABC), Err(Fault::StackOverflow));
        assert_eq!(stack, full);
    }
}
