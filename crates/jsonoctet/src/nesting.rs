//! Fixed-size stack of open containers, one bit per level.

use crate::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Container {
    Object,
    Array,
}

/// Bit set for an object, clear for an array. Level `i` lives in bit `i % 8`
/// of byte `i / 8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NestingStack<const N: usize> {
    bits: [u8; N],
    depth: u16,
}

impl<const N: usize> NestingStack<N> {
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) const CAPACITY: u16 = if N * 8 > u16::MAX as usize {
        u16::MAX
    } else {
        (N * 8) as u16
    };

    pub(crate) const fn new() -> Self {
        Self {
            bits: [0; N],
            depth: 0,
        }
    }

    pub(crate) const fn depth(&self) -> u16 {
        self.depth
    }

    pub(crate) fn push(&mut self, container: Container) -> Result<(), ParseError> {
        if self.depth >= Self::CAPACITY {
            return Err(ParseError::TooDeep);
        }
        let (byte, mask) = Self::locate(self.depth);
        let slot = self.bits.get_mut(byte).ok_or(ParseError::TooDeep)?;
        match container {
            Container::Object => *slot |= mask,
            Container::Array => *slot &= !mask,
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn pop(&mut self) -> Option<Container> {
        let top = self.top()?;
        self.depth -= 1;
        Some(top)
    }

    pub(crate) fn top(&self) -> Option<Container> {
        let level = self.depth.checked_sub(1)?;
        let (byte, mask) = Self::locate(level);
        let bits = self.bits.get(byte)?;
        Some(if bits & mask == 0 {
            Container::Array
        } else {
            Container::Object
        })
    }

    const fn locate(level: u16) -> (usize, u8) {
        ((level / 8) as usize, 1 << (level % 8))
    }
}
