//! Chunk descriptors for EEPROM transfers.
//!
//! A run is split into [`CHUNK_SIZE`]-byte control transfers. The EEPROM
//! address of chunk *i* is always `start + 64 * i`: it advances by the fixed
//! chunk size no matter how many bytes the previous transfer actually moved.
//! That is only consistent when a short transfer happens on the last chunk,
//! which is why the transfer loops flag any earlier short chunk.

use crate::constants::CHUNK_SIZE;

/// One control transfer of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    /// Position of this chunk in the run, starting at 0.
    pub index: usize,
    /// EEPROM address of the first byte.
    pub address: u32,
    /// Bytes requested by this chunk (at most [`CHUNK_SIZE`]).
    pub size: u16,
}

impl Chunk {
    /// The address as sent in the 16-bit `wValue` field.
    #[inline]
    pub fn wire_address(&self) -> u16 {
        self.address as u16
    }
}

/// Iterator over the chunks covering `length` bytes from `start_address`.
///
/// The loop state is `(remaining, next_address)`; each step consumes the
/// requested size and advances the address by [`CHUNK_SIZE`].
#[derive(Debug, Clone)]
pub struct ChunkPlan {
    next_address: u32,
    remaining: u32,
    index: usize,
}

impl ChunkPlan {
    /// Plan a run of `length` bytes starting at `start_address`.
    pub fn new(start_address: u32, length: u32) -> Self {
        Self {
            next_address: start_address,
            remaining: length,
            index: 0,
        }
    }

    /// Bytes not yet handed out.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Whether the planned range runs past the 16-bit address space and
    /// therefore wraps around on the wire.
    pub fn wraps(start_address: u32, length: u32) -> bool {
        u64::from(start_address) + u64::from(length) > 0x1_0000
    }
}

impl Iterator for ChunkPlan {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        if self.remaining == 0 {
            return None;
        }

        let size = self.remaining.min(u32::from(CHUNK_SIZE));
        let chunk = Chunk {
            index: self.index,
            address: self.next_address,
            size: size as u16,
        };

        self.remaining -= size;
        self.next_address = self.next_address.wrapping_add(u32::from(CHUNK_SIZE));
        self.index += 1;

        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining.div_ceil(u32::from(CHUNK_SIZE)) as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for ChunkPlan {}
