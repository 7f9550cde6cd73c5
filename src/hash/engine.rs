//! Generic buffering, padding and finalization shared by every algorithm.
//!
//! An algorithm plugs in by implementing [`Compression`]: a running state,
//! its initial vector, the per-chunk compression step and the two
//! byte-order decisions (length field and output words). [`Engine`] owns
//! one such state plus a [`ChunkBuffer`] and does everything else.

use super::buffer::{ChunkBuffer, MAX_CHUNK_SIZE};

/// Largest digest any supported algorithm produces (SHA-512).
pub const MAX_DIGEST_SIZE: usize = 64;

/// Fixed parameters of one algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Descriptor {
    /// Bytes per compression call.
    pub chunk_size: usize,
    /// Bits per state word.
    pub word_bits: u32,
    /// Number of state words.
    pub words: usize,
    /// Bytes reserved for the message length at the end of the padding.
    pub length_field: usize,
}

impl Descriptor {
    pub const fn digest_len(&self) -> usize {
        self.words * (self.word_bits as usize / 8)
    }
}

pub trait Compression: Copy {
    const DESCRIPTOR: Descriptor;

    /// The published initial hash value.
    fn initial() -> Self;

    /// Folds exactly one chunk of `DESCRIPTOR.chunk_size` bytes into the state.
    fn compress(&mut self, chunk: &[u8]);

    /// Writes the message bit length into the `length_field`-byte tail.
    fn write_length(bits: u64, field: &mut [u8]);

    /// Serializes the state words into `out` (`digest_len()` bytes).
    fn write_digest(&self, out: &mut [u8]);
}

/// Big-endian length field, zero-extended on the left to the field width.
pub(crate) fn write_length_be(bits: u64, field: &mut [u8]) {
    let (high, low) = field.split_at_mut(field.len() - 8);
    high.fill(0);
    low.copy_from_slice(&bits.to_be_bytes());
}

#[derive(Clone)]
pub struct Engine<S: Compression> {
    state: S,
    buffer: ChunkBuffer,
}

impl<S: Compression> Default for Engine<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Compression> Engine<S> {
    pub fn new() -> Self {
        Engine {
            state: S::initial(),
            buffer: ChunkBuffer::new(S::DESCRIPTOR.chunk_size),
        }
    }

    pub fn reset(&mut self) {
        self.state = S::initial();
        self.buffer.clear();
    }

    /// Total bytes fed so far.
    pub fn len(&self) -> u64 {
        self.buffer.total_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn update(&mut self, data: &[u8]) {
        let state = &mut self.state;
        self.buffer.input(data, |chunk| state.compress(chunk));
    }

    /// Pads the pending bytes, runs the final one or two chunks and writes
    /// the digest into `out`. Returns the digest length.
    pub fn finish_into(self, out: &mut [u8; MAX_DIGEST_SIZE]) -> usize {
        let state = self.pad();
        let len = S::DESCRIPTOR.digest_len();
        state.write_digest(&mut out[..len]);
        len
    }

    fn pad(mut self) -> S {
        let Descriptor {
            chunk_size,
            length_field,
            ..
        } = S::DESCRIPTOR;

        let bits = self.buffer.total_len().wrapping_mul(8);
        let pending = self.buffer.pending();

        // 0x80 plus the length field must fit after the pending bytes,
        // otherwise the padding spills into an extra all-padding chunk.
        let mut last = [0u8; 2 * MAX_CHUNK_SIZE];
        last[..pending.len()].copy_from_slice(pending);
        last[pending.len()] = 0x80;
        let end = if pending.len() + 1 + length_field <= chunk_size {
            chunk_size
        } else {
            2 * chunk_size
        };
        S::write_length(bits, &mut last[end - length_field..end]);

        for chunk in last[..end].chunks_exact(chunk_size) {
            self.state.compress(chunk);
        }
        self.state
    }
}
