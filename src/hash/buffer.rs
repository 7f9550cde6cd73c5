//! Accumulates arbitrary-length writes into fixed-size processing chunks.

/// Largest chunk any supported algorithm consumes (SHA-512's 1024-bit block).
pub const MAX_CHUNK_SIZE: usize = 128;

/// Holds at most one partial chunk between `input` calls.
///
/// `processed` counts only bytes that have been handed to the compression
/// callback, so it is always a multiple of the chunk size.
#[derive(Clone)]
pub struct ChunkBuffer {
    chunk_size: usize,
    block: [u8; MAX_CHUNK_SIZE],
    len: usize,
    processed: u64,
}

impl ChunkBuffer {
    pub fn new(chunk_size: usize) -> Self {
        debug_assert!(chunk_size > 0 && chunk_size <= MAX_CHUNK_SIZE);
        ChunkBuffer {
            chunk_size,
            block: [0; MAX_CHUNK_SIZE],
            len: 0,
            processed: 0,
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Bytes currently waiting for a full chunk.
    pub fn pending(&self) -> &[u8] {
        &self.block[..self.len]
    }

    /// Bytes that have already gone through the compression callback.
    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// Total message length seen so far.
    pub fn total_len(&self) -> u64 {
        self.processed.wrapping_add(self.len as u64)
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.processed = 0;
    }

    /// Feeds `input`, calling `f` once for every completed chunk.
    pub fn input<F>(&mut self, mut input: &[u8], mut f: F)
    where
        F: FnMut(&[u8]),
    {
        let size = self.chunk_size;

        if self.len > 0 {
            let room = size - self.len;
            if input.len() < room {
                self.block[self.len..self.len + input.len()].copy_from_slice(input);
                self.len += input.len();
                return;
            }
            self.block[self.len..size].copy_from_slice(&input[..room]);
            f(&self.block[..size]);
            self.processed = self.processed.wrapping_add(size as u64);
            self.len = 0;
            input = &input[room..];
        }

        let mut chunks = input.chunks_exact(size);
        for chunk in &mut chunks {
            f(chunk);
            self.processed = self.processed.wrapping_add(size as u64);
        }

        let rest = chunks.remainder();
        self.block[..rest.len()].copy_from_slice(rest);
        self.len = rest.len();
    }
}
