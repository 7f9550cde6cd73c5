//! SHA-1 (160-bit) compression function.

use super::engine::{write_length_be, Compression, Descriptor};

/// Initial SHA-1 hash values (h0..h4).
const H: [u32; 5] = [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476, 0xC3D2E1F0];

/// SHA-1 round constant for round `t`.
#[inline]
fn k(t: usize) -> u32 {
    match t {
        0..=19 => 0x5A827999,
        20..=39 => 0x6ED9EBA1,
        40..=59 => 0x8F1BBCDC,
        _ => 0xCA62C1D6,
    }
}

/// SHA-1 nonlinear function for round `t`.
#[inline]
fn f(t: usize, b: u32, c: u32, d: u32) -> u32 {
    match t {
        0..=19 => (b & c) | ((!b) & d),
        20..=39 => b ^ c ^ d,
        40..=59 => (b & c) | (b & d) | (c & d),
        _ => b ^ c ^ d,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sha1State([u32; 5]);

impl Compression for Sha1State {
    const DESCRIPTOR: Descriptor = Descriptor {
        chunk_size: 64,
        word_bits: 32,
        words: 5,
        length_field: 8,
    };

    fn initial() -> Self {
        Sha1State(H)
    }

    fn compress(&mut self, chunk: &[u8]) {
        let h = &mut self.0;

        // Message schedule
        let mut w = [0u32; 80];
        for (word, bytes) in w.iter_mut().zip(chunk.chunks_exact(4)) {
            *word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }
        for t in 16..80 {
            w[t] = (w[t - 3] ^ w[t - 8] ^ w[t - 14] ^ w[t - 16]).rotate_left(1);
        }

        let [mut a, mut b, mut c, mut d, mut e] = *h;

        for (t, &wt) in w.iter().enumerate() {
            let temp = a
                .rotate_left(5)
                .wrapping_add(f(t, b, c, d))
                .wrapping_add(e)
                .wrapping_add(k(t))
                .wrapping_add(wt);
            e = d;
            d = c;
            c = b.rotate_left(30);
            b = a;
            a = temp;
        }

        h[0] = h[0].wrapping_add(a);
        h[1] = h[1].wrapping_add(b);
        h[2] = h[2].wrapping_add(c);
        h[3] = h[3].wrapping_add(d);
        h[4] = h[4].wrapping_add(e);
    }

    fn write_length(bits: u64, field: &mut [u8]) {
        write_length_be(bits, field)
    }

    fn write_digest(&self, out: &mut [u8]) {
        for (bytes, word) in out.chunks_exact_mut(4).zip(self.0.iter()) {
            bytes.copy_from_slice(&word.to_be_bytes());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Sha1State;
    use crate::hash::engine::{Compression, Engine, MAX_DIGEST_SIZE};

    fn hash(input: &[u8]) -> String {
        let mut engine = Engine::<Sha1State>::new();
        engine.update(input);
        let mut out = [0u8; MAX_DIGEST_SIZE];
        let len = engine.finish_into(&mut out);
        hex::encode(&out[..len])
    }

    #[test]
    fn digest_is_twenty_bytes() {
        assert_eq!(Sha1State::DESCRIPTOR.digest_len(), 20);
    }

    #[test]
    fn known_vectors() {
        assert_eq!(hash(b""), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
        assert_eq!(hash(b"abc"), "a9993e364706816aba3e25717850c26c9cd0d89d");
        assert_eq!(hash(b"Kevin"), "e043899daa0c7add37bc99792b2c045d6abbc6dc");
        assert_eq!(
            hash(b"The quick brown fox jumps over the lazy dog"),
            "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12"
        );
        assert_eq!(hash(b"testing\n"), "9801739daae44ec5293d4e1f53d3f4d2d426d91c");
    }

    #[test]
    fn chunk_boundaries() {
        assert_eq!(hash(&[b'i'; 64]), "79c64455d4565a82bc3f4ec5d9a5e8443c2e77b3");
        assert_eq!(hash(&[b'i'; 65]), "6658b01c97fd6db0bdb010b2e154164285e5bd71");
        assert_eq!(hash(&[b'x'; 55]), "cef734ba81a024479e09eb5a75b6ddae62e6abf1");
        assert_eq!(hash(&[b'x'; 57]), "025ecbd5d70f8fb3c5457cd96bab13fda305dc59");
    }

    #[test]
    fn repeated_small_updates() {
        let mut engine = Engine::<Sha1State>::new();
        for _ in 0..1000 {
            engine.update(b"The quick brown fox jumps over the lazy dog.");
        }
        let mut out = [0u8; MAX_DIGEST_SIZE];
        let len = engine.finish_into(&mut out);
        assert_eq!(hex::encode(&out[..len]), "7ca27655f67fceaa78ed2e645a81c7f1d6e249d2");
    }
}
