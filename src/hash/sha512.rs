//! SHA-512 (512-bit) compression function.
//!
//! Works on 128-byte chunks with 64-bit words and a 16-byte length field.
//! Only the low 64 bits of the length are tracked, so the high half of the
//! field is always zero.

use super::engine::{write_length_be, Compression, Descriptor};

/// SHA-512 initial hash values.
const H: [u64; 8] = [
    0x6a09e667f3bcc908,
    0xbb67ae8584caa73b,
    0x3c6ef372fe94f82b,
    0xa54ff53a5f1d36f1,
    0x510e527fade682d1,
    0x9b05688c2b3e6c1f,
    0x1f83d9abfb41bd6b,
    0x5be0cd19137e2179,
];

/// SHA-512 round constants.
const K: [u64; 80] = [
    0x428a2f98d728ae22, 0x7137449123ef65cd,
    0xb5c0fbcfec4d3b2f, 0xe9b5dba58189dbbc,
    0x3956c25bf348b538, 0x59f111f1b605d019,
    0x923f82a4af194f9b, 0xab1c5ed5da6d8118,
    0xd807aa98a3030242, 0x12835b0145706fbe,
    0x243185be4ee4b28c, 0x550c7dc3d5ffb4e2,
    0x72be5d74f27b896f, 0x80deb1fe3b1696b1,
    0x9bdc06a725c71235, 0xc19bf174cf692694,
    0xe49b69c19ef14ad2, 0xefbe4786384f25e3,
    0x0fc19dc68b8cd5b5, 0x240ca1cc77ac9c65,
    0x2de92c6f592b0275, 0x4a7484aa6ea6e483,
    0x5cb0a9dcbd41fbd4, 0x76f988da831153b5,
    0x983e5152ee66dfab, 0xa831c66d2db43210,
    0xb00327c898fb213f, 0xbf597fc7beef0ee4,
    0xc6e00bf33da88fc2, 0xd5a79147930aa725,
    0x06ca6351e003826f, 0x142929670a0e6e70,
    0x27b70a8546d22ffc, 0x2e1b21385c26c926,
    0x4d2c6dfc5ac42aed, 0x53380d139d95b3df,
    0x650a73548baf63de, 0x766a0abb3c77b2a8,
    0x81c2c92e47edaee6, 0x92722c851482353b,
    0xa2bfe8a14cf10364, 0xa81a664bbc423001,
    0xc24b8b70d0f89791, 0xc76c51a30654be30,
    0xd192e819d6ef5218, 0xd69906245565a910,
    0xf40e35855771202a, 0x106aa07032bbd1b8,
    0x19a4c116b8d2d0c8, 0x1e376c085141ab53,
    0x2748774cdf8eeb99, 0x34b0bcb5e19b48a8,
    0x391c0cb3c5c95a63, 0x4ed8aa4ae3418acb,
    0x5b9cca4f7763e373, 0x682e6ff3d6b2b8a3,
    0x748f82ee5defb2fc, 0x78a5636f43172f60,
    0x84c87814a1f0ab72, 0x8cc702081a6439ec,
    0x90befffa23631e28, 0xa4506cebde82bde9,
    0xbef9a3f7b2c67915, 0xc67178f2e372532b,
    0xca273eceea26619c, 0xd186b8c721c0c207,
    0xeada7dd6cde0eb1e, 0xf57d4f7fee6ed178,
    0x06f067aa72176fba, 0x0a637dc5a2c898a6,
    0x113f9804bef90dae, 0x1b710b35131c471b,
    0x28db77f523047d84, 0x32caab7b40c72493,
    0x3c9ebe0a15c9bebc, 0x431d67c49c100d4c,
    0x4cc5d4becb3e42b6, 0x597f299cfc657e2a,
    0x5fcb6fab3ad6faec, 0x6c44198c4a475817,
];

#[inline]
fn ch(x: u64, y: u64, z: u64) -> u64 { (x & y) ^ (!x & z) }
#[inline]
fn maj(x: u64, y: u64, z: u64) -> u64 { (x & y) ^ (x & z) ^ (y & z) }
#[inline]
fn big_sigma0(x: u64) -> u64 { x.rotate_right(28) ^ x.rotate_right(34) ^ x.rotate_right(39) }
#[inline]
fn big_sigma1(x: u64) -> u64 { x.rotate_right(14) ^ x.rotate_right(18) ^ x.rotate_right(41) }
#[inline]
fn small_sigma0(x: u64) -> u64 { x.rotate_right(1)  ^ x.rotate_right(8)  ^ (x >> 7) }
#[inline]
fn small_sigma1(x: u64) -> u64 { x.rotate_right(19) ^ x.rotate_right(61) ^ (x >> 6) }

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sha512State([u64; 8]);

impl Compression for Sha512State {
    const DESCRIPTOR: Descriptor = Descriptor {
        chunk_size: 128,
        word_bits: 64,
        words: 8,
        length_field: 16,
    };

    fn initial() -> Self {
        Sha512State(H)
    }

    fn compress(&mut self, chunk: &[u8]) {
        let h = &mut self.0;

        let mut w = [0u64; 80];
        for (word, bytes) in w.iter_mut().zip(chunk.chunks_exact(8)) {
            let mut be = [0u8; 8];
            be.copy_from_slice(bytes);
            *word = u64::from_be_bytes(be);
        }
        for t in 16..80 {
            w[t] = small_sigma1(w[t - 2])
                .wrapping_add(w[t - 7])
                .wrapping_add(small_sigma0(w[t - 15]))
                .wrapping_add(w[t - 16]);
        }

        let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut hh] = *h;

        for t in 0..80 {
            let t1 = hh
                .wrapping_add(big_sigma1(e))
                .wrapping_add(ch(e, f, g))
                .wrapping_add(K[t])
                .wrapping_add(w[t]);
            let t2 = big_sigma0(a).wrapping_add(maj(a, b, c));
            hh = g;
            g = f;
            f = e;
            e = d.wrapping_add(t1);
            d = c;
            c = b;
            b = a;
            a = t1.wrapping_add(t2);
        }

        for (word, v) in h.iter_mut().zip([a, b, c, d, e, f, g, hh]) {
            *word = word.wrapping_add(v);
        }
    }

    fn write_length(bits: u64, field: &mut [u8]) {
        write_length_be(bits, field)
    }

    fn write_digest(&self, out: &mut [u8]) {
        for (bytes, word) in out.chunks_exact_mut(8).zip(self.0.iter()) {
            bytes.copy_from_slice(&word.to_be_bytes());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Sha512State;
    use crate::hash::engine::{Engine, MAX_DIGEST_SIZE};

    fn hash(input: &[u8]) -> String {
        let mut engine = Engine::<Sha512State>::new();
        engine.update(input);
        let mut out = [0u8; MAX_DIGEST_SIZE];
        let len = engine.finish_into(&mut out);
        assert_eq!(len, 64);
        hex::encode(&out[..len])
    }

    #[test]
    fn known_vectors() {
        assert_eq!(
            hash(b""),
            "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
             47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
        );
        assert_eq!(
            hash(b"abc"),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
        assert_eq!(
            hash(b"hello world"),
            "309ecc489c12d6eb4cc40f50c902f2b4d0ed77ee511a7c7a9bcd3ca86d4cd86f\
             989dd35bc5ff499670da34255b45b0cfd830e81f605dcf7dc5542e93ae9cd76f"
        );
        assert_eq!(
            hash(b"The quick brown fox jumps over the lazy dog"),
            "07e547d9586f6a73f73fbac0435ed76951218fb7d0c8d788a309d785436bbb64\
             2e93a252a954f23912547d1e8a3b5ed6e1bfd7097821233fa0538f3db854fee6"
        );
    }

    #[test]
    fn chunk_boundaries() {
        assert_eq!(
            hash(&[b'i'; 128]),
            "76b9c0fd4f62bee4541f092d0fd2869fe6f06ca6725be4611c84e27a8641d61a\
             def6020be49c1116284346a8962bed7d5b3df03618cb9273fa5de0b9104a51e8"
        );
        assert_eq!(
            hash(&[b'i'; 129]),
            "34a15944d86a67fd7b4083502fb5f08b6ae35edd4b4a56d6ae46b45c950a515f\
             79824a933958988dacb42ed71dc30e0d1398d0d9fcf1799d35a3c39aeccbd19f"
        );
    }

    #[test]
    fn length_field_boundary() {
        // 111 bytes leave exactly room for 0x80 and the 16-byte length.
        assert_eq!(
            hash(&[b'i'; 111]),
            "1d1587954425e7c8ab25c23e2bfc6cb4352099353088d39e6adb9d14be65877b\
             15f1b8bbdeae795828959c1ffa46f3c2bfc9b76d50a18c6a64f8da3fa19d2dd1"
        );
        assert_eq!(
            hash(&[b'i'; 112]),
            "6d5c7c2f505a1767f717a6f9c3787270093c5c331b514413395f9ecb1f9b1fa6\
             2514f64e862ba08c3c5a60dde89fdfd9c18e42529399c758c957b78ed9c33221"
        );
    }
}
