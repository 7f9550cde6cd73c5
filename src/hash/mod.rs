//! Streaming message digests: SHA-1, SHA-256, SHA-512 and MD5.
//!
//! ```
//! use streamhash::hash::{create, Algorithm};
//!
//! let mut computation = create("SHA-256").unwrap();
//! computation.update(b"hello ");
//! computation.update(b"world");
//! assert_eq!(
//!     computation.digest().to_hex(),
//!     "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
//! );
//! assert_eq!(Algorithm::Md5.hash(b"").len(), 16);
//! ```

pub mod buffer;
pub mod engine;
pub mod md5;
pub mod sha1;
pub mod sha256;
pub mod sha512;

use std::fmt;
use std::io;
use std::str::FromStr;

use tracing::debug;

use crate::error::{Error, Result};
use self::engine::{Compression, Descriptor, Engine, MAX_DIGEST_SIZE};
use self::md5::Md5State;
use self::sha1::Sha1State;
use self::sha256::Sha256State;
use self::sha512::Sha512State;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Sha1,
    Sha256,
    Sha512,
    Md5,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Sha1,
        Algorithm::Sha256,
        Algorithm::Sha512,
        Algorithm::Md5,
    ];

    /// Canonical tag, as accepted by [`create`].
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Sha1 => "SHA-1",
            Algorithm::Sha256 => "SHA-256",
            Algorithm::Sha512 => "SHA-512",
            Algorithm::Md5 => "MD5",
        }
    }

    pub fn descriptor(&self) -> Descriptor {
        match self {
            Algorithm::Sha1 => Sha1State::DESCRIPTOR,
            Algorithm::Sha256 => Sha256State::DESCRIPTOR,
            Algorithm::Sha512 => Sha512State::DESCRIPTOR,
            Algorithm::Md5 => Md5State::DESCRIPTOR,
        }
    }

    pub fn digest_len(&self) -> usize {
        self.descriptor().digest_len()
    }

    pub fn chunk_size(&self) -> usize {
        self.descriptor().chunk_size
    }

    /// One-shot digest of `data`.
    pub fn hash(&self, data: &[u8]) -> Digest {
        let mut computation = Computation::new(*self);
        computation.update(data);
        computation.digest()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let tag: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match tag.as_str() {
            "sha1" => Ok(Algorithm::Sha1),
            "sha256" => Ok(Algorithm::Sha256),
            "sha512" => Ok(Algorithm::Sha512),
            "md5" => Ok(Algorithm::Md5),
            _ => Err(Error::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Starts a computation for the algorithm named by `tag`.
pub fn create(tag: &str) -> Result<Computation> {
    let algorithm = tag.parse::<Algorithm>()?;
    Ok(Computation::new(algorithm))
}

/// One in-flight hash computation.
///
/// `digest` takes the computation by value, so nothing can be fed into it
/// once the final padding has been applied.
#[derive(Clone)]
pub enum Computation {
    Sha1(Engine<Sha1State>),
    Sha256(Engine<Sha256State>),
    Sha512(Engine<Sha512State>),
    Md5(Engine<Md5State>),
}

macro_rules! with_engine {
    ($computation:expr, $engine:ident => $body:expr) => {
        match $computation {
            Computation::Sha1($engine) => $body,
            Computation::Sha256($engine) => $body,
            Computation::Sha512($engine) => $body,
            Computation::Md5($engine) => $body,
        }
    };
}

impl Computation {
    pub fn new(algorithm: Algorithm) -> Self {
        debug!(algorithm = algorithm.name(), "starting digest");
        match algorithm {
            Algorithm::Sha1 => Computation::Sha1(Engine::new()),
            Algorithm::Sha256 => Computation::Sha256(Engine::new()),
            Algorithm::Sha512 => Computation::Sha512(Engine::new()),
            Algorithm::Md5 => Computation::Md5(Engine::new()),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Computation::Sha1(_) => Algorithm::Sha1,
            Computation::Sha256(_) => Algorithm::Sha256,
            Computation::Sha512(_) => Algorithm::Sha512,
            Computation::Md5(_) => Algorithm::Md5,
        }
    }

    /// Total bytes fed so far.
    pub fn len(&self) -> u64 {
        with_engine!(self, engine => engine.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn update(&mut self, data: &[u8]) {
        with_engine!(self, engine => engine.update(data))
    }

    /// Back to the initial vector with nothing buffered.
    pub fn reset(&mut self) {
        with_engine!(self, engine => engine.reset())
    }

    pub fn digest(self) -> Digest {
        let algorithm = self.algorithm();
        let total = self.len();
        let mut bytes = [0u8; MAX_DIGEST_SIZE];
        let len = with_engine!(self, engine => engine.finish_into(&mut bytes));
        debug!(algorithm = algorithm.name(), bytes = total, "digest finished");
        Digest { bytes, len }
    }
}

impl fmt::Debug for Computation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Computation")
            .field("algorithm", &self.algorithm())
            .field("len", &self.len())
            .finish()
    }
}

impl io::Write for Computation {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Final digest bytes; 20, 32, 64 or 16 long depending on the algorithm.
#[derive(Clone, Copy)]
pub struct Digest {
    bytes: [u8; MAX_DIGEST_SIZE],
    len: usize,
}

impl Digest {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    /// Lowercase hexadecimal rendering.
    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl PartialEq for Digest {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Digest {}

impl PartialEq<[u8]> for Digest {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.as_bytes() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}
