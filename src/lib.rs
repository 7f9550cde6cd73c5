//! Streaming SHA-1, SHA-256, SHA-512 and MD5 over incrementally fed bytes.

pub mod error;
pub mod fs;
pub mod hash;
pub mod io;

pub use error::{Error, Result};
pub use hash::{create, Algorithm, Computation, Digest};
