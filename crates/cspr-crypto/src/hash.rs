//! Blake2b-256 hashing

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest as _};
use cspr_primitives::Digest;

/// Length of a Blake2b-256 digest in bytes
pub const BLAKE2B_DIGEST_LENGTH: usize = 32;

type Blake2b256 = Blake2b<U32>;

/// Compute the Blake2b-256 hash of the input data
pub fn blake2b256(data: &[u8]) -> Digest {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    let result = hasher.finalize();
    Digest::from_bytes(result.into())
}
