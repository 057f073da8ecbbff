//! Storage backend contract (§4.2 / §6.1).
//!
//! The core never touches files or databases directly — it asks a
//! [`Storage`] implementation for leaf digests by index or range. A backend
//! is responsible for converting an entry to a blob, hashing it with the
//! same [`Hasher`](crate::digest::Hasher) configuration the tree was built
//! with, and returning that precomputed digest thereafter (§9: precompute
//! at append, never hash-on-read).

pub mod memory;
pub mod redb;

use crate::{digest::Digest, error::Result};

/// An append-only, indexed store of entry blobs and their leaf digests.
///
/// Implementations must be `Send + Sync`: per §5, a single write (`append`)
/// is never safe concurrently with itself, but reads (`leaf`, `leaves`,
/// `size`) must be safe from any thread, including one racing a concurrent
/// writer, provided the backend gives read-during-append consistency.
pub trait Storage: Send + Sync {
    /// The number of leaves currently stored.
    fn size(&self) -> Result<u64>;

    /// Appends a new entry, returning its 1-based index.
    ///
    /// The backend must compute and persist `hash_leaf(encode(entry))`
    /// using the hasher the tree was configured with at this point, not
    /// lazily on first read.
    fn append(&self, entry: &[u8]) -> Result<u64>;

    /// Returns the digest of the leaf at `index` (1-based).
    ///
    /// `index` must lie in `[1, size()]`; anything else is
    /// [`Error::IndexOutOfRange`](crate::error::Error::IndexOutOfRange).
    fn leaf(&self, index: u64) -> Result<Digest>;

    /// Returns the digests of leaves `[offset+1, offset+width]`, in order.
    ///
    /// Requires `offset + width <= size()`.
    fn leaves(&self, offset: u64, width: u64) -> Result<Vec<Digest>>;
}
