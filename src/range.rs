//! The range hasher `root(offset, width)` (§4.3) — the recursive Merkle
//! hash over any contiguous leaf sub-range, computed iteratively over
//! power-of-two "subroot" ranges rather than by naive recursion.

use crate::{
    cache::SubrootCache,
    digest::{Digest, Hasher},
    error::Result,
    storage::Storage,
};

/// Computes `root(offset, width)` over a backend, optionally consulting a
/// [`SubrootCache`] and optionally forcing the naive recursive formula for
/// cross-checking (§4.7's `disable_subroot_iteration` testing knob).
pub struct RangeHasher<'a> {
    storage: &'a dyn Storage,
    hasher: &'a Hasher,
    cache: Option<&'a SubrootCache>,
    iterative: bool,
}

impl<'a> RangeHasher<'a> {
    #[inline]
    pub fn new(
        storage: &'a dyn Storage,
        hasher: &'a Hasher,
        cache: Option<&'a SubrootCache>,
        iterative: bool,
    ) -> Self {
        Self {
            storage,
            hasher,
            cache,
            iterative,
        }
    }

    /// `root(offset, width)` — the digest of the subtree spanning leaf
    /// indices `[offset+1, offset+width]`.
    #[inline]
    pub fn root(&self, offset: u64, width: u64) -> Result<Digest> {
        if width == 0 {
            return Ok(self.hasher.hash_empty());
        }
        if width == 1 {
            return self.storage.leaf(offset + 1);
        }

        if !self.iterative {
            return self.root_recursive(offset, width);
        }

        let mut remaining = width;
        let mut cursor = offset;
        let mut subroots = Vec::new();

        while remaining > 0 {
            let k = ilog2(remaining);
            let w = 1u64 << k;
            subroots.push(self.subroot(cursor, k)?);
            cursor += w;
            remaining -= w;
        }

        let mut iter = subroots.into_iter().rev();
        let mut acc = iter.next().expect("width > 0 implies at least one subroot");
        for s in iter {
            acc = self.hasher.hash_nodes(&s, &acc);
        }
        Ok(acc)
    }

    /// The naive recursive formula of §4.3's "general case", kept only to
    /// cross-check the iterative formulation under
    /// `disable_subroot_iteration`.
    fn root_recursive(&self, offset: u64, width: u64) -> Result<Digest> {
        if width == 0 {
            return Ok(self.hasher.hash_empty());
        }
        if width == 1 {
            return self.storage.leaf(offset + 1);
        }

        let p = split_point(width);
        let left = self.root_recursive(offset, p)?;
        let right = self.root_recursive(offset + p, width - p)?;
        Ok(self.hasher.hash_nodes(&left, &right))
    }

    /// `root(offset, 2^k)`, consulting the subroot cache when the width is
    /// at or above its threshold (§4.4).
    fn subroot(&self, offset: u64, k: u32) -> Result<Digest> {
        let width = 1u64 << k;

        let Some(cache) = self.cache else {
            return self.compute_subroot(offset, width);
        };

        if width < cache.threshold() {
            return self.compute_subroot(offset, width);
        }

        if let Some(hit) = cache.get(offset, width) {
            tracing::trace!(offset, width, "subroot cache hit");
            return Ok(hit);
        }

        tracing::trace!(offset, width, "subroot cache miss");
        let digest = self.compute_subroot(offset, width)?;
        cache.insert(offset, width, digest.clone());
        Ok(digest)
    }

    /// Computes a power-of-two subroot by hashing up a binary forest of
    /// leaf digests fetched in one backend call, without recursion and
    /// without allocating beyond the working buffer (§4.3's memory
    /// discipline).
    fn compute_subroot(&self, offset: u64, width: u64) -> Result<Digest> {
        let mut level = self.storage.leaves(offset, width)?;
        while level.len() > 1 {
            let mut next = Vec::with_capacity(level.len() / 2);
            for pair in level.chunks(2) {
                next.push(self.hasher.hash_nodes(&pair[0], &pair[1]));
            }
            level = next;
        }
        Ok(level
            .into_iter()
            .next()
            .expect("width >= 1 implies a non-empty level"))
    }
}

/// `floor(log2(n))` for `n >= 1`.
#[inline]
fn ilog2(n: u64) -> u32 {
    63 - n.leading_zeros()
}

/// The split point used by the recursive `root()` formula: the largest
/// power of two less than `width`, except when `width` is itself a power
/// of two, in which case `width / 2` (§4.3). Shared with the proof
/// constructors so that range hashing and proof paths agree on tree shape.
#[inline]
pub(crate) fn split_point(width: u64) -> u64 {
    let highest = 1u64 << ilog2(width);
    if highest == width {
        highest / 2
    } else {
        highest
    }
}
