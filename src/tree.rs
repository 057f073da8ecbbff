//! The tree façade (§4.7, component G): binds the hasher, a storage
//! backend, the range hasher, the subroot cache, and proof construction
//! behind `append`/`get_size`/`get_state`/`get_leaf`/`prove_inclusion`/
//! `prove_consistency`. No persistence lives here — every durable byte is
//! delegated to [`Storage`].

use crate::{
    cache::SubrootCache,
    digest::{Algorithm, Digest, Hasher},
    error::{Error, Result},
    proof::{build_consistency_proof, build_inclusion_proof, Proof, ProofMetadata},
    range::RangeHasher,
    storage::Storage,
};

/// Construction options for [`MerkleTree`] (§4.7).
///
/// Defaults match the spec exactly: `security` on, a 128-leaf cache
/// threshold, a 1 GiB cache budget, cache enabled, iterative subroot
/// computation enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    pub algorithm: Algorithm,
    pub security: bool,
    pub cache_threshold: u64,
    pub cache_capacity_bytes: u64,
    pub disable_cache: bool,
    /// Reserved for testing (§4.7): forces the naive recursive `root()`
    /// formula instead of the iterative subroot decomposition. Never a
    /// performance-relevant switch in production use.
    pub disable_subroot_iteration: bool,
}

impl Default for TreeConfig {
    #[inline]
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Sha256,
            security: true,
            cache_threshold: 128,
            cache_capacity_bytes: 1 << 30,
            disable_cache: false,
            disable_subroot_iteration: false,
        }
    }
}

/// An append-only, indexed Merkle log over a [`Storage`] backend (§4.7).
///
/// Holds a [`Hasher`] value, the backend, and an optional [`SubrootCache`]
/// by composition rather than inheritance — proof construction and range
/// hashing are free functions operating over borrows of these three.
pub struct MerkleTree<S: Storage> {
    storage: S,
    hasher: Hasher,
    cache: Option<SubrootCache>,
    iterative: bool,
}

impl<S: Storage> MerkleTree<S> {
    /// Builds a tree over `storage`, configured per `config`.
    #[inline]
    pub fn new(storage: S, config: TreeConfig) -> Self {
        let hasher = Hasher::new(config.algorithm, config.security);
        let cache = (!config.disable_cache)
            .then(|| SubrootCache::new(config.cache_threshold, config.cache_capacity_bytes));

        tracing::info!(
            algorithm = %config.algorithm,
            security = config.security,
            cache_enabled = cache.is_some(),
            "constructing merkle tree"
        );

        Self {
            storage,
            hasher,
            cache,
            iterative: !config.disable_subroot_iteration,
        }
    }

    #[inline]
    fn range(&self) -> RangeHasher<'_> {
        RangeHasher::new(&self.storage, &self.hasher, self.cache.as_ref(), self.iterative)
    }

    /// The backend handle, for callers that need direct access (e.g. to
    /// inspect a reference backend in tests).
    #[inline]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Appends `entry`, returning its new 1-based index (§4.7).
    ///
    /// Not safe to call concurrently with itself on the same tree (§5);
    /// callers must serialize writers.
    #[inline]
    pub fn append(&self, entry: &[u8]) -> Result<u64> {
        let index = self.storage.append(entry)?;
        tracing::debug!(index, "appended entry");
        Ok(index)
    }

    /// The number of leaves currently stored.
    #[inline]
    pub fn get_size(&self) -> Result<u64> {
        self.storage.size()
    }

    /// `get_state()` — `get_state(current_size)` (§4.7).
    #[inline]
    pub fn get_state(&self) -> Result<Digest> {
        let size = self.get_size()?;
        self.get_state_at(size)
    }

    /// `get_state(size)` for any `0 <= size <= current_size` (§4.7).
    /// `get_state(0) = hash_empty()`.
    #[inline]
    pub fn get_state_at(&self, size: u64) -> Result<Digest> {
        let current = self.get_size()?;
        if size > current {
            return Err(Error::InvalidChallenge(format!(
                "requested size {} exceeds current size {}",
                size, current
            )));
        }
        self.range().root(0, size)
    }

    /// The digest of the leaf at `index` (1-based).
    #[inline]
    pub fn get_leaf(&self, index: u64) -> Result<Digest> {
        self.storage.leaf(index)
    }

    /// `prove_inclusion(index, size)` — evidence that leaf `index`
    /// participates in the tree of size `size` (§4.5.1).
    #[inline]
    pub fn prove_inclusion(&self, index: u64, size: u64) -> Result<Proof> {
        let current = self.get_size()?;
        if size > current {
            return Err(Error::InvalidChallenge(format!(
                "requested size {} exceeds current size {}",
                size, current
            )));
        }

        let range = self.range();
        let (path, rule) = build_inclusion_proof(&range, index, size)?;
        Ok(Proof {
            metadata: ProofMetadata {
                algorithm: self.hasher.algorithm(),
                security: self.hasher.security(),
                size,
            },
            path,
            rule,
            subset: Vec::new(),
        })
    }

    /// `prove_consistency(size1, size2)` — evidence that the state at
    /// `size1` is a prefix of the state at `size2` (§4.5.2).
    #[inline]
    pub fn prove_consistency(&self, size1: u64, size2: u64) -> Result<Proof> {
        let current = self.get_size()?;
        if size2 > current {
            return Err(Error::InvalidChallenge(format!(
                "requested size {} exceeds current size {}",
                size2, current
            )));
        }

        let range = self.range();
        let (path, rule, subset) = build_consistency_proof(&range, size1, size2)?;
        Ok(Proof {
            metadata: ProofMetadata {
                algorithm: self.hasher.algorithm(),
                security: self.hasher.security(),
                size: size2,
            },
            path,
            rule,
            subset,
        })
    }
}
