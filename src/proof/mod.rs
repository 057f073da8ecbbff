//! The `Proof` value type and the fold logic shared by both proof
//! constructors and both verifiers (§3 "Proof", §4.5, §4.6).

mod consistency;
mod inclusion;

pub(crate) use consistency::build_consistency_proof;
pub(crate) use inclusion::build_inclusion_proof;

pub(crate) use crate::range::split_point;
use crate::{
    digest::{Algorithm, Digest, Hasher},
    error::{Error, InvalidProofKind, Result},
};

/// Which side of the running accumulator a path digest folds in on.
///
/// `Left` means the digest is the left argument of `hash_nodes` and the
/// accumulator is the right; `Right` is the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldDirection {
    Left,
    Right,
}

/// The size and hashing parameters a proof was produced against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofMetadata {
    pub algorithm: Algorithm,
    pub security: bool,
    pub size: u64,
}

/// An inclusion or consistency proof (§3).
///
/// `path` is an ordered sequence of digests; `rule` records, for each
/// non-seed element, which side of the running fold it occupies. `subset`
/// is empty for inclusion proofs; for consistency proofs it marks which
/// `path` indices also fold (self-seeded, in their relative order) to the
/// earlier state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proof {
    pub metadata: ProofMetadata,
    pub path: Vec<Digest>,
    pub rule: Vec<FoldDirection>,
    pub subset: Vec<bool>,
}

impl Proof {
    #[inline]
    fn check_shape(&self) -> Result<()> {
        if self.path.len() != self.rule.len() {
            return Err(Error::invalid_proof(InvalidProofKind::MalformedProof));
        }
        if !self.subset.is_empty() && self.subset.len() != self.path.len() {
            return Err(Error::invalid_proof(InvalidProofKind::MalformedProof));
        }
        Ok(())
    }

    /// Folds `path` under `rule`, starting from an externally supplied
    /// `seed` (the pattern inclusion proofs use — the seed is the leaf
    /// digest, never itself a path element).
    #[inline]
    pub(crate) fn fold_from_seed(&self, hasher: &Hasher, seed: &Digest) -> Result<Digest> {
        self.check_shape()?;
        Ok(fold(hasher, seed.clone(), &self.path, &self.rule))
    }

    /// Folds the entire `path`, self-seeded from its own first element (the
    /// pattern consistency proofs use to reconstruct the later state).
    #[inline]
    pub(crate) fn fold_all_self_seeded(&self, hasher: &Hasher) -> Result<Digest> {
        self.check_shape()?;
        if self.path.is_empty() {
            return Ok(hasher.hash_empty());
        }
        let seed = self.path[0].clone();
        Ok(fold(hasher, seed, &self.path[1..], &self.rule[1..]))
    }

    /// Folds only the `subset`-marked elements of `path`, in their original
    /// relative order, self-seeded from the first marked element (the
    /// pattern consistency proofs use to reconstruct the earlier state).
    #[inline]
    pub(crate) fn fold_subset_self_seeded(&self, hasher: &Hasher) -> Result<Digest> {
        self.check_shape()?;
        if self.subset.is_empty() || !self.subset.iter().any(|&m| m) {
            return Ok(hasher.hash_empty());
        }

        let members: Vec<usize> = self
            .subset
            .iter()
            .enumerate()
            .filter_map(|(i, &marked)| marked.then_some(i))
            .collect();

        let seed = self.path[members[0]].clone();
        let mut acc = seed;
        for &i in &members[1..] {
            acc = match self.rule[i] {
                FoldDirection::Left => hasher.hash_nodes(&self.path[i], &acc),
                FoldDirection::Right => hasher.hash_nodes(&acc, &self.path[i]),
            };
        }
        Ok(acc)
    }
}

#[inline]
fn fold(hasher: &Hasher, seed: Digest, path: &[Digest], rule: &[FoldDirection]) -> Digest {
    let mut acc = seed;
    for (digest, dir) in path.iter().zip(rule) {
        acc = match dir {
            FoldDirection::Left => hasher.hash_nodes(digest, &acc),
            FoldDirection::Right => hasher.hash_nodes(&acc, digest),
        };
    }
    acc
}
