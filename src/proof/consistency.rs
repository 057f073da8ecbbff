//! `prove_consistency(size1, size2)` (§4.5.2).
//!
//! The naive "decompose `size1`, separately decompose the extension"
//! description does not actually fold back to `root(0, size2)` in general,
//! because the two decompositions don't nest into the same binary
//! structure as the real tree (hash_nodes isn't associative across a
//! differently-grouped leaf range). This instead walks the same kind of
//! recursive boundary search used for inclusion proofs, but targets the
//! `size1` boundary within `[0, size2)` rather than a single leaf.

use super::{split_point, FoldDirection};
use crate::{
    digest::Digest,
    error::{Error, Result},
    range::RangeHasher,
};

pub(crate) fn build_consistency_proof(
    range: &RangeHasher,
    size1: u64,
    size2: u64,
) -> Result<(Vec<Digest>, Vec<FoldDirection>, Vec<bool>)> {
    if size1 > size2 {
        return Err(Error::InvalidChallenge(format!(
            "consistency size1 {} exceeds size2 {}",
            size1, size2
        )));
    }

    if size1 == 0 {
        let (path, rule) = full_decomposition(range, size2)?;
        let subset = vec![false; path.len()];
        return Ok((path, rule, subset));
    }

    let mut path = Vec::new();
    let mut rule = Vec::new();
    let mut subset = Vec::new();
    boundary(range, 0, size2, size1, &mut path, &mut rule, &mut subset)?;
    Ok((path, rule, subset))
}

/// The plain top-level iterative decomposition of `root(0, width)` (§4.3),
/// recorded as a self-contained, self-seeded foldable sequence instead of
/// collapsed into a single digest. Used only for the `size1 == 0` edge
/// case, where there is no historical boundary to search for.
fn full_decomposition(range: &RangeHasher, width: u64) -> Result<(Vec<Digest>, Vec<FoldDirection>)> {
    if width == 0 {
        return Ok((Vec::new(), Vec::new()));
    }

    let mut remaining = width;
    let mut cursor = 0u64;
    let mut subroots = Vec::new();
    while remaining > 0 {
        let k = 63 - remaining.leading_zeros();
        let w = 1u64 << k;
        subroots.push(range.root(cursor, w)?);
        cursor += w;
        remaining -= w;
    }

    // §4.3 folds right-to-left: acc = S_r (smallest, rightmost), then for
    // each preceding S_j, acc = hash_nodes(S_j, acc). Storing the smallest
    // subroot first lets a forward, self-seeded fold (seed = path[0],
    // direction `Left` throughout) reproduce that same right-associated
    // chain without needing an external seed.
    subroots.reverse();
    let rule = vec![FoldDirection::Left; subroots.len()];
    Ok((subroots, rule))
}

/// Descends toward the boundary at relative position `m` within
/// `[offset, offset+width)`, same split rule as `root()`. Every pushed
/// complement is entirely on the historical side (§3's `subset`,
/// marked `true`) or entirely on the extension side (marked `false`);
/// unlike the inclusion path, the base case itself is pushed too, so the
/// proof never needs an externally supplied seed to reconstruct either
/// state.
fn boundary(
    range: &RangeHasher,
    offset: u64,
    width: u64,
    m: u64,
    path: &mut Vec<Digest>,
    rule: &mut Vec<FoldDirection>,
    subset: &mut Vec<bool>,
) -> Result<()> {
    if m == width {
        path.push(range.root(offset, width)?);
        rule.push(FoldDirection::Left); // seed element when this is path[0]
        subset.push(true);
        return Ok(());
    }

    let k = split_point(width);
    if m <= k {
        boundary(range, offset, k, m, path, rule, subset)?;
        path.push(range.root(offset + k, width - k)?);
        rule.push(FoldDirection::Right);
        subset.push(false);
    } else {
        boundary(range, offset + k, width - k, m - k, path, rule, subset)?;
        path.push(range.root(offset, k)?);
        rule.push(FoldDirection::Left);
        subset.push(true);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        digest::{Algorithm, Hasher},
        proof::{Proof, ProofMetadata},
        storage::{memory::MemoryStore, Storage},
    };

    fn populated(entries: &[&[u8]]) -> (MemoryStore, Hasher) {
        let hasher = Hasher::new(Algorithm::Sha256, true);
        let store = MemoryStore::new(hasher);
        for e in entries {
            store.append(e).unwrap();
        }
        (store, hasher)
    }

    #[test]
    fn test_consistency_proof_reconstructs_both_states() {
        let (store, hasher) = populated(&[
            b"foo", b"bar", b"baz", b"qux", b"quux", b"corge", b"grault", b"garlpy",
        ]);
        let range = RangeHasher::new(&store, &hasher, None, true);

        let (path, rule, subset) = build_consistency_proof(&range, 5, 8).unwrap();
        let proof = Proof {
            metadata: ProofMetadata {
                algorithm: Algorithm::Sha256,
                security: true,
                size: 8,
            },
            path,
            rule,
            subset,
        };

        assert_eq!(
            proof.fold_subset_self_seeded(&hasher).unwrap(),
            range.root(0, 5).unwrap()
        );
        assert_eq!(
            proof.fold_all_self_seeded(&hasher).unwrap(),
            range.root(0, 8).unwrap()
        );
    }

    #[test]
    fn test_reflexive_consistency() {
        let (store, hasher) = populated(&[b"a", b"b", b"c", b"d", b"e"]);
        let range = RangeHasher::new(&store, &hasher, None, true);

        let (path, rule, subset) = build_consistency_proof(&range, 5, 5).unwrap();
        let proof = Proof {
            metadata: ProofMetadata {
                algorithm: Algorithm::Sha256,
                security: true,
                size: 5,
            },
            path,
            rule,
            subset,
        };

        let state = range.root(0, 5).unwrap();
        assert_eq!(proof.fold_subset_self_seeded(&hasher).unwrap(), state);
        assert_eq!(proof.fold_all_self_seeded(&hasher).unwrap(), state);
    }

    #[test]
    fn test_empty_prior_state_folds_to_hash_empty() {
        let (store, hasher) = populated(&[b"a", b"b", b"c"]);
        let range = RangeHasher::new(&store, &hasher, None, true);

        let (path, rule, subset) = build_consistency_proof(&range, 0, 3).unwrap();
        let proof = Proof {
            metadata: ProofMetadata {
                algorithm: Algorithm::Sha256,
                security: true,
                size: 3,
            },
            path,
            rule,
            subset,
        };

        assert_eq!(
            proof.fold_subset_self_seeded(&hasher).unwrap(),
            hasher.hash_empty()
        );
        assert_eq!(
            proof.fold_all_self_seeded(&hasher).unwrap(),
            range.root(0, 3).unwrap()
        );
    }

    #[test]
    fn test_size1_exceeds_size2_is_invalid_challenge() {
        let (store, hasher) = populated(&[b"a", b"b"]);
        let range = RangeHasher::new(&store, &hasher, None, true);
        assert!(matches!(
            build_consistency_proof(&range, 2, 1),
            Err(Error::InvalidChallenge(_))
        ));
    }

    #[test]
    fn test_consistency_holds_across_many_growth_steps() {
        let entries: Vec<&[u8]> = vec![
            b"a", b"b", b"c", b"d", b"e", b"f", b"g", b"h", b"i", b"j", b"k",
        ];
        let (store, hasher) = populated(&entries);
        let range = RangeHasher::new(&store, &hasher, None, true);

        for size1 in 0..=entries.len() as u64 {
            for size2 in size1..=entries.len() as u64 {
                let (path, rule, subset) = build_consistency_proof(&range, size1, size2).unwrap();
                let proof = Proof {
                    metadata: ProofMetadata {
                        algorithm: Algorithm::Sha256,
                        security: true,
                        size: size2,
                    },
                    path,
                    rule,
                    subset,
                };
                assert_eq!(
                    proof.fold_subset_self_seeded(&hasher).unwrap(),
                    range.root(0, size1).unwrap(),
                    "prior state mismatch at size1={size1}, size2={size2}"
                );
                assert_eq!(
                    proof.fold_all_self_seeded(&hasher).unwrap(),
                    range.root(0, size2).unwrap(),
                    "later state mismatch at size1={size1}, size2={size2}"
                );
            }
        }
    }
}
