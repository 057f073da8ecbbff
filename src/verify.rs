//! Stateless proof verification (§4.6).

use crate::{
    digest::{Digest, Hasher},
    error::{Error, InvalidProofKind, Result},
    proof::{FoldDirection, Proof},
    range::split_point,
};

/// Folds `proof.path` under `proof.rule` starting from `base`, and rejects
/// unless the result equals `target`.
///
/// The algorithm and security policy used are those recorded in
/// `proof.metadata`, not whatever the caller happens to be configured
/// with — a proof is self-describing.
///
/// On mismatch, the 1-based leaf index `base` is supposed to occupy is
/// re-derived from `proof.rule` against `proof.metadata.size` (§4.6 point
/// 3) — the same top-down power-of-two split `build_inclusion_proof` used
/// to build `rule`, replayed in reverse. When `rule` is non-empty, this
/// derivation always succeeds for a well-formed proof (`rule` fully
/// commits to a single leaf position), so the failure is attributed to
/// `base` specifically: `BaseMismatch`. The one case where there is no
/// structure to attribute blame to — a single-leaf tree, `rule` empty —
/// falls back to the more generic `StateMismatch`. A `rule` that fails to
/// narrow to a single leaf at all is a malformed proof, not a mismatched
/// base.
#[inline]
pub fn verify_inclusion(base: &Digest, target: &Digest, proof: &Proof) -> Result<()> {
    let hasher = Hasher::new(proof.metadata.algorithm, proof.metadata.security);
    let acc = proof.fold_from_seed(&hasher, base)?;
    if &acc == target {
        return Ok(());
    }

    if proof.rule.is_empty() {
        return Err(Error::invalid_proof(InvalidProofKind::StateMismatch));
    }
    match derive_base_index(proof.metadata.size, &proof.rule) {
        Some(_) => Err(Error::invalid_proof(InvalidProofKind::BaseMismatch)),
        None => Err(Error::invalid_proof(InvalidProofKind::MalformedProof)),
    }
}

/// Reconstructs the 1-based leaf index an inclusion proof's `rule` commits
/// to, by replaying `build_inclusion_proof`'s top-down split (§4.5.1)
/// against `size`. `rule` is recorded deepest-first, so this walks it in
/// reverse. Returns `None` if the directions never narrow the range down
/// to exactly one leaf.
fn derive_base_index(size: u64, rule: &[FoldDirection]) -> Option<u64> {
    let mut offset = 0u64;
    let mut width = size;
    for direction in rule.iter().rev() {
        if width <= 1 {
            return None;
        }
        let k = split_point(width);
        match direction {
            FoldDirection::Right => width = k,
            FoldDirection::Left => {
                offset += k;
                width -= k;
            }
        }
    }
    (width == 1).then_some(offset + 1)
}

/// Checks that `proof` shows `state1` is a prefix of `state2`.
///
/// Folds only the `subset`-marked elements of `proof.path` to reconstruct
/// `state1`, then the entire path to reconstruct `state2`; both must
/// match.
#[inline]
pub fn verify_consistency(state1: &Digest, state2: &Digest, proof: &Proof) -> Result<()> {
    let hasher = Hasher::new(proof.metadata.algorithm, proof.metadata.security);

    let acc1 = proof.fold_subset_self_seeded(&hasher)?;
    if &acc1 != state1 {
        return Err(Error::invalid_proof(InvalidProofKind::PriorStateMismatch));
    }

    let acc2 = proof.fold_all_self_seeded(&hasher)?;
    if &acc2 != state2 {
        return Err(Error::invalid_proof(InvalidProofKind::LaterStateMismatch));
    }

    Ok(())
}
