//! `prove_inclusion(index, size)` (§4.5.1).

use super::{split_point, FoldDirection};
use crate::{
    digest::Digest,
    error::{Error, Result},
    range::RangeHasher,
};

/// Builds the inclusion proof for leaf `index` within a tree of size
/// `size`. `path` carries only sibling digests; the leaf itself is left
/// for the verifier to supply.
pub(crate) fn build_inclusion_proof(
    range: &RangeHasher,
    index: u64,
    size: u64,
) -> Result<(Vec<Digest>, Vec<FoldDirection>)> {
    if index == 0 || index > size {
        return Err(Error::InvalidChallenge(format!(
            "inclusion index {} out of range for size {}",
            index, size
        )));
    }

    let mut path = Vec::new();
    let mut rule = Vec::new();
    siblings(range, 0, size, index, &mut path, &mut rule)?;
    Ok((path, rule))
}

/// Descends into the half of `[offset, offset+width)` containing the
/// leaf at relative position `index` (1-based), recording the sibling
/// subtree's digest at each level, deepest first.
fn siblings(
    range: &RangeHasher,
    offset: u64,
    width: u64,
    index: u64,
    path: &mut Vec<Digest>,
    rule: &mut Vec<FoldDirection>,
) -> Result<()> {
    if width == 1 {
        return Ok(());
    }

    let k = split_point(width);
    if index <= k {
        siblings(range, offset, k, index, path, rule)?;
        path.push(range.root(offset + k, width - k)?);
        rule.push(FoldDirection::Right);
    } else {
        siblings(range, offset + k, width - k, index - k, path, rule)?;
        path.push(range.root(offset, k)?);
        rule.push(FoldDirection::Left);
    }
    Ok(())
}
