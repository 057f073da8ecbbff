//! Black-box tests against the public `merkle_log` API: the §8 concrete
//! end-to-end scenarios, plus property tests for the universal invariants.

use merkle_log::prelude::*;
use proptest::prelude::*;
use test_strategy::proptest;

fn fresh_tree() -> MerkleTree<MemoryStore> {
    let hasher = Hasher::new(Algorithm::Sha256, true);
    MerkleTree::new(MemoryStore::new(hasher), TreeConfig::default())
}

// Scenario 1: empty tree (§8).
#[test]
fn test_empty_tree() {
    let tree = fresh_tree();
    assert_eq!(tree.get_size().unwrap(), 0);

    let hasher = Hasher::new(Algorithm::Sha256, true);
    assert_eq!(tree.get_state().unwrap(), hasher.hash_empty());
}

// Scenario 2: five-entry inclusion, then tamper the base (§8).
#[test]
fn test_five_entry_inclusion() {
    let tree = fresh_tree();
    for entry in [b"foo".as_slice(), b"bar", b"baz", b"qux", b"quux"] {
        tree.append(entry).unwrap();
    }

    let proof = tree.prove_inclusion(2, 5).unwrap();
    let state = tree.get_state().unwrap();
    assert!(verify_inclusion(&tree.get_leaf(2).unwrap(), &state, &proof).is_ok());

    let hasher = Hasher::new(Algorithm::Sha256, true);
    let tampered_base = hasher.hash_leaf(b"random");
    let err = verify_inclusion(&tampered_base, &state, &proof).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidProof {
            kind: InvalidProofKind::BaseMismatch
        }
    ));
}

// Scenario 3: consistency as the tree grows from 5 to 8 entries (§8).
#[test]
fn test_consistency_at_growth() {
    let tree = fresh_tree();
    for entry in [b"foo".as_slice(), b"bar", b"baz", b"qux", b"quux"] {
        tree.append(entry).unwrap();
    }
    let state1 = tree.get_state().unwrap();
    let size1 = tree.get_size().unwrap();
    assert_eq!(size1, 5);

    for entry in [b"corge".as_slice(), b"grault", b"garlpy"] {
        tree.append(entry).unwrap();
    }
    let state2 = tree.get_state().unwrap();

    let proof = tree.prove_consistency(size1, tree.get_size().unwrap()).unwrap();
    assert!(verify_consistency(&state1, &state2, &proof).is_ok());

    let hasher = Hasher::new(Algorithm::Sha256, true);
    let tampered_state2 = hasher.hash_leaf(b"random");
    assert!(matches!(
        verify_consistency(&state1, &tampered_state2, &proof),
        Err(Error::InvalidProof {
            kind: InvalidProofKind::LaterStateMismatch
        })
    ));
}

// Scenario 4: domain separation smoke test (§8).
#[test]
fn test_domain_separation_smoke() {
    let hasher = Hasher::new(Algorithm::Sha256, true);
    assert_ne!(
        hasher.hash_leaf(b""),
        hasher.hash_nodes(&hasher.hash_empty(), &hasher.hash_empty())
    );
}

// Scenario 5: shape uniqueness under interleaved reads (§8).
#[test]
fn test_shape_uniqueness() {
    let entries: Vec<&[u8]> = vec![b"a", b"b", b"c", b"d", b"e", b"f", b"g", b"h", b"i"];

    let tree_a = fresh_tree();
    for e in &entries {
        tree_a.append(e).unwrap();
    }

    let tree_b = fresh_tree();
    for (i, e) in entries.iter().enumerate() {
        tree_b.append(e).unwrap();
        if i % 2 == 0 {
            let _ = tree_b.get_state().unwrap();
        }
    }

    assert_eq!(tree_a.get_state().unwrap(), tree_b.get_state().unwrap());
    for i in 1..=entries.len() as u64 {
        assert_eq!(tree_a.get_leaf(i).unwrap(), tree_b.get_leaf(i).unwrap());
    }
}

// Scenario 6: reflexive consistency (§8).
#[test]
fn test_reflexive_consistency() {
    let tree = fresh_tree();
    for entry in [b"a".as_slice(), b"b", b"c", b"d", b"e", b"f", b"g"] {
        tree.append(entry).unwrap();
    }
    let size = tree.get_size().unwrap();
    let state = tree.get_state().unwrap();
    let proof = tree.prove_consistency(size, size).unwrap();
    assert!(verify_consistency(&state, &state, &proof).is_ok());
}

#[test]
fn test_unsupported_algorithm_is_rejected() {
    assert!(matches!(
        Algorithm::parse("md5"),
        Err(Error::UnsupportedParameter(_))
    ));
}

fn entries_strategy() -> impl Strategy<Value = Vec<Vec<u8>>> {
    proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..32), 1..24)
}

#[proptest]
fn test_inclusion_holds_for_every_leaf(#[strategy(entries_strategy())] entries: Vec<Vec<u8>>) {
    let tree = fresh_tree();
    for entry in &entries {
        tree.append(entry).unwrap();
    }
    let size = tree.get_size().unwrap();
    let state = tree.get_state().unwrap();

    for index in 1..=size {
        let proof = tree.prove_inclusion(index, size).unwrap();
        let base = tree.get_leaf(index).unwrap();
        prop_assert!(verify_inclusion(&base, &state, &proof).is_ok());
    }
}

#[proptest]
fn test_consistency_holds_for_every_prefix(#[strategy(entries_strategy())] entries: Vec<Vec<u8>>) {
    let tree = fresh_tree();
    for entry in &entries {
        tree.append(entry).unwrap();
    }
    let size = tree.get_size().unwrap();

    for size1 in 0..=size {
        let state1 = tree.get_state_at(size1).unwrap();
        let proof = tree.prove_consistency(size1, size).unwrap();
        let state2 = tree.get_state_at(size).unwrap();
        prop_assert!(verify_consistency(&state1, &state2, &proof).is_ok());
    }
}

#[proptest]
fn test_tampering_any_path_digest_breaks_inclusion(
    #[strategy(entries_strategy())] entries: Vec<Vec<u8>>,
) {
    prop_assume!(entries.len() >= 2);
    let tree = fresh_tree();
    for entry in &entries {
        tree.append(entry).unwrap();
    }
    let size = tree.get_size().unwrap();
    let state = tree.get_state().unwrap();
    let base = tree.get_leaf(1).unwrap();
    let proof = tree.prove_inclusion(1, size).unwrap();
    prop_assume!(!proof.path.is_empty());

    let hasher = Hasher::new(Algorithm::Sha256, true);
    for i in 0..proof.path.len() {
        let mut tampered = proof.clone();
        tampered.path[i] = hasher.hash_leaf(b"tampered-path-element");
        prop_assert!(verify_inclusion(&base, &state, &tampered).is_err());
    }
}

#[proptest]
fn test_state_is_independent_of_append_order_observation(
    #[strategy(entries_strategy())] entries: Vec<Vec<u8>>,
) {
    let tree_a = fresh_tree();
    for entry in &entries {
        tree_a.append(entry).unwrap();
    }

    let tree_b = fresh_tree();
    for entry in &entries {
        tree_b.append(entry).unwrap();
        let _ = tree_b.get_size().unwrap();
        let _ = tree_b.get_state().unwrap();
    }

    prop_assert_eq!(tree_a.get_state().unwrap(), tree_b.get_state().unwrap());
}
