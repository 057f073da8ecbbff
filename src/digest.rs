use std::fmt::{Display, Formatter};

use digest::Digest as _;
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};

use crate::error::{Error, Result};

const LEAF_PREFIX: u8 = 0x00;
const NODE_PREFIX: u8 = 0x01;

/// The closed set of digest algorithms the core supports (§4.1).
///
/// Unlike the historical near-unbounded string-indexed algorithm selection
/// this replaces, unsupported names are rejected at construction with
/// [`Error::UnsupportedParameter`] rather than accepted and failing later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
}

impl Algorithm {
    /// The digest width, in bytes, produced by this algorithm.
    #[inline]
    pub fn output_size(&self) -> usize {
        match self {
            Algorithm::Sha224 | Algorithm::Sha3_224 => 28,
            Algorithm::Sha256 | Algorithm::Sha3_256 => 32,
            Algorithm::Sha384 | Algorithm::Sha3_384 => 48,
            Algorithm::Sha512 | Algorithm::Sha3_512 => 64,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Sha224 => "sha224",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha384 => "sha384",
            Algorithm::Sha512 => "sha512",
            Algorithm::Sha3_224 => "sha3-224",
            Algorithm::Sha3_256 => "sha3-256",
            Algorithm::Sha3_384 => "sha3-384",
            Algorithm::Sha3_512 => "sha3-512",
        }
    }

    /// Parses an algorithm name, rejecting anything outside the supported
    /// set with [`Error::UnsupportedParameter`].
    #[inline]
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "sha224" => Ok(Algorithm::Sha224),
            "sha256" => Ok(Algorithm::Sha256),
            "sha384" => Ok(Algorithm::Sha384),
            "sha512" => Ok(Algorithm::Sha512),
            "sha3-224" | "sha3_224" => Ok(Algorithm::Sha3_224),
            "sha3-256" | "sha3_256" => Ok(Algorithm::Sha3_256),
            "sha3-384" | "sha3_384" => Ok(Algorithm::Sha3_384),
            "sha3-512" | "sha3_512" => Ok(Algorithm::Sha3_512),
            other => Err(Error::UnsupportedParameter(other.to_string())),
        }
    }

    #[inline]
    fn raw_digest(&self, chunks: &[&[u8]]) -> Vec<u8> {
        macro_rules! run {
            ($hasher:ty) => {{
                let mut hasher = <$hasher>::new();
                for chunk in chunks {
                    hasher.update(chunk);
                }
                hasher.finalize().to_vec()
            }};
        }

        match self {
            Algorithm::Sha224 => run!(Sha224),
            Algorithm::Sha256 => run!(Sha256),
            Algorithm::Sha384 => run!(Sha384),
            Algorithm::Sha512 => run!(Sha512),
            Algorithm::Sha3_224 => run!(Sha3_224),
            Algorithm::Sha3_256 => run!(Sha3_256),
            Algorithm::Sha3_384 => run!(Sha3_384),
            Algorithm::Sha3_512 => run!(Sha3_512),
        }
    }
}

impl Display for Algorithm {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Arbitrary for Algorithm {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    #[inline]
    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            Just(Algorithm::Sha224),
            Just(Algorithm::Sha256),
            Just(Algorithm::Sha384),
            Just(Algorithm::Sha512),
            Just(Algorithm::Sha3_224),
            Just(Algorithm::Sha3_256),
            Just(Algorithm::Sha3_384),
            Just(Algorithm::Sha3_512),
        ]
        .boxed()
    }
}

/// A digest produced by the configured [`Algorithm`].
///
/// Unlike a fixed-width hash type, width here is a function of the
/// algorithm in force — SHA-224 and SHA3-224 produce 28 bytes, SHA-512 and
/// SHA3-512 produce 64. Digests are compared by equality only; the core
/// never parses their contents.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Digest(Vec<u8>);

impl Arbitrary for Digest {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    #[inline]
    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        proptest::collection::vec(any::<u8>(), 28..=64)
            .prop_map(Digest::new)
            .boxed()
    }
}

impl Digest {
    #[inline]
    pub fn new(bytes: Vec<u8>) -> Self {
        Digest(bytes)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl crate::FromBytes for Digest {
    #[inline]
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Digest(bytes.to_vec()))
    }
}

impl crate::ToBytes for Digest {
    type Output = Vec<u8>;

    #[inline]
    fn to_bytes(&self) -> Self::Output {
        self.0.clone()
    }
}

crate::impl_associate_bytes_types!(Digest);

impl Display for Digest {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl std::fmt::Debug for Digest {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl AsRef<[u8]> for Digest {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Domain-separated cryptographic hashing (§4.1).
///
/// With `security` enabled (the default), leaf digests are computed as
/// `H(0x00 ‖ blob)` and interior digests as `H(0x01 ‖ left ‖ right)`; this
/// prevents a leaf digest from ever colliding with an interior digest
/// built from the same bytes (§8, "second-preimage resistance"). With
/// `security` disabled, the raw `H(blob)` / `H(left ‖ right)` forms are
/// used instead. This is a static, construction-time choice — it is not
/// toggled per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hasher {
    algorithm: Algorithm,
    security: bool,
}

impl Hasher {
    #[inline]
    pub fn new(algorithm: Algorithm, security: bool) -> Self {
        Self {
            algorithm,
            security,
        }
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[inline]
    pub fn security(&self) -> bool {
        self.security
    }

    /// `H(ε)` — the hash of the empty byte string, in both security modes.
    #[inline]
    pub fn hash_empty(&self) -> Digest {
        Digest::new(self.algorithm.raw_digest(&[]))
    }

    /// `hash_leaf(b) = H(0x00 ‖ b)` with security enabled, `H(b)` otherwise.
    #[inline]
    pub fn hash_leaf(&self, blob: &[u8]) -> Digest {
        let bytes = if self.security {
            self.algorithm.raw_digest(&[&[LEAF_PREFIX], blob])
        } else {
            self.algorithm.raw_digest(&[blob])
        };
        Digest::new(bytes)
    }

    /// `hash_nodes(l, r) = H(0x01 ‖ l ‖ r)` with security enabled,
    /// `H(l ‖ r)` otherwise.
    #[inline]
    pub fn hash_nodes(&self, left: &Digest, right: &Digest) -> Digest {
        let bytes = if self.security {
            self.algorithm
                .raw_digest(&[&[NODE_PREFIX], left.as_ref(), right.as_ref()])
        } else {
            self.algorithm.raw_digest(&[left.as_ref(), right.as_ref()])
        };
        Digest::new(bytes)
    }

    /// Raw passthrough `H(bytes)`, used only by tests.
    #[inline]
    pub fn consume(&self, bytes: &[u8]) -> Digest {
        Digest::new(self.algorithm.raw_digest(&[bytes]))
    }
}
