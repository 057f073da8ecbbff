#![deny(
    clippy::correctness,
    clippy::complexity,
    clippy::perf,
    clippy::missing_inline_in_public_items
)]

mod cache;
mod digest;
mod error;
mod proof;
mod range;
mod storage;
mod tree;
mod verify;

#[cfg(test)]
pub mod testing;

pub mod prelude {
    pub use crate::{
        digest::{Algorithm, Digest, Hasher},
        error::{Error, InvalidProofKind, Result},
        proof::{FoldDirection, Proof, ProofMetadata},
        storage::{memory::MemoryStore, redb::RedbStore, Storage},
        tree::{MerkleTree, TreeConfig},
        verify::{verify_consistency, verify_inclusion},
        FromBytes, FromHex, ToBytes, ToHex,
    };
}

use crate::error::Result;

#[doc(hidden)]
/// Hidden module making the macros defined by this crate available to users.
pub mod __dependencies {
    pub use paste;
    pub use proptest;
    pub use test_strategy;
}

pub trait FromBytes
where
    Self: Sized,
{
    fn from_bytes(bytes: &[u8]) -> Result<Self>;
}

pub trait ToBytes {
    type Output: AsRef<[u8]>;

    /// Converts the value to a representation in bytes.
    fn to_bytes(&self) -> Self::Output;

    /// Converts the value to a representation in bytes, as a vector.
    ///
    /// This is a convenience method, and automatically derived from `to_bytes`.
    #[inline]
    fn to_bytes_vec(&self) -> Vec<u8> {
        self.to_bytes().as_ref().to_vec()
    }
}

pub trait FromHex
where
    Self: Sized,
{
    fn from_hex(hex: &str) -> Result<Self>;
}

pub trait ToHex {
    fn to_hex(&self) -> String;
}

#[macro_export]
macro_rules! impl_associate_bytes_types {
    ($type:ty) => {
        impl $crate::prelude::FromHex for $type {
            #[inline]
            fn from_hex(input: &str) -> $crate::prelude::Result<Self> {
                let bytes = hex::decode(input)?;
                <$type as $crate::FromBytes>::from_bytes(&bytes)
            }
        }

        impl $crate::prelude::ToHex for $type {
            #[inline]
            fn to_hex(&self) -> String {
                hex::encode(&$crate::ToBytes::to_bytes(self))
            }
        }
    };
}
