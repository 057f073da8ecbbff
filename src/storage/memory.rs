use std::sync::RwLock;

use crate::{
    digest::{Digest, Hasher},
    error::{Error, Result},
    storage::Storage,
};

/// A contiguous, in-memory store of `(entry, leaf digest)` pairs (§6.3).
///
/// This is a reference backend used to validate the core; any backend
/// satisfying [`Storage`] interoperates without modification to the tree.
#[derive(Debug)]
pub struct MemoryStore {
    hasher: Hasher,
    entries: RwLock<Vec<(Vec<u8>, Digest)>>,
}

impl MemoryStore {
    #[inline]
    pub fn new(hasher: Hasher) -> Self {
        Self {
            hasher,
            entries: RwLock::new(Vec::new()),
        }
    }

    #[inline]
    pub fn hasher(&self) -> &Hasher {
        &self.hasher
    }
}

impl Storage for MemoryStore {
    #[inline]
    fn size(&self) -> Result<u64> {
        Ok(self.entries.read().unwrap().len() as u64)
    }

    #[inline]
    fn append(&self, entry: &[u8]) -> Result<u64> {
        let digest = self.hasher.hash_leaf(entry);
        let mut entries = self.entries.write().unwrap();
        entries.push((entry.to_vec(), digest));
        Ok(entries.len() as u64)
    }

    #[inline]
    fn leaf(&self, index: u64) -> Result<Digest> {
        let entries = self.entries.read().unwrap();
        if index == 0 || index > entries.len() as u64 {
            return Err(Error::IndexOutOfRange(format!(
                "leaf index {} out of range for size {}",
                index,
                entries.len()
            )));
        }
        Ok(entries[(index - 1) as usize].1.clone())
    }

    #[inline]
    fn leaves(&self, offset: u64, width: u64) -> Result<Vec<Digest>> {
        let entries = self.entries.read().unwrap();
        let size = entries.len() as u64;
        if offset + width > size {
            return Err(Error::IndexOutOfRange(format!(
                "range [{}, {}) out of range for size {}",
                offset,
                offset + width,
                size
            )));
        }
        Ok(entries[offset as usize..(offset + width) as usize]
            .iter()
            .map(|(_, digest)| digest.clone())
            .collect())
    }
}
