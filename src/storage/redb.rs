use redb::{Database, ReadableTable, TableDefinition};

use crate::{
    digest::{Digest, Hasher},
    error::{Error, Result},
    storage::Storage,
};

/// Single table: `leaf(index PRIMARY KEY, hash_len || hash || entry BLOB)`.
///
/// The value packs the precomputed leaf digest ahead of the raw entry bytes
/// so that [`Storage::leaf`]/[`Storage::leaves`] never need to re-hash an
/// entry on the read path (§9).
const LEAF_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("leaf");

/// An embedded single-table reference backend (§6.3), backed by `redb`.
pub struct RedbStore {
    hasher: Hasher,
    database: Database,
}

impl RedbStore {
    #[inline]
    pub fn new(hasher: Hasher, database: Database) -> Result<Self> {
        let write_txn = database.begin_write()?;
        {
            write_txn.open_table(LEAF_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { hasher, database })
    }

    #[inline]
    pub fn hasher(&self) -> &Hasher {
        &self.hasher
    }

    #[inline]
    fn encode(digest: &Digest, entry: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(1 + digest.len() + entry.len());
        bytes.push(digest.len() as u8);
        bytes.extend_from_slice(digest.as_ref());
        bytes.extend_from_slice(entry);
        bytes
    }

    #[inline]
    fn decode_digest(bytes: &[u8]) -> Digest {
        let len = bytes[0] as usize;
        Digest::new(bytes[1..1 + len].to_vec())
    }
}

impl Storage for RedbStore {
    #[inline]
    fn size(&self) -> Result<u64> {
        let read_txn = self.database.begin_read()?;
        let table = read_txn.open_table(LEAF_TABLE)?;
        Ok(table.len()?)
    }

    #[inline]
    fn append(&self, entry: &[u8]) -> Result<u64> {
        let digest = self.hasher.hash_leaf(entry);
        let write_txn = self.database.begin_write()?;
        let index = {
            let mut table = write_txn.open_table(LEAF_TABLE)?;
            let index = table.len()? + 1;
            table.insert(index, Self::encode(&digest, entry).as_slice())?;
            index
        };
        write_txn.commit()?;
        Ok(index)
    }

    #[inline]
    fn leaf(&self, index: u64) -> Result<Digest> {
        let read_txn = self.database.begin_read()?;
        let table = read_txn.open_table(LEAF_TABLE)?;
        let size = table.len()?;
        if index == 0 || index > size {
            return Err(Error::IndexOutOfRange(format!(
                "leaf index {} out of range for size {}",
                index, size
            )));
        }
        let value = table
            .get(index)?
            .ok_or_else(|| Error::BackendError(format!("missing leaf at index {}", index)))?;
        Ok(Self::decode_digest(value.value()))
    }

    #[inline]
    fn leaves(&self, offset: u64, width: u64) -> Result<Vec<Digest>> {
        let read_txn = self.database.begin_read()?;
        let table = read_txn.open_table(LEAF_TABLE)?;
        let size = table.len()?;
        if offset + width > size {
            return Err(Error::IndexOutOfRange(format!(
                "range [{}, {}) out of range for size {}",
                offset,
                offset + width,
                size
            )));
        }
        let mut digests = Vec::with_capacity(width as usize);
        for index in (offset + 1)..=(offset + width) {
            let value = table.get(index)?.ok_or_else(|| {
                Error::BackendError(format!("missing leaf at index {}", index))
            })?;
            digests.push(Self::decode_digest(value.value()));
        }
        Ok(digests)
    }
}
