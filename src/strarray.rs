//! Hashed string array: interns wire and connection-point names into
//! dense 16-bit IDs.
//!
//! Model construction performs millions of additions of short, repeating
//! wire names; interning collapses the memory and turns name comparisons
//! into integer compares. Strings are distributed among bins keyed by
//! hash. Each bin is one continuous byte stream of header-prefixed,
//! zero-terminated strings; bins grow in 32k increments. A reverse index
//! maps ID to (bin, offset) so lookup is O(1).

use thiserror::Error;

/// IDs issued by [`HashedStrarray`]. `0` is never issued so callers can
/// use it as a 'no string' marker.
pub type StrIdx = u16;

/// The reserved 'no entry' ID.
pub const STRIDX_NO_ENTRY: StrIdx = 0;

/// ID space of the fabric model.
pub const STRIDX_64K: usize = 0xFFFF;
/// Absolute cap on the ID space.
pub const STRIDX_1M: usize = 1_000_000;

// Per-entry header inside a bin: u32 index, u16 entry length (header
// included). Offsets stored in the reverse index point at the string
// itself, so offset 0 doubles as 'no entry'.
const BIN_STR_HEADER: usize = 4 + 2;
const BIN_MIN_OFFSET: usize = BIN_STR_HEADER;
const BIN_INCREMENT: usize = 32768;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InternError {
    #[error("all string array indices are in use")]
    Full,
    #[error("string index {0} out of range")]
    BadIndex(usize),
}

#[derive(Debug, Clone)]
pub struct HashedStrarray {
    highest_index: usize,
    // min offset is BIN_MIN_OFFSET, 0 means no entry
    bin_offsets: Vec<u32>,
    index_to_bin: Vec<u16>,
    bins: Vec<Vec<u8>>,
}

// Dan Bernstein's hash function.
fn hash_djb2(s: &str) -> u32 {
    let mut hash: u32 = 5381;
    for &c in s.as_bytes() {
        hash = hash.wrapping_mul(33).wrapping_add(u32::from(c));
    }
    hash
}

impl HashedStrarray {
    pub fn new(highest_index: usize) -> Self {
        assert!(highest_index > 0 && highest_index <= STRIDX_1M);
        let num_bins = (highest_index / 64).max(1);
        Self {
            highest_index,
            bin_offsets: vec![0; highest_index],
            index_to_bin: vec![0; highest_index],
            bins: vec![Vec::new(); num_bins],
        }
    }

    /// Returns the string bound to `idx`, or `None` for unknown IDs and
    /// [`STRIDX_NO_ENTRY`].
    pub fn lookup(&self, idx: StrIdx) -> Option<&str> {
        if idx == STRIDX_NO_ENTRY {
            return None;
        }
        let slot = usize::from(idx) - 1;
        if slot >= self.highest_index {
            return None;
        }
        let bin = usize::from(self.index_to_bin[slot]);
        let offset = self.bin_offsets[slot] as usize;
        if bin == 0 && offset == 0 {
            return None;
        }
        debug_assert!(offset >= BIN_MIN_OFFSET && offset < self.bins[bin].len());
        let data = &self.bins[bin][offset..];
        let end = data.iter().position(|&b| b == 0)?;
        std::str::from_utf8(&data[..end]).ok()
    }

    /// Finds the ID of an interned string, or `None` if the string has
    /// not been added.
    pub fn find(&self, s: &str) -> Option<StrIdx> {
        let bin_i = hash_djb2(s) as usize % self.bins.len();
        let bin = &self.bins[bin_i];
        let mut search_off = BIN_MIN_OFFSET;
        while search_off < bin.len() {
            let end = search_off + bin[search_off..].iter().position(|&b| b == 0)?;
            if &bin[search_off..end] == s.as_bytes() {
                let slot =
                    u32::from_le_bytes(bin[search_off - 6..search_off - 2].try_into().unwrap());
                return Some((slot + 1) as StrIdx);
            }
            let entry_len =
                u16::from_le_bytes(bin[search_off - 2..search_off].try_into().unwrap());
            search_off += usize::from(entry_len);
        }
        None
    }

    /// Interns a string and returns its ID. Idempotent.
    pub fn add(&mut self, s: &str) -> Result<StrIdx, InternError> {
        if let Some(idx) = self.find(s) {
            return Ok(idx);
        }
        let hash = hash_djb2(s);

        // search a free slot by linear probing from the hashed start
        let start_slot = hash as usize % self.highest_index;
        let mut free_slot = None;
        for i in 0..self.highest_index {
            let cur = (start_slot + i) % self.highest_index;
            if self.bin_offsets[cur] == 0 {
                free_slot = Some(cur);
                break;
            }
        }
        let free_slot = free_slot.ok_or(InternError::Full)?;
        let bin = hash as usize % self.bins.len();
        self.stash_at_bin(s, free_slot, bin)?;
        Ok((free_slot + 1) as StrIdx)
    }

    /// Binds a string to a caller-chosen ID. After stashing, [`find`]
    /// can no longer be relied on for this array, only [`lookup`].
    ///
    /// [`find`]: HashedStrarray::find
    /// [`lookup`]: HashedStrarray::lookup
    pub fn stash(&mut self, s: &str, idx: StrIdx) -> Result<(), InternError> {
        if idx == STRIDX_NO_ENTRY || usize::from(idx) > self.highest_index {
            return Err(InternError::BadIndex(usize::from(idx)));
        }
        let bin = usize::from(idx) % self.bins.len();
        self.stash_at_bin(s, usize::from(idx) - 1, bin)
    }

    fn stash_at_bin(&mut self, s: &str, slot: usize, bin: usize) -> Result<(), InternError> {
        let b = &mut self.bins[bin];
        if b.is_empty() {
            b.reserve(BIN_INCREMENT);
        }
        // entries are header-prefixed, so string offsets are always at
        // least BIN_MIN_OFFSET and offset 0 can mean 'no entry'
        let entry_len = BIN_STR_HEADER + s.len() + 1;
        b.reserve(entry_len);
        let str_off = b.len() + BIN_STR_HEADER;
        b.extend_from_slice(&(slot as u32).to_le_bytes());
        b.extend_from_slice(&(entry_len as u16).to_le_bytes());
        b.extend_from_slice(s.as_bytes());
        b.push(0);
        self.index_to_bin[slot] = bin as u16;
        self.bin_offsets[slot] = str_off as u32;
        Ok(())
    }

    /// Number of IDs currently bound.
    pub fn used_slots(&self) -> usize {
        self.bin_offsets.iter().filter(|&&o| o != 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_find_lookup() {
        let mut arr = HashedStrarray::new(STRIDX_64K);
        let a = arr.add("LOGICIN_B23").unwrap();
        let b = arr.add("VCC_WIRE").unwrap();
        assert_ne!(a, STRIDX_NO_ENTRY);
        assert_ne!(a, b);
        assert_eq!(arr.add("LOGICIN_B23").unwrap(), a);
        assert_eq!(arr.find("LOGICIN_B23"), Some(a));
        assert_eq!(arr.find("GND_WIRE"), None);
        assert_eq!(arr.lookup(a), Some("LOGICIN_B23"));
        assert_eq!(arr.lookup(b), Some("VCC_WIRE"));
        assert_eq!(arr.lookup(STRIDX_NO_ENTRY), None);
        assert_eq!(arr.used_slots(), 2);
    }

    #[test]
    fn stash_fixed_index() {
        let mut arr = HashedStrarray::new(STRIDX_64K);
        arr.stash("KEEP1_WIRE", 500).unwrap();
        assert_eq!(arr.lookup(500), Some("KEEP1_WIRE"));
        assert_eq!(arr.stash("X", 0), Err(InternError::BadIndex(0)));
    }

    #[test]
    fn many_short_names() {
        let mut arr = HashedStrarray::new(STRIDX_64K);
        let mut ids = Vec::new();
        for i in 0..63 {
            ids.push(arr.add(&format!("LOGICIN_B{i}")).unwrap());
        }
        for (i, id) in ids.iter().enumerate() {
            assert_eq!(arr.lookup(*id).unwrap(), format!("LOGICIN_B{i}"));
        }
    }
}
