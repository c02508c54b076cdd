use super::TTEntry;

// Default number of entries of the transposition table
pub const DEFAULT_TT_SIZE: usize = 1 << 22;

// Fixed-size table indexed by the low bits of the zobrist key, with an
// always-replace policy. The full key is stored alongside each entry
// and verified on probing, so index collisions can never leak a score
// from a different position.
pub struct TTable {
    entries: Vec<Option<TTEntry>>,
}

impl TTable {
    pub fn new(size: usize) -> Self {
        Self { entries: vec![None; size] }
    }

    pub fn probe(&self, zobrist: u64) -> Option<&TTEntry> {
        let index = zobrist as usize % self.entries.len();
        match &self.entries[index] {
            Some(entry) if entry.zobrist() == zobrist => Some(entry),
            _ => None,
        }
    }

    pub fn store(&mut self, entry: TTEntry) {
        let index = entry.zobrist() as usize % self.entries.len();
        self.entries[index] = Some(entry);
    }

    // Wipes the whole table. Used between games so that entries from a
    // previous one can never be probed back.
    pub fn reset(&mut self) {
        self.entries.iter_mut().for_each(|entry| *entry = None);
    }
}

impl Default for TTable {
    fn default() -> Self {
        Self::new(DEFAULT_TT_SIZE)
    }
}
