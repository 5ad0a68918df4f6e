//! The indexed priority queue: an ordered multiset with O(log n)
//! add/remove-by-key/peek/poll, grounded on `ckb-tx-pool`'s
//! `component::container::SortedTxMap`, which pairs a `BTreeSet` of sort
//! keys with a `HashMap` side index from transaction id to sort key so a
//! transaction can be located and removed without a linear scan.
//!
//! Rather than keep the sort key and the lookup key as two separate types
//! threaded through every call site, entries here carry their own lookup key
//! inline (`IndexedEntry::key`) and double as their own `BTreeSet` element —
//! one fewer moving part for the same guarantees.

use std::collections::hash_map::HashMap;
use std::collections::BTreeSet;
use std::hash::Hash;

use crate::hash::TxHash;

/// An entry that can live in an [`IndexedPriorityQueue`]: totally ordered
/// (the order the queue maintains), and addressable by a distinct key.
pub trait IndexedEntry: Ord + Clone + std::fmt::Debug {
    type Key: Eq + Hash + Clone + std::fmt::Debug;

    fn key(&self) -> Self::Key;
}

/// A multiset of `E` ordered by `E`'s `Ord` impl, with O(log n)
/// add/peek/poll and O(log n) removal by `E::Key`.
///
/// The maximum element (per `Ord`) is always the one `peek`/`poll` return;
/// callers encode whatever tie-break or reverse-priority rule they need
/// directly in their entry type's `Ord` implementation (see
/// [`crate::queue::FeeEntry`] and [`crate::queue::ExpirationEntry`]).
#[derive(Debug, Clone)]
pub struct IndexedPriorityQueue<E: IndexedEntry> {
    set: BTreeSet<E>,
    index: HashMap<E::Key, E>,
}

impl<E: IndexedEntry> Default for IndexedPriorityQueue<E> {
    fn default() -> Self {
        IndexedPriorityQueue {
            set: BTreeSet::new(),
            index: HashMap::new(),
        }
    }
}

impl<E: IndexedEntry> IndexedPriorityQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `entry`. The caller must ensure no entry with the same key is
    /// already present; this is guaranteed by the mempool's invariants, not
    /// re-checked here (see the component design notes on undefined
    /// behavior for duplicate keys).
    pub fn add(&mut self, entry: E) {
        let key = entry.key();
        self.set.insert(entry.clone());
        self.index.insert(key, entry);
    }

    /// The maximum entry per `Ord`, without removing it.
    pub fn peek(&self) -> Option<&E> {
        self.set.iter().next_back()
    }

    /// Removes and returns the maximum entry per `Ord`.
    pub fn poll(&mut self) -> Option<E> {
        let entry = self.set.iter().next_back().cloned()?;
        self.set.remove(&entry);
        self.index.remove(&entry.key());
        Some(entry)
    }

    /// Removes the entry addressed by `key`, if present.
    pub fn remove(&mut self, key: &E::Key) -> bool {
        match self.index.remove(key) {
            Some(entry) => {
                self.set.remove(&entry);
                true
            }
            None => false,
        }
    }

    pub fn size(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// All keys currently indexed, in unspecified order. Non-destructive,
    /// unlike draining via repeated `poll`; used to check queue membership
    /// against the other indexes without disturbing the ordered set.
    pub fn keys(&self) -> impl Iterator<Item = &E::Key> {
        self.index.keys()
    }
}

/// A fee-index row, ordered `(fee desc, hash desc)`.
///
/// `#[derive(Ord)]` compares fields in declaration order, ascending; since
/// `IndexedPriorityQueue::peek`/`poll` return the *maximum* entry, deriving
/// plain ascending order on `(fee, hash)` already gives "highest fee, ties
/// broken by the lexicographically larger hash" — no `Reverse` needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FeeEntry {
    pub fee: i64,
    pub hash: TxHash,
}

impl IndexedEntry for FeeEntry {
    type Key = TxHash;

    fn key(&self) -> TxHash {
        self.hash
    }
}

/// An expiration-index row, ordered so the *soonest-expiring* transaction
/// sorts as the maximum element (since `peek`/`poll` surface the maximum,
/// and the sweep wants the smallest `expiration_sequence` first).
///
/// `expiration_sequence == 0` means "never expires" (see the glossary) and
/// must sort as the *lowest* priority regardless of its numeric value, not
/// as if `0` were the smallest real sequence — otherwise a never-expiring
/// transaction would be peeked ahead of every transaction that actually has
/// an expiration, and the sweep loop would stop on it immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirationEntry {
    pub expiration_sequence: u32,
    pub hash: TxHash,
}

impl ExpirationEntry {
    /// `expiration_sequence`, remapped so `0` ("never expires") sorts below
    /// every real sequence instead of above all of them.
    fn sweep_priority(&self) -> u32 {
        if self.expiration_sequence == 0 {
            u32::MAX
        } else {
            self.expiration_sequence
        }
    }
}

impl PartialOrd for ExpirationEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ExpirationEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .sweep_priority()
            .cmp(&self.sweep_priority())
            .then_with(|| self.hash.cmp(&other.hash))
    }
}

impl IndexedEntry for ExpirationEntry {
    type Key = TxHash;

    fn key(&self) -> TxHash {
        self.hash
    }
}
