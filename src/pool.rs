//! The pool itself: the four coupled indexes (store, nullifier index, fee
//! queue, expiration queue) plus the acceptance engine and chain-event
//! handler that keep them consistent.
//!
//! Grounded on `ckb-tx-pool`'s `component::pool_map::PoolMap`, which keeps a
//! transaction store alongside side indexes (`inputs`, `deps`,
//! `header_deps`) behind `add_entry`/`remove_entry` so every caller mutates
//! through one seam rather than touching individual maps.

use std::collections::HashMap;

use log::{debug, trace};

use crate::chain::{Chain, MempoolMetrics, Verifier};
use crate::config::MempoolConfig;
use crate::error::AcceptError;
use crate::hash::{TxHash, HASH_LEN, NULLIFIER_LEN};
use crate::queue::{ExpirationEntry, FeeEntry, IndexedPriorityQueue};
use crate::transaction::{Block, BlockHeader, Transaction};

/// Estimated bytes consumed by one fee-queue slot (32-byte hash + 8-byte
/// fee). This is the same constant the original implementation uses for
/// `size_bytes`; it must be preserved exactly for external compatibility,
/// not recomputed from `std::mem::size_of`.
const QUEUE_SLOT_BYTES: usize = 40;

/// The transaction pool.
///
/// `C` is the chain collaborator (see [`crate::chain::Chain`]); `M` is the
/// metrics sink, defaulting to [`crate::chain::NoopMetrics`] for callers
/// that don't need one wired up.
pub struct Mempool<C: Chain, M: MempoolMetrics = crate::chain::NoopMetrics> {
    config: MempoolConfig,
    chain: C,
    metrics: M,

    transactions: HashMap<TxHash, C::Tx>,
    transactions_bytes: usize,

    nullifiers: HashMap<crate::hash::Nullifier, TxHash>,
    nullifiers_bytes: usize,

    queue: IndexedPriorityQueue<FeeEntry>,
    expiration_queue: IndexedPriorityQueue<ExpirationEntry>,

    head: Option<BlockHeader>,
}

impl<C: Chain, M: MempoolMetrics> Mempool<C, M> {
    pub fn new(chain: C, metrics: M, config: MempoolConfig) -> Self {
        Mempool {
            config,
            chain,
            metrics,
            transactions: HashMap::new(),
            transactions_bytes: 0,
            nullifiers: HashMap::new(),
            nullifiers_bytes: 0,
            queue: IndexedPriorityQueue::new(),
            expiration_queue: IndexedPriorityQueue::new(),
            head: None,
        }
    }

    pub fn config(&self) -> &MempoolConfig {
        &self.config
    }

    pub fn head(&self) -> Option<&BlockHeader> {
        self.head.as_ref()
    }

    pub fn size(&self) -> usize {
        self.transactions.len()
    }

    /// `transactions_bytes + nullifiers_bytes + queue.size() * 40`. The `40`
    /// is an estimate, not a measurement; see [`QUEUE_SLOT_BYTES`].
    pub fn size_bytes(&self) -> usize {
        self.transactions_bytes + self.nullifiers_bytes + self.queue.size() * QUEUE_SLOT_BYTES
    }

    pub fn exists(&self, hash: &TxHash) -> bool {
        self.transactions.contains_key(hash)
    }

    pub fn get(&self, hash: &TxHash) -> Option<&C::Tx> {
        self.transactions.get(hash)
    }

    /// All transaction hashes currently tracked by the expiration queue.
    ///
    /// Exposed for assertions of Invariant 1 (§3 — store, fee queue, and
    /// expiration queue membership must agree); callers wanting ordered
    /// iteration should use [`Self::ordered_transactions`] instead.
    pub fn expiration_hashes(&self) -> Vec<TxHash> {
        self.expiration_queue.keys().copied().collect()
    }

    /// Fee-descending (ties: hash-descending) snapshot of current members.
    ///
    /// The snapshot reflects queue membership at the moment of the call:
    /// deletions that happen while iterating are observed as skipped
    /// entries, but transactions accepted after the call are not visible.
    pub fn ordered_transactions(&self) -> OrderedTransactions<'_, C> {
        OrderedTransactions {
            queue: self.queue.clone(),
            transactions: &self.transactions,
        }
    }

    /// Validates and inserts `tx`, returning whether it was accepted.
    ///
    /// This is a thin boolean adaptor over [`Self::accept_checked`]; see
    /// that method for the decision procedure and [`AcceptError`] for the
    /// rejection reasons it can report.
    pub fn accept(&mut self, tx: C::Tx) -> bool {
        self.accept_checked(tx).is_ok()
    }

    /// `accept`, but reporting why a transaction was rejected.
    ///
    /// Fails fast: on any rejection the pool is left completely unmodified.
    pub fn accept_checked(&mut self, tx: C::Tx) -> Result<(), AcceptError> {
        let hash = tx.hash();

        if self.transactions.contains_key(&hash) {
            return Err(AcceptError::AlreadyInPool);
        }

        let head_sequence = self.chain.head_sequence();
        if self
            .chain
            .verifier()
            .is_expired_sequence(tx.expiration_sequence(), head_sequence)
        {
            debug!(
                "rejecting tx {}: expiration sequence {} already passed head sequence {}",
                hash,
                tx.expiration_sequence(),
                head_sequence
            );
            return Err(AcceptError::ExpiredSequence);
        }

        let mut to_evict = Vec::new();
        for spend in tx.spends() {
            let owner_hash = match self.nullifiers.get(&spend.nullifier) {
                Some(hash) => *hash,
                None => continue,
            };
            let owner_fee = match self.transactions.get(&owner_hash) {
                Some(owner) => owner.fee(),
                // Stale mapping: the nullifier is recorded but its owning
                // transaction is gone. Must not persist across public
                // operations under correct use; tolerated here as defensive.
                None => continue,
            };
            if tx.fee() > owner_fee {
                to_evict.push(owner_hash);
            } else {
                return Err(AcceptError::ConflictingSpend);
            }
        }

        for evicted_hash in to_evict {
            self.delete_transaction(&evicted_hash);
        }

        self.add_transaction(tx);
        Ok(())
    }

    /// Writes `tx` to all four indexes. Idempotent by hash: returns `false`
    /// without mutating anything if a transaction with this hash is already
    /// present.
    fn add_transaction(&mut self, tx: C::Tx) -> bool {
        let hash = tx.hash();
        if self.transactions.contains_key(&hash) {
            return false;
        }

        self.transactions_bytes += tx.serialized_len() + HASH_LEN;
        for spend in tx.spends() {
            self.nullifiers.insert(spend.nullifier, hash);
            self.nullifiers_bytes += NULLIFIER_LEN + HASH_LEN;
        }
        self.queue.add(FeeEntry {
            fee: tx.fee(),
            hash,
        });
        self.expiration_queue.add(ExpirationEntry {
            expiration_sequence: tx.expiration_sequence(),
            hash,
        });
        self.transactions.insert(hash, tx);

        self.metrics.set_size(self.transactions.len());
        true
    }

    /// Removes the transaction with `hash` from all four indexes. Idempotent
    /// by hash: returns `false` without mutating anything if absent.
    fn delete_transaction(&mut self, hash: &TxHash) -> bool {
        let tx = match self.transactions.remove(hash) {
            Some(tx) => tx,
            None => return false,
        };

        self.transactions_bytes -= tx.serialized_len() + HASH_LEN;
        self.queue.remove(hash);
        self.expiration_queue.remove(hash);

        for spend in tx.spends() {
            if self.nullifiers.get(&spend.nullifier) == Some(hash) {
                self.nullifiers.remove(&spend.nullifier);
                self.nullifiers_bytes -= NULLIFIER_LEN + HASH_LEN;
            }
        }

        self.metrics.set_size(self.transactions.len());
        true
    }

    /// Reacts to a newly connected block: evicts confirmed transactions,
    /// sweeps expired ones, and advances the tracked head.
    ///
    /// Returns the number of pool transactions removed because they were
    /// confirmed by this block.
    pub fn on_connect(&mut self, block: &C::Blk) -> usize {
        let mut confirmed = 0;
        for tx in block.transactions() {
            if self.delete_transaction(&tx.hash()) {
                confirmed += 1;
            }
        }

        let head_sequence = block.header().sequence;
        loop {
            let expiration_sequence = match self.expiration_queue.peek() {
                Some(entry) => entry.expiration_sequence,
                None => break,
            };
            if !self
                .chain
                .verifier()
                .is_expired_sequence(expiration_sequence, head_sequence)
            {
                break;
            }

            // Unconditionally remove the peeked entry before the next
            // `peek`: the sweep must make progress even if the owning
            // transaction is already gone, or a stale entry would be
            // re-peeked forever. Do not "continue" without removing it.
            let entry = self
                .expiration_queue
                .poll()
                .expect("just peeked a present entry");
            if self.transactions.contains_key(&entry.hash) {
                trace!("sweeping expired tx {}", entry.hash);
                self.delete_transaction(&entry.hash);
            }
        }

        self.head = Some(*block.header());
        confirmed
    }

    /// Reacts to a disconnected block: reinserts its non-miner's-fee
    /// transactions and rewinds the tracked head to the block's parent.
    ///
    /// Reinsertion is best-effort: conflicts are impossible by construction
    /// (the block was valid when connected), and duplicates are silently
    /// skipped by [`Self::add_transaction`]'s idempotency.
    ///
    /// If the parent header is unknown to the chain, the tracked head
    /// becomes `None` (see the crate-level open question on this).
    pub async fn on_disconnect(&mut self, block: &C::Blk) {
        for tx in block.transactions() {
            if !tx.is_miners_fee() {
                self.add_transaction(tx.clone());
            }
        }

        let previous_hash = block.header().previous_block_hash;
        self.head = self.chain.get_header(&previous_hash).await;
    }
}

/// Lazy, finite, non-restartable fee-descending iterator returned by
/// [`Mempool::ordered_transactions`].
pub struct OrderedTransactions<'a, C: Chain> {
    queue: IndexedPriorityQueue<FeeEntry>,
    transactions: &'a HashMap<TxHash, C::Tx>,
}

impl<'a, C: Chain> Iterator for OrderedTransactions<'a, C> {
    type Item = &'a C::Tx;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = self.queue.poll()?;
            if let Some(tx) = self.transactions.get(&entry.hash) {
                return Some(tx);
            }
            // Entry was removed from the live pool after the snapshot was
            // taken; skip it and keep polling.
        }
    }
}
