//! An in-memory transaction pool (mempool) for a UTXO-style blockchain node.
//!
//! The pool holds candidate transactions validated at the network layer but
//! not yet confirmed in a block. It serves two consumers: the block
//! producer, which drains transactions in fee-descending order via
//! [`Mempool::ordered_transactions`], and the relay layer, which looks
//! transactions up by hash and asks whether a newly-seen one should be
//! accepted via [`Mempool::accept`]. It also reacts to chain
//! reorganizations through [`Mempool::on_connect`] and
//! [`Mempool::on_disconnect`].
//!
//! Cryptographic validation, gossip, persistence, and the RPC/CLI surface
//! are all external collaborators; this crate models only the chain
//! ([`chain::Chain`]) and metrics ([`chain::MempoolMetrics`]) seams it
//! depends on directly.
//!
//! Grounded on this workspace's own `ckb-pool`/`ckb-tx-pool` crates: four
//! coupled indexes (transaction store, nullifier index, fee queue,
//! expiration queue) kept consistent behind private `add_transaction`/
//! `delete_transaction` methods, matching the "never expose partial
//! mutation" discipline those crates follow for their own pool state.

pub mod chain;
pub mod config;
pub mod error;
pub mod hash;
pub mod pool;
pub mod queue;
pub mod transaction;

pub use chain::{Chain, MempoolMetrics, NoopMetrics, Verifier};
pub use config::MempoolConfig;
pub use error::AcceptError;
pub use hash::{BlockHash, Nullifier, TxHash};
pub use pool::{Mempool, OrderedTransactions};
pub use queue::{ExpirationEntry, FeeEntry, IndexedEntry, IndexedPriorityQueue};
pub use transaction::{Block, BlockHeader, Spend, Transaction};
