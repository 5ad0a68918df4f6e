//! Collaborators the pool consults but does not own: the chain (head height,
//! expiration rule, header lookups) and the metrics sink.
//!
//! These are modeled as traits, the way `ckb-tx-pool` takes its `ChainDB` and
//! notifier dependencies as injected services rather than concrete types, so
//! a node can wire the pool up to its own chain and metrics stack without the
//! pool crate depending on either.

use async_trait::async_trait;

use crate::hash::BlockHash;
use crate::transaction::{Block, BlockHeader};

/// Implements the chain's expiration rule.
///
/// The default implementation matches the rule this crate was specified
/// against exactly: a transaction is expired once the chain head has reached
/// or passed its expiration sequence, unless the expiration sequence is `0`
/// (never expires). Implementers should only override this if their chain's
/// rule genuinely differs — the pool's acceptance and sweep logic assume
/// whatever this returns is authoritative.
pub trait Verifier {
    fn is_expired_sequence(&self, tx_sequence: u32, head_sequence: u32) -> bool {
        tx_sequence != 0 && tx_sequence <= head_sequence
    }
}

/// Read-only view of the chain the pool is tracking.
#[async_trait]
pub trait Chain {
    type Tx: crate::transaction::Transaction;
    type Blk: Block<Tx = Self::Tx>;
    type Ver: Verifier;

    /// The chain's current tip height, read directly and unconditionally.
    ///
    /// This is distinct from [`crate::pool::Mempool::head`], which is the
    /// pool's own nullable, event-driven record of the last block it has
    /// observed via `on_connect`/`on_disconnect` (`None` before the first
    /// one). `head_sequence` always reflects the chain's real tip, even for
    /// a freshly constructed pool that hasn't processed any chain event yet
    /// (e.g. right after a node restart against an already-synced chain);
    /// the acceptance engine's expiration check consults this, not the
    /// pool's own `head`.
    fn head_sequence(&self) -> u32;

    /// The verifier used to decide whether a transaction's expiration
    /// sequence has passed.
    fn verifier(&self) -> &Self::Ver;

    /// Looks up a block header by hash, asynchronously. Used by
    /// `on_disconnect` to resolve the parent of a disconnected block.
    ///
    /// Returns `None` if the header is unknown to the chain; in that case
    /// the pool's tracked head becomes `None` too (see the crate-level
    /// open question on this).
    async fn get_header(&self, hash: &BlockHash) -> Option<BlockHeader>;
}

/// Write side of the metrics collaborator: a single gauge tracking pool size.
///
/// A no-op implementation is provided via [`NoopMetrics`] for callers that
/// don't want to wire up a real metrics backend (e.g. in tests).
pub trait MempoolMetrics {
    fn set_size(&self, size: usize);
}

/// A [`MempoolMetrics`] that discards every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetrics;

impl MempoolMetrics for NoopMetrics {
    fn set_size(&self, _size: usize) {}
}
