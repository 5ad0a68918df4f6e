//! Types describing the transactions and blocks the pool operates on.
//!
//! The pool treats transaction validity and construction as an external
//! concern (see the purpose & scope notes in the crate root docs): this
//! module only defines the narrow surface the pool itself needs to read.

use crate::hash::{BlockHash, Nullifier, TxHash};

/// A single consumed note/output, identified by its nullifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spend {
    pub nullifier: Nullifier,
}

/// The transaction surface the pool depends on.
///
/// A real node's transaction type carries a lot more (scripts, witnesses,
/// proofs); this trait exposes only what the acceptance engine and the
/// indexes need to read.
pub trait Transaction: Clone {
    /// Canonical transaction hash, used as the key in every index.
    fn hash(&self) -> TxHash;

    /// Fee paid by this transaction. Signed so a caller-side convention of
    /// "negative fee never accepted" can be enforced by the verifier rather
    /// than baked into the pool.
    fn fee(&self) -> i64;

    /// Block height at or after which this transaction is no longer valid.
    /// `0` means the transaction never expires.
    fn expiration_sequence(&self) -> u32;

    /// The outputs this transaction consumes.
    fn spends(&self) -> &[Spend];

    /// Length of this transaction's serialized form, in bytes. Used for the
    /// advisory byte accounting in [`crate::pool::Mempool::size_bytes`]; a
    /// concrete implementation typically returns `self.serialize().len()`.
    fn serialized_len(&self) -> usize;

    /// True for the miner's-fee (coinbase-style) transaction of a block.
    /// Such transactions are never reinserted on disconnect because they
    /// cannot be replayed.
    fn is_miners_fee(&self) -> bool;
}

/// Header of a block as observed by the pool. Only the fields the pool
/// itself consults are modeled here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockHeader {
    pub hash: BlockHash,
    pub previous_block_hash: BlockHash,
    pub sequence: u32,
}

/// A connected or disconnected block, as delivered by the chain collaborator.
pub trait Block {
    type Tx: Transaction;

    fn header(&self) -> &BlockHeader;
    fn transactions(&self) -> &[Self::Tx];
}
