//! Typed rejection reasons for `accept`.
//!
//! The pool's public surface stays boolean (`accept(tx) -> bool`), matching
//! the original design's "no error type" stance: callers that don't care why
//! a transaction was rejected never have to touch this enum. It exists for
//! the internal `accept_checked` path and for tests and metrics that want the
//! reason without scraping debug logs, grounded on `ckb-error`'s style of one
//! `thiserror` variant per rejection cause.

use thiserror::Error;

/// Why `accept_checked` rejected a transaction.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptError {
    /// A transaction with this hash is already in the pool.
    #[error("transaction already in pool")]
    AlreadyInPool,

    /// The transaction's expiration sequence has already passed the chain
    /// head.
    #[error("transaction expiration sequence already passed")]
    ExpiredSequence,

    /// The transaction spends a nullifier already spent by another pool
    /// member with an equal or greater fee.
    #[error("conflicting spend with equal or greater fee in pool")]
    ConflictingSpend,
}
