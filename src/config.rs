//! Transaction pool configuration, grounded on `ckb-pool`'s `PoolConfig`:
//! a small `Serialize`/`Deserialize` struct of size knobs handed to the pool
//! at construction.

use serde::{Deserialize, Serialize};

/// Transaction pool configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MempoolConfig {
    /// Soft ceiling on [`crate::pool::Mempool::size_bytes`]. Advisory: this
    /// crate defines no eviction-by-capacity policy, so the value is only
    /// exposed for a caller to enforce its own admission limits against.
    pub max_pool_size_bytes: usize,

    /// Number of blocks of lookahead a caller may want to apply before even
    /// calling `accept` on a transaction close to expiring. Unused by the
    /// pool itself; kept so the knob exists at the same config seam
    /// `ckb-pool`'s `PoolConfig` exposes knobs a caller may or may not act on.
    pub expiration_lookahead: u32,
}

impl Default for MempoolConfig {
    fn default() -> Self {
        MempoolConfig {
            max_pool_size_bytes: 300_000_000,
            expiration_lookahead: 0,
        }
    }
}
