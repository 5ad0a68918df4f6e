//! Shared fixtures for the integration test suite: a minimal concrete
//! transaction/block/chain stack implementing this crate's traits, grounded
//! on `ckb-tx-pool`'s `component::tests::util::build_tx` helper style of
//! hand-built deterministic fixtures rather than a full validator.

#![allow(dead_code)]

use std::collections::HashMap;

use async_trait::async_trait;

use ckb_mempool::{Block, BlockHash, BlockHeader, Chain, Nullifier, Spend, Transaction, TxHash, Verifier};

#[derive(Debug, Clone)]
pub struct TestTx {
    pub hash: TxHash,
    pub fee: i64,
    pub expiration_sequence: u32,
    pub spends: Vec<Spend>,
    pub serialized_len: usize,
    pub miners_fee: bool,
}

impl TestTx {
    pub fn new(id: u8, fee: i64) -> Self {
        TestTx {
            hash: TxHash([id; 32]),
            fee,
            expiration_sequence: 0,
            spends: Vec::new(),
            serialized_len: 128,
            miners_fee: false,
        }
    }

    pub fn with_expiration(mut self, expiration_sequence: u32) -> Self {
        self.expiration_sequence = expiration_sequence;
        self
    }

    pub fn spending(mut self, nullifier_id: u8) -> Self {
        self.spends.push(Spend {
            nullifier: Nullifier([nullifier_id; 32]),
        });
        self
    }

    pub fn as_miners_fee(mut self) -> Self {
        self.miners_fee = true;
        self
    }
}

impl Transaction for TestTx {
    fn hash(&self) -> TxHash {
        self.hash
    }

    fn fee(&self) -> i64 {
        self.fee
    }

    fn expiration_sequence(&self) -> u32 {
        self.expiration_sequence
    }

    fn spends(&self) -> &[Spend] {
        &self.spends
    }

    fn serialized_len(&self) -> usize {
        self.serialized_len
    }

    fn is_miners_fee(&self) -> bool {
        self.miners_fee
    }
}

#[derive(Debug, Clone, Default)]
pub struct TestBlock {
    pub header: BlockHeader,
    pub transactions: Vec<TestTx>,
}

impl TestBlock {
    pub fn new(hash_id: u8, previous_hash_id: u8, sequence: u32, transactions: Vec<TestTx>) -> Self {
        TestBlock {
            header: BlockHeader {
                hash: BlockHash([hash_id; 32]),
                previous_block_hash: BlockHash([previous_hash_id; 32]),
                sequence,
            },
            transactions,
        }
    }
}

impl Block for TestBlock {
    type Tx = TestTx;

    fn header(&self) -> &BlockHeader {
        &self.header
    }

    fn transactions(&self) -> &[TestTx] {
        &self.transactions
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TestVerifier;

impl Verifier for TestVerifier {}

/// A chain double backed by a fixed set of known headers, keyed by hash.
#[derive(Debug, Clone, Default)]
pub struct TestChain {
    pub verifier: TestVerifier,
    pub headers: HashMap<BlockHash, BlockHeader>,
    pub head_sequence: u32,
}

impl TestChain {
    pub fn new() -> Self {
        TestChain::default()
    }

    pub fn with_header(mut self, header: BlockHeader) -> Self {
        self.headers.insert(header.hash, header);
        self
    }

    /// Sets the chain's current tip height, as returned by
    /// `Chain::head_sequence` — distinct from the pool's own `head`, which
    /// only advances via `on_connect`/`on_disconnect`.
    pub fn with_head_sequence(mut self, head_sequence: u32) -> Self {
        self.head_sequence = head_sequence;
        self
    }
}

#[async_trait]
impl Chain for TestChain {
    type Tx = TestTx;
    type Blk = TestBlock;
    type Ver = TestVerifier;

    fn head_sequence(&self) -> u32 {
        self.head_sequence
    }

    fn verifier(&self) -> &TestVerifier {
        &self.verifier
    }

    async fn get_header(&self, hash: &BlockHash) -> Option<BlockHeader> {
        self.headers.get(hash).copied()
    }
}
