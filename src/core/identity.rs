use anyhow::Result;
use ton_types::UInt256;

use crate::models::{MessageKind, TransactionRecord};

use super::models::TransactionError;

/// Computes the content hash of a serialized cell tree
pub trait CellHasher: Send + Sync {
    fn decode_and_hash(&self, boc: &[u8]) -> Result<UInt256>;
}

/// Hashes the root cell of a standard bag of cells
#[derive(Debug, Default, Copy, Clone)]
pub struct BocCellHasher;

impl CellHasher for BocCellHasher {
    fn decode_and_hash(&self, boc: &[u8]) -> Result<UInt256> {
        ton_transfers_utils::boc_repr_hash(boc)
    }
}

/// Identity of the transaction's inbound message.
///
/// Internal messages already carry their hash. External inbound messages are identified
/// by the hash of their `raw_body`. Does not depend on the effective message.
pub fn compute_in_msg_hash(
    tx: &TransactionRecord,
    hasher: &dyn CellHasher,
) -> Result<UInt256, TransactionError> {
    let inbound = tx
        .inbound
        .as_ref()
        .ok_or(TransactionError::MissingInboundMessage)?;

    match inbound.kind {
        MessageKind::Internal => Ok(UInt256::from_slice(&inbound.hash)),
        MessageKind::ExternalIn => {
            let boc = hex::decode(inbound.raw_body.as_deref().unwrap_or_default())?;
            hasher
                .decode_and_hash(&boc)
                .map_err(TransactionError::CellHash)
        }
        kind => Err(TransactionError::UnrecognizedMessageKind(kind)),
    }
}
