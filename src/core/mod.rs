use std::sync::Arc;

use serde::{Deserialize, Serialize};
use ton_types::UInt256;

use crate::address::{AddressParser, AddressParserRegistry, ChainType, TonAddressFormat};
use crate::models::TransactionRecord;

use self::identity::CellHasher;
use self::models::*;

pub mod identity;
pub mod models;
pub mod parsing;
pub mod payload;

#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InterpreterConfig {
    pub chain_type: ChainType,
    pub address_format: TonAddressFormat,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            chain_type: ChainType::Ton,
            address_format: TonAddressFormat::default(),
        }
    }
}

/// Derives transfer facts from indexer transaction records of a single chain.
///
/// Stateless apart from the shared read-only registry, so one instance can serve
/// any number of concurrent extractions.
#[derive(Clone)]
pub struct TransactionInterpreter {
    registry: Arc<AddressParserRegistry>,
    chain_type: ChainType,
}

impl TransactionInterpreter {
    pub fn new(registry: Arc<AddressParserRegistry>, chain_type: ChainType) -> Self {
        Self {
            registry,
            chain_type,
        }
    }

    pub fn from_config(config: &InterpreterConfig) -> Self {
        Self::new(
            Arc::new(AddressParserRegistry::from_config(config)),
            config.chain_type,
        )
    }

    pub fn chain_type(&self) -> ChainType {
        self.chain_type
    }

    fn parser(&self) -> Result<&dyn AddressParser, TransactionError> {
        self.registry.get(self.chain_type)
    }

    pub fn direction(&self, tx: &TransactionRecord) -> Option<TransactionDirection> {
        self.direction_with_diagnostic(tx).into_value("direction")
    }

    pub fn direction_with_diagnostic(
        &self,
        tx: &TransactionRecord,
    ) -> Extracted<Option<TransactionDirection>> {
        match self.parser() {
            Ok(parser) => parsing::parse_direction(tx, parser),
            Err(e) => Extracted::fallback(None, e),
        }
    }

    /// Amount in the smallest units of the transferred asset
    pub fn amount(&self, tx: &TransactionRecord) -> String {
        self.amount_with_diagnostic(tx).into_value("amount")
    }

    pub fn amount_with_diagnostic(&self, tx: &TransactionRecord) -> Extracted<String> {
        parsing::parse_amount(tx)
    }

    pub fn memo(&self, tx: &TransactionRecord) -> String {
        self.memo_with_diagnostic(tx).into_value("memo")
    }

    pub fn memo_with_diagnostic(&self, tx: &TransactionRecord) -> Extracted<String> {
        parsing::parse_memo(tx)
    }

    pub fn addresses(&self, tx: &TransactionRecord) -> Result<TxAddresses, TransactionError> {
        let raw = parsing::parse_raw_addresses(tx)?;
        parsing::normalize_raw_addresses(&raw, self.parser()?)
    }

    pub fn account_address(&self, tx: &TransactionRecord) -> Result<String, TransactionError> {
        parsing::parse_account_address(tx, self.parser()?)
    }

    pub fn in_msg_hash(
        &self,
        tx: &TransactionRecord,
        hasher: &dyn CellHasher,
    ) -> Result<UInt256, TransactionError> {
        identity::compute_in_msg_hash(tx, hasher)
    }

    pub fn in_msg_hash_hex(
        &self,
        tx: &TransactionRecord,
        hasher: &dyn CellHasher,
    ) -> Result<String, TransactionError> {
        self.in_msg_hash(tx, hasher).map(|hash| hex::encode(hash.as_slice()))
    }

    /// Extracts every field at once. Fails only if the counterparties can't be resolved
    pub fn extract(&self, tx: &TransactionRecord) -> Result<ExtractionResult, TransactionError> {
        let addresses = self.addresses(tx)?;
        Ok(ExtractionResult {
            direction: self.direction(tx),
            amount: self.amount(tx),
            memo: self.memo(tx),
            addresses,
        })
    }
}

impl Default for TransactionInterpreter {
    fn default() -> Self {
        Self::from_config(&InterpreterConfig::default())
    }
}
