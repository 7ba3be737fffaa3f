//! Classification of TON indexer transactions into transfer facts:
//! direction, amount, memo and normalized counterparties.

pub use self::address::{AddressParser, AddressParserRegistry, ChainType, TonAddressFormat};
pub use self::core::identity::{BocCellHasher, CellHasher};
pub use self::core::models::{
    ExtractionResult, Extracted, Operation, TransactionDirection, TransactionError, TxAddresses,
};
pub use self::core::{InterpreterConfig, TransactionInterpreter};
pub use self::models::TransactionRecord;

pub mod address;
pub mod core;
pub mod models;
