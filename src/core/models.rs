use serde::{Deserialize, Serialize};

use crate::address::ChainType;
use crate::models::{DecodedOperation, MessageKind};

/// Economic meaning of an effective message
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Operation {
    /// There is no effective message
    Absent,
    /// Native coin transfer, optionally with a comment
    PlainTransfer,
    /// Jetton transfer request sent to the sender's jetton wallet
    TokenTransferRequest,
    /// Jetton receipt notification sent to the recipient
    TokenNotify,
    /// Refund of unspent attached value
    Excess,
    TextComment,
    Unrecognized { op_code: Option<u32> },
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionDirection {
    In,
    Out,
}

impl TransactionDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

impl std::fmt::Display for TransactionDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized counterparties of a transfer
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TxAddresses {
    pub from: String,
    pub to: String,
    /// Jetton wallet involved in the transfer. Destination of a jetton transfer request,
    /// source of a jetton notify or excess. Empty for plain transfers
    pub secondary: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<TransactionDirection>,
    pub amount: String,
    pub memo: String,
    pub addresses: TxAddresses,
}

/// Best-effort field value together with the reason a default was substituted
#[derive(Debug)]
pub struct Extracted<T> {
    pub value: T,
    pub diagnostic: Option<TransactionError>,
}

impl<T> Extracted<T> {
    pub(crate) fn ok(value: T) -> Self {
        Self {
            value,
            diagnostic: None,
        }
    }

    pub(crate) fn fallback(value: T, diagnostic: TransactionError) -> Self {
        Self {
            value,
            diagnostic: Some(diagnostic),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.diagnostic.is_some()
    }

    /// Logs the diagnostic (if any) and returns the value
    pub fn into_value(self, field: &str) -> T {
        if let Some(diagnostic) = &self.diagnostic {
            log::warn!("Failed to extract transaction {field}: {diagnostic}");
        }
        self.value
    }
}

#[derive(thiserror::Error, Debug)]
pub enum TransactionError {
    #[error("Internal message not found")]
    MissingEffectiveMessage,
    #[error("Inbound message not found")]
    MissingInboundMessage,
    #[error("Unsupported op_code {}", display_op_code(.op_code))]
    UnsupportedOperation { op_code: Option<u32> },
    #[error("Unsupported chain type: {0}")]
    UnknownChainType(ChainType),
    #[error("Failed to parse address `{address}`: {reason}")]
    AddressParseError {
        address: String,
        reason: anyhow::Error,
    },
    #[error("Failed to decode {operation} payload: {reason}")]
    PayloadDecodeError {
        operation: DecodedOperation,
        reason: serde_json::Error,
    },
    #[error("Forward payload text comment has no string `text` field")]
    MalformedForwardPayload,
    #[error("Unrecognized message kind: {0:?}")]
    UnrecognizedMessageKind(MessageKind),
    #[error("Invalid raw body")]
    InvalidRawBody(#[from] hex::FromHexError),
    #[error("Failed to compute cell hash: {0}")]
    CellHash(anyhow::Error),
}

fn display_op_code(op_code: &Option<u32>) -> String {
    match op_code {
        Some(op_code) => format!("0x{op_code:08x}"),
        None => "<none>".to_owned(),
    }
}
