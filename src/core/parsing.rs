use crate::address::{normalize_address, AddressParser};
use crate::models::*;

use super::models::*;
use super::payload::*;

/// Message which determines the economic meaning of a transaction
#[derive(Debug, Copy, Clone)]
pub struct EffectiveMessage<'a> {
    pub message: &'a Message,
    /// Whether the message was taken from the outbound set instead of the inbound slot
    pub from_outbound: bool,
}

/// Selects the effective message.
///
/// An internal inbound message is used as is. For external inbound (or outbound) messages
/// the first internal outbound message is used instead, e.g. the transfer a wallet emitted
/// in response to a signed external request.
pub fn resolve_effective_message(tx: &TransactionRecord) -> Option<EffectiveMessage<'_>> {
    let inbound = tx.inbound.as_ref()?;
    if inbound.kind == MessageKind::Internal {
        return Some(EffectiveMessage {
            message: inbound,
            from_outbound: false,
        });
    }

    tx.outbound
        .iter()
        .find(|message| message.kind == MessageKind::Internal)
        .map(|message| EffectiveMessage {
            message,
            from_outbound: true,
        })
}

pub fn classify(message: Option<&Message>) -> Operation {
    let message = match message {
        Some(message) => message,
        None => return Operation::Absent,
    };

    if message.op_code == Some(PLAIN_TRANSFER_OP) {
        return Operation::PlainTransfer;
    }

    match message.decoded_operation() {
        Some(DecodedOperation::JettonTransfer) => Operation::TokenTransferRequest,
        Some(DecodedOperation::JettonNotify) => Operation::TokenNotify,
        Some(DecodedOperation::Excess) => Operation::Excess,
        Some(DecodedOperation::TextComment) => Operation::TextComment,
        None => Operation::Unrecognized {
            op_code: message.op_code,
        },
    }
}

pub fn classify_transaction(tx: &TransactionRecord) -> Operation {
    classify(resolve_effective_message(tx).map(|effective| effective.message))
}

pub fn parse_amount(tx: &TransactionRecord) -> Extracted<String> {
    const ZERO: &str = "0";

    let effective = resolve_effective_message(tx);
    let message = match effective {
        Some(effective) => effective.message,
        None => {
            return Extracted::fallback(ZERO.to_owned(), TransactionError::MissingEffectiveMessage);
        }
    };

    match classify(Some(message)) {
        Operation::PlainTransfer | Operation::Excess => Extracted::ok(message.value.to_string()),
        Operation::TokenTransferRequest => match decode_jetton_transfer(message) {
            Ok(payload) => Extracted::ok(payload.amount),
            Err(e) => Extracted::fallback(ZERO.to_owned(), e),
        },
        Operation::TokenNotify => match decode_jetton_notify(message) {
            Ok(payload) => Extracted::ok(payload.amount),
            Err(e) => Extracted::fallback(ZERO.to_owned(), e),
        },
        Operation::TextComment => Extracted::ok(ZERO.to_owned()),
        Operation::Unrecognized { op_code } => Extracted::fallback(
            ZERO.to_owned(),
            TransactionError::UnsupportedOperation { op_code },
        ),
        Operation::Absent => {
            Extracted::fallback(ZERO.to_owned(), TransactionError::MissingEffectiveMessage)
        }
    }
}

/// Extracts the human comment.
///
/// Dispatches on the decoded operation name alone: a wallet comment has the plain
/// transfer op-code but is still decoded by the indexer as `text_comment`.
pub fn parse_memo(tx: &TransactionRecord) -> Extracted<String> {
    let message = match resolve_effective_message(tx) {
        Some(effective) => effective.message,
        None => {
            return Extracted::fallback(String::new(), TransactionError::MissingEffectiveMessage);
        }
    };

    let memo = match message.decoded_operation() {
        Some(DecodedOperation::JettonTransfer) => decode_jetton_transfer(message)
            .and_then(|payload| forward_comment(&payload.forward_payload)),
        Some(DecodedOperation::JettonNotify) => decode_jetton_notify(message)
            .and_then(|payload| forward_comment(&payload.forward_payload)),
        Some(DecodedOperation::TextComment) => {
            decode_text_comment(message).map(|payload| payload.text)
        }
        Some(DecodedOperation::Excess) | None => Ok(String::new()),
    };

    match memo {
        Ok(memo) => Extracted::ok(memo),
        Err(e) => Extracted::fallback(String::new(), e),
    }
}

fn forward_comment(payload: &ForwardPayload) -> Result<String, TransactionError> {
    Ok(payload.comment()?.unwrap_or_default().to_owned())
}

/// Raw (not normalized) counterparties
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct RawTxAddresses {
    pub from: Option<String>,
    pub to: Option<String>,
    pub secondary: Option<String>,
}

pub fn parse_raw_addresses(tx: &TransactionRecord) -> Result<RawTxAddresses, TransactionError> {
    let message = resolve_effective_message(tx)
        .ok_or(TransactionError::MissingEffectiveMessage)?
        .message;

    let source = message.source_address().map(str::to_owned);
    let destination = message.destination_address().map(str::to_owned);

    Ok(match classify(Some(message)) {
        Operation::PlainTransfer => RawTxAddresses {
            from: source,
            to: destination,
            secondary: None,
        },
        Operation::TokenTransferRequest => {
            let payload = decode_jetton_transfer(message)?;
            RawTxAddresses {
                from: source,
                to: Some(payload.destination),
                secondary: destination,
            }
        }
        Operation::TokenNotify => {
            let payload = decode_jetton_notify(message)?;
            RawTxAddresses {
                from: Some(payload.sender),
                to: destination,
                secondary: source,
            }
        }
        Operation::Excess => RawTxAddresses {
            from: source.clone(),
            to: destination,
            secondary: source,
        },
        // Comments carry no counterparties of their own
        Operation::TextComment => {
            return Err(TransactionError::UnsupportedOperation {
                op_code: message.op_code,
            });
        }
        Operation::Unrecognized { op_code } => {
            return Err(TransactionError::UnsupportedOperation { op_code });
        }
        Operation::Absent => return Err(TransactionError::MissingEffectiveMessage),
    })
}

/// Normalizes the counterparties through `parser`.
///
/// Addresses are parsed in `to`, `from`, `secondary` order and the first failure is returned.
/// Missing or empty addresses stay empty.
pub fn parse_addresses(
    tx: &TransactionRecord,
    parser: &dyn AddressParser,
) -> Result<TxAddresses, TransactionError> {
    normalize_raw_addresses(&parse_raw_addresses(tx)?, parser)
}

pub fn normalize_raw_addresses(
    raw: &RawTxAddresses,
    parser: &dyn AddressParser,
) -> Result<TxAddresses, TransactionError> {
    let normalize = |raw: &Option<String>| match raw.as_deref() {
        Some(raw) if !raw.is_empty() => normalize_address(parser, raw),
        _ => Ok(String::new()),
    };

    let to = normalize(&raw.to)?;
    let from = normalize(&raw.from)?;
    let secondary = normalize(&raw.secondary)?;

    Ok(TxAddresses {
        from,
        to,
        secondary,
    })
}

pub fn parse_account_address(
    tx: &TransactionRecord,
    parser: &dyn AddressParser,
) -> Result<String, TransactionError> {
    normalize_address(parser, &tx.account.address)
}

/// Outgoing when the normalized sender is the transaction's own account.
///
/// Unknown when the counterparties can't be resolved or the sender is missing.
pub fn parse_direction(
    tx: &TransactionRecord,
    parser: &dyn AddressParser,
) -> Extracted<Option<TransactionDirection>> {
    let raw = match parse_raw_addresses(tx) {
        Ok(raw) => raw,
        Err(e) => return Extracted::fallback(None, e),
    };

    let addresses = match normalize_raw_addresses(&raw, parser) {
        Ok(addresses) => addresses,
        Err(e) => return Extracted::fallback(None, e),
    };

    // The triple keeps a missing sender empty, but it can't be compared with the account
    if addresses.from.is_empty() {
        let raw_from = raw.from.as_deref().unwrap_or_default();
        if let Err(e) = normalize_address(parser, raw_from) {
            return Extracted::fallback(None, e);
        }
    }

    let account = match parse_account_address(tx, parser) {
        Ok(account) => account,
        Err(e) => return Extracted::fallback(None, e),
    };

    Extracted::ok(Some(if addresses.from == account {
        TransactionDirection::Out
    } else {
        TransactionDirection::In
    }))
}
