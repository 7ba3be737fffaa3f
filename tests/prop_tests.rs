use proptest::prelude::*;
use serde_json::{json, Value};

use ton_transfers::core::parsing;
use ton_transfers::models::{AccountAddress, Message, MessageKind, PLAIN_TRANSFER_OP};
use ton_transfers::*;

const RAW_ADDRESSES: [&str; 3] = [
    "0:98aa4f77fcb41fe2c0ee4d0934c9f993a49011c2f12ff5e0f69476b9ad836635",
    "0:849b89720a3fa1ba31f217df86be9ace43ce2ccc83f9885feb065a345774dd0b",
    "0:550f9613fd2f3f011d5574e0ae5453da181d34b7aa78cbf2e6982d841f30cfa1",
];

fn raw_address() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => prop::sample::select(RAW_ADDRESSES.to_vec()).prop_map(str::to_owned),
        1 => Just(String::new()),
        1 => "[a-z0-9:]{0,12}",
    ]
}

fn op_code() -> impl Strategy<Value = Option<u32>> {
    prop_oneof![
        Just(None),
        Just(Some(PLAIN_TRANSFER_OP)),
        Just(Some(0x0f8a7ea5)),
        Just(Some(0x7362d09c)),
        Just(Some(0xd53276db)),
        any::<u32>().prop_map(Some),
    ]
}

fn decoded_name() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("jetton_transfer".to_owned())),
        Just(Some("jetton_notify".to_owned())),
        Just(Some("excess".to_owned())),
        Just(Some("text_comment".to_owned())),
        "[a-z_]{1,16}".prop_map(Some),
    ]
}

fn decoded_body() -> impl Strategy<Value = Option<Value>> {
    let comment = prop_oneof![
        Just(json!(null)),
        "[ -~]{0,16}".prop_map(|text| json!({
            "is_right": true,
            "value": {"sum_type": "TextComment", "op_code": 0, "value": {"text": text}}
        })),
        Just(json!({"is_right": true, "value": {"sum_type": "TextComment", "value": {}}})),
    ];

    prop_oneof![
        Just(None),
        Just(Some(json!({}))),
        "[ -~]{0,16}".prop_map(|text| Some(json!({ "text": text }))),
        (any::<u64>(), raw_address(), comment.clone()).prop_map(|(amount, destination, forward)| {
            Some(json!({
                "query_id": 0,
                "amount": amount.to_string(),
                "destination": destination,
                "response_destination": RAW_ADDRESSES[0],
                "forward_ton_amount": "1",
                "forward_payload": forward,
            }))
        }),
        (any::<u64>(), raw_address(), comment).prop_map(|(amount, sender, forward)| {
            Some(json!({
                "query_id": 0,
                "amount": amount.to_string(),
                "sender": sender,
                "forward_payload": forward,
            }))
        }),
    ]
}

fn message_kind() -> impl Strategy<Value = MessageKind> {
    prop_oneof![
        3 => Just(MessageKind::Internal),
        1 => Just(MessageKind::ExternalIn),
        1 => Just(MessageKind::ExternalOut),
    ]
}

fn message() -> impl Strategy<Value = Message> {
    (
        message_kind(),
        prop::array::uniform32(0u8..),
        op_code(),
        decoded_name(),
        decoded_body(),
        prop::option::of(raw_address()),
        prop::option::of(raw_address()),
        any::<u64>(),
    )
        .prop_map(
            |(kind, hash, op_code, name, body, source, destination, value)| Message {
                kind,
                hash,
                op_code,
                decoded_operation_name: name,
                decoded_body: body,
                raw_body: None,
                source: source.map(|address| AccountAddress { address }),
                destination: destination.map(|address| AccountAddress { address }),
                value,
            },
        )
}

fn record() -> impl Strategy<Value = TransactionRecord> {
    (
        raw_address(),
        prop::option::of(message()),
        prop::collection::vec(message(), 0..4),
    )
        .prop_map(|(account, inbound, outbound)| TransactionRecord {
            account: AccountAddress { address: account },
            inbound,
            outbound,
        })
}

proptest! {
    /// Every message classifies to exactly one kind, and op-code 0 always wins.
    #[test]
    fn classifier_is_total(message in message()) {
        let operation = parsing::classify(Some(&message));
        if message.op_code == Some(PLAIN_TRANSFER_OP) {
            prop_assert_eq!(operation, Operation::PlainTransfer);
        } else if message.decoded_operation().is_none() {
            prop_assert_eq!(operation, Operation::Unrecognized { op_code: message.op_code });
        } else {
            prop_assert!(!matches!(
                operation,
                Operation::Absent | Operation::PlainTransfer | Operation::Unrecognized { .. }
            ));
        }
    }

    /// Extractors hold no state between calls.
    #[test]
    fn extractors_are_idempotent(tx in record()) {
        let interpreter = TransactionInterpreter::default();

        prop_assert_eq!(interpreter.amount(&tx), interpreter.amount(&tx));
        prop_assert_eq!(interpreter.memo(&tx), interpreter.memo(&tx));
        prop_assert_eq!(interpreter.direction(&tx), interpreter.direction(&tx));
        prop_assert_eq!(
            interpreter.addresses(&tx).ok(),
            interpreter.addresses(&tx).ok()
        );
    }

    /// All extractors agree on whether an effective message exists.
    #[test]
    fn extractors_share_effective_message(tx in record()) {
        let interpreter = TransactionInterpreter::default();

        if let Err(TransactionError::MissingEffectiveMessage) = interpreter.addresses(&tx) {
            prop_assert!(parsing::resolve_effective_message(&tx).is_none());
            prop_assert_eq!(interpreter.direction(&tx), None);
            prop_assert_eq!(interpreter.amount(&tx), "0");
            prop_assert_eq!(interpreter.memo(&tx), "");
        } else {
            prop_assert!(parsing::resolve_effective_message(&tx).is_some());
        }
    }

    /// Direction is known exactly when the counterparties, the sender and the account resolve.
    #[test]
    fn direction_requires_addresses(tx in record()) {
        let interpreter = TransactionInterpreter::default();

        let resolved = match (interpreter.addresses(&tx), interpreter.account_address(&tx)) {
            (Ok(addresses), Ok(_)) if addresses.from.is_empty() => None,
            (Ok(addresses), Ok(account)) => Some(if addresses.from == account {
                TransactionDirection::Out
            } else {
                TransactionDirection::In
            }),
            _ => None,
        };
        prop_assert_eq!(interpreter.direction(&tx), resolved);
    }

    /// Plain transfers report the attached value.
    #[test]
    fn plain_transfer_amount_is_value(mut message in message(), value in any::<u64>()) {
        message.kind = MessageKind::Internal;
        message.op_code = Some(PLAIN_TRANSFER_OP);
        message.value = value;
        let tx = TransactionRecord {
            account: AccountAddress { address: RAW_ADDRESSES[0].to_owned() },
            inbound: Some(message),
            outbound: Vec::new(),
        };

        let amount = TransactionInterpreter::default().amount_with_diagnostic(&tx);
        prop_assert!(amount.diagnostic.is_none());
        prop_assert_eq!(amount.value, value.to_string());
    }
}
