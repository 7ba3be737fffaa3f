use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ton_transfers_utils::*;

/// Op-code of a plain value transfer (possibly carrying a text comment)
pub const PLAIN_TRANSFER_OP: u32 = 0x00000000;

/// One ledger transaction as produced by the chain indexer
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub account: AccountAddress,

    #[serde(rename = "in_msg", default, skip_serializing_if = "Option::is_none")]
    pub inbound: Option<Message>,

    #[serde(rename = "out_msgs", default)]
    pub outbound: Vec<Message>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AccountAddress {
    /// Raw `workchain:hex` address
    pub address: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "msg_type")]
    pub kind: MessageKind,

    #[serde(with = "serde_hex_array")]
    pub hash: [u8; 32],

    #[serde(default, with = "serde_optional_op_code")]
    pub op_code: Option<u32>,

    #[serde(
        rename = "decoded_op_name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub decoded_operation_name: Option<String>,

    /// Indexer-decoded body, interpreted according to `decoded_operation_name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decoded_body: Option<Value>,

    /// Hex-encoded BOC of the body, only set for external inbound messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_body: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<AccountAddress>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<AccountAddress>,

    #[serde(default, with = "serde_u64")]
    pub value: u64,
}

impl Message {
    pub fn source_address(&self) -> Option<&str> {
        self.source.as_ref().map(|account| account.address.as_str())
    }

    pub fn destination_address(&self) -> Option<&str> {
        self.destination.as_ref().map(|account| account.address.as_str())
    }

    /// Known higher-level operation, if the indexer decoded one
    pub fn decoded_operation(&self) -> Option<DecodedOperation> {
        self.decoded_operation_name
            .as_deref()
            .and_then(DecodedOperation::from_name)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    /// Value moved between two on-chain accounts
    #[serde(rename = "int_msg")]
    Internal,
    /// Message originated off-chain
    #[serde(rename = "ext_in_msg")]
    ExternalIn,
    #[serde(rename = "ext_out_msg")]
    ExternalOut,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodedOperation {
    JettonTransfer,
    JettonNotify,
    Excess,
    TextComment,
}

impl DecodedOperation {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "jetton_transfer" => Self::JettonTransfer,
            "jetton_notify" => Self::JettonNotify,
            "excess" => Self::Excess,
            "text_comment" => Self::TextComment,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JettonTransfer => "jetton_transfer",
            Self::JettonNotify => "jetton_notify",
            Self::Excess => "excess",
            Self::TextComment => "text_comment",
        }
    }
}

impl std::fmt::Display for DecodedOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded body of a `jetton_transfer` request sent to the sender's jetton wallet
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JettonTransferPayload {
    #[serde(with = "serde_u64")]
    pub query_id: u64,
    pub amount: String,
    /// Owner address of the recipient (not its jetton wallet)
    pub destination: String,
    pub response_destination: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_payload: Option<Value>,
    pub forward_ton_amount: String,
    #[serde(default)]
    pub forward_payload: ForwardPayload,
}

/// Decoded body of a `jetton_notify` sent by the recipient's jetton wallet to its owner
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JettonNotifyPayload {
    #[serde(with = "serde_u64")]
    pub query_id: u64,
    pub amount: String,
    pub sender: String,
    #[serde(default)]
    pub forward_payload: ForwardPayload,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TextCommentPayload {
    pub text: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ForwardPayload {
    #[serde(default)]
    pub is_right: bool,
    #[serde(default)]
    pub value: ForwardPayloadValue,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawForwardPayloadValue", into = "RawForwardPayloadValue")]
pub enum ForwardPayloadValue {
    #[default]
    Empty,
    /// `text` is `None` when the indexer produced no string `text` field
    TextComment {
        op_code: Option<u64>,
        text: Option<String>,
    },
    Other {
        sum_type: String,
        op_code: Option<u64>,
        fields: Map<String, Value>,
    },
}

const SUM_TYPE_TEXT_COMMENT: &str = "TextComment";

#[derive(Clone, Default, Serialize, Deserialize)]
struct RawForwardPayloadValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sum_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    op_code: Option<u64>,
    #[serde(rename = "value", default, skip_serializing_if = "Option::is_none")]
    fields: Option<Map<String, Value>>,
}

impl From<RawForwardPayloadValue> for ForwardPayloadValue {
    fn from(raw: RawForwardPayloadValue) -> Self {
        match raw.sum_type {
            None => Self::Empty,
            Some(sum_type) if sum_type == SUM_TYPE_TEXT_COMMENT => Self::TextComment {
                op_code: raw.op_code,
                text: raw
                    .fields
                    .as_ref()
                    .and_then(|fields| fields.get("text"))
                    .and_then(Value::as_str)
                    .map(str::to_owned),
            },
            Some(sum_type) => Self::Other {
                sum_type,
                op_code: raw.op_code,
                fields: raw.fields.unwrap_or_default(),
            },
        }
    }
}

impl From<ForwardPayloadValue> for RawForwardPayloadValue {
    fn from(value: ForwardPayloadValue) -> Self {
        match value {
            ForwardPayloadValue::Empty => Self::default(),
            ForwardPayloadValue::TextComment { op_code, text } => Self {
                sum_type: Some(SUM_TYPE_TEXT_COMMENT.to_owned()),
                op_code,
                fields: text.map(|text| {
                    let mut fields = Map::new();
                    fields.insert("text".to_owned(), Value::String(text));
                    fields
                }),
            },
            ForwardPayloadValue::Other {
                sum_type,
                op_code,
                fields,
            } => Self {
                sum_type: Some(sum_type),
                op_code,
                fields: Some(fields),
            },
        }
    }
}
