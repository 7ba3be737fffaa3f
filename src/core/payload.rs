use serde::Deserialize;
use serde_json::Value;

use super::models::TransactionError;
use crate::models::*;

static NULL_BODY: Value = Value::Null;

pub fn decode_jetton_transfer(
    message: &Message,
) -> Result<JettonTransferPayload, TransactionError> {
    decode_body(message, DecodedOperation::JettonTransfer)
}

pub fn decode_jetton_notify(message: &Message) -> Result<JettonNotifyPayload, TransactionError> {
    decode_body(message, DecodedOperation::JettonNotify)
}

pub fn decode_text_comment(message: &Message) -> Result<TextCommentPayload, TransactionError> {
    decode_body(message, DecodedOperation::TextComment)
}

fn decode_body<'a, T>(
    message: &'a Message,
    operation: DecodedOperation,
) -> Result<T, TransactionError>
where
    T: Deserialize<'a>,
{
    // A missing body is decoded as `null` so it fails like any other malformed body
    let body = message.decoded_body.as_ref().unwrap_or(&NULL_BODY);
    T::deserialize(body)
        .map_err(|reason| TransactionError::PayloadDecodeError { operation, reason })
}

impl ForwardPayload {
    /// Comment carried in the forward payload, `None` for any other payload kind
    pub fn comment(&self) -> Result<Option<&str>, TransactionError> {
        match &self.value {
            ForwardPayloadValue::TextComment {
                text: Some(text), ..
            } => Ok(Some(text)),
            ForwardPayloadValue::TextComment { text: None, .. } => {
                Err(TransactionError::MalformedForwardPayload)
            }
            ForwardPayloadValue::Empty | ForwardPayloadValue::Other { .. } => Ok(None),
        }
    }
}
