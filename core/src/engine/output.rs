// Copyright (c) 2022-2023 The Beam Developers

use alloc::vec::Vec;

use prost::Message;

use beam_hw_proto::prelude::*;

/// [`Engine`][super::Engine] outputs (in response to events), typically encoded to response messages
#[derive(Clone, PartialEq, Debug)]
pub enum Output {
    None,

    /// Nonce slot count
    NumSlots(NumSlots),

    /// Exported PKdf
    PKdf(PKdf),

    /// Exported owner key
    OwnerKey(OwnerKey),

    /// Public nonce
    EccPoint(EccPoint),

    /// Range proof share
    RangeproofData(RangeproofData),

    /// Signed split transaction
    SignTransactionSplit(SignTransactionSplit),

    /// Partially signed receive transaction
    SignTransactionReceive(SignTransactionReceive),

    /// Send transaction step result
    SignTransactionSend(SignTransactionSend),

    /// Request failure
    Failure(Failure),
}

impl Output {
    /// Fetch the response message type for an output
    pub fn message_type(&self) -> Option<MessageType> {
        let t = match self {
            Output::None => return None,
            Output::NumSlots(_) => MessageType::NumSlots,
            Output::PKdf(_) => MessageType::PKdf,
            Output::OwnerKey(_) => MessageType::OwnerKey,
            Output::EccPoint(_) => MessageType::EccPoint,
            Output::RangeproofData(_) => MessageType::RangeproofData,
            Output::SignTransactionSplit(_) => MessageType::SignTransactionSplitResult,
            Output::SignTransactionReceive(_) => MessageType::SignTransactionReceiveResult,
            Output::SignTransactionSend(_) => MessageType::SignTransactionSendResult,
            Output::Failure(_) => MessageType::Failure,
        };

        Some(t)
    }

    /// Encode output message, empty for [`Output::None`]
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Output::None => Vec::new(),
            Output::NumSlots(m) => m.encode_to_vec(),
            Output::PKdf(m) => m.encode_to_vec(),
            Output::OwnerKey(m) => m.encode_to_vec(),
            Output::EccPoint(m) => m.encode_to_vec(),
            Output::RangeproofData(m) => m.encode_to_vec(),
            Output::SignTransactionSplit(m) => m.encode_to_vec(),
            Output::SignTransactionReceive(m) => m.encode_to_vec(),
            Output::SignTransactionSend(m) => m.encode_to_vec(),
            Output::Failure(m) => m.encode_to_vec(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn response_types() {
        let tests = &[
            (Output::None, None),
            (
                Output::NumSlots(NumSlots { num_slots: 32 }),
                Some(MessageType::NumSlots),
            ),
            (
                Output::SignTransactionSend(SignTransactionSend::default()),
                Some(MessageType::SignTransactionSendResult),
            ),
            (
                Output::Failure(Failure::new(FailureType::DataError, "Incorrect slot provided")),
                Some(MessageType::Failure),
            ),
        ];

        for (o, t) in tests {
            assert_eq!(o.message_type(), *t);
        }
    }

    #[test]
    fn encode_num_slots() {
        let o = Output::NumSlots(NumSlots { num_slots: 32 });

        assert_eq!(o.encode(), &[0x08, 0x20]);
        assert!(Output::None.encode().is_empty());
    }
}
