// Copyright (c) 2022-2023 The Beam Developers

use prost::Message;

use beam_hw_proto::prelude::*;

use crate::error::{DataError, Error};

/// [`Engine`][super::Engine] input events, typically decoded from request messages
#[derive(Clone, PartialEq, Debug)]
pub enum Event {
    None,

    /// Fetch nonce slot count
    GetNumSlots(GetNumSlots),

    /// Fetch public image of a nonce slot
    GetNoncePublic(GetNoncePublic),

    /// Export PKdf for the root or a child key
    GetPKdf(GetPKdf),

    /// Export the wallet owner key
    GetOwnerKey(GetOwnerKey),

    /// Compute range proof share for a coin
    GenerateRangeproof(GenerateRangeproof),

    /// Sign a split transaction
    SignTransactionSplit(SignTransactionSplit),

    /// Sign the receive side of a transaction
    SignTransactionReceive(SignTransactionReceive),

    /// Sign the send side of a transaction
    SignTransactionSend(SignTransactionSend),
}

fn decode<M: Message + Default>(buff: &[u8]) -> Result<M, Error> {
    M::decode(buff).map_err(|_e| {
        #[cfg(feature = "log")]
        log::warn!("decode failed: {:?}", _e);

        Error::DataError(DataError::Decode)
    })
}

impl Event {
    /// Parse an event from a message type tag and encoded message
    pub fn parse(message_type: u16, buff: &[u8]) -> Result<Self, Error> {
        let t = match MessageType::try_from(message_type) {
            Ok(t) => t,
            Err(_) => {
                #[cfg(feature = "log")]
                log::error!("unrecognised message type: {}", message_type);

                return Err(Error::UnexpectedEvent);
            }
        };

        let evt = match t {
            MessageType::GetNumSlots => Event::GetNumSlots(decode(buff)?),
            MessageType::GetNoncePublic => Event::GetNoncePublic(decode(buff)?),
            MessageType::GetPKdf => Event::GetPKdf(decode(buff)?),
            MessageType::GetOwnerKey => Event::GetOwnerKey(decode(buff)?),
            MessageType::GenerateRangeproof => Event::GenerateRangeproof(decode(buff)?),
            MessageType::SignTransactionSplit => Event::SignTransactionSplit(decode(buff)?),
            MessageType::SignTransactionReceive => Event::SignTransactionReceive(decode(buff)?),
            MessageType::SignTransactionSend => Event::SignTransactionSend(decode(buff)?),
            _ => {
                #[cfg(feature = "log")]
                log::error!("unexpected message: {}", t);

                return Err(Error::UnexpectedEvent);
            }
        };

        Ok(evt)
    }

    /// Fetch the message type for an event
    pub fn message_type(&self) -> Option<MessageType> {
        let t = match self {
            Event::None => return None,
            Event::GetNumSlots(_) => MessageType::GetNumSlots,
            Event::GetNoncePublic(_) => MessageType::GetNoncePublic,
            Event::GetPKdf(_) => MessageType::GetPKdf,
            Event::GetOwnerKey(_) => MessageType::GetOwnerKey,
            Event::GenerateRangeproof(_) => MessageType::GenerateRangeproof,
            Event::SignTransactionSplit(_) => MessageType::SignTransactionSplit,
            Event::SignTransactionReceive(_) => MessageType::SignTransactionReceive,
            Event::SignTransactionSend(_) => MessageType::SignTransactionSend,
        };

        Some(t)
    }
}

impl From<GetNumSlots> for Event {
    fn from(r: GetNumSlots) -> Self {
        Event::GetNumSlots(r)
    }
}

impl From<GetNoncePublic> for Event {
    fn from(r: GetNoncePublic) -> Self {
        Event::GetNoncePublic(r)
    }
}

impl From<GetPKdf> for Event {
    fn from(r: GetPKdf) -> Self {
        Event::GetPKdf(r)
    }
}

impl From<GetOwnerKey> for Event {
    fn from(r: GetOwnerKey) -> Self {
        Event::GetOwnerKey(r)
    }
}

impl From<GenerateRangeproof> for Event {
    fn from(r: GenerateRangeproof) -> Self {
        Event::GenerateRangeproof(r)
    }
}

impl From<SignTransactionSplit> for Event {
    fn from(r: SignTransactionSplit) -> Self {
        Event::SignTransactionSplit(r)
    }
}

impl From<SignTransactionReceive> for Event {
    fn from(r: SignTransactionReceive) -> Self {
        Event::SignTransactionReceive(r)
    }
}

impl From<SignTransactionSend> for Event {
    fn from(r: SignTransactionSend) -> Self {
        Event::SignTransactionSend(r)
    }
}
