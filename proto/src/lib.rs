// Copyright (c) 2022-2023 The Beam Developers

//! Protocol / message definitions for Beam hardware wallet communication
//!
//! Messages use the protobuf encoding shared with the host wallet, with field tags
//! matching the existing Beam firmware message schema so hosts can reuse their
//! generated bindings. Framing and multiplexing are the transport's concern, each
//! request is identified by a [`MessageType`] tag and carries exactly one message.
//!
//! Scalars and point coordinates are carried as 32-byte `bytes` fields, length
//! checks happen in the engine before any value is used.
//!

#![no_std]

extern crate alloc;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::{Display, EnumIter, EnumString, EnumVariantNames};

pub mod common;
pub mod failure;
pub mod keys;
pub mod nonce;
pub mod prelude;
pub mod rangeproof;
pub mod tx;

/// Length of encoded scalars and point x coordinates
pub const FIELD_LEN: usize = 32;

/// Beam message type tags
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    EnumString,
    Display,
    EnumVariantNames,
    EnumIter,
    TryFromPrimitive,
    IntoPrimitive,
)]
#[repr(u16)]
pub enum MessageType {
    /// Failure response
    Failure = 3,

    /// Request owner key export
    GetOwnerKey = 907,
    /// Exported owner key
    OwnerKey = 908,

    /// Request public image of a nonce slot
    GetNoncePublic = 910,
    /// Public nonce / point response
    EccPoint = 911,

    /// Request range proof fragment
    GenerateRangeproof = 912,
    /// Range proof fragment response
    RangeproofData = 913,

    /// Request PKdf export
    GetPKdf = 915,
    /// Exported PKdf
    PKdf = 916,

    /// Sign a send transaction (initiator side)
    SignTransactionSend = 917,
    /// Partially signed send transaction
    SignTransactionSendResult = 918,

    /// Sign a receive transaction (responder side)
    SignTransactionReceive = 919,
    /// Partially signed receive transaction
    SignTransactionReceiveResult = 920,

    /// Sign a split (self-transfer) transaction
    SignTransactionSplit = 921,
    /// Signed split transaction
    SignTransactionSplitResult = 922,

    /// Request number of available nonce slots
    GetNumSlots = 923,
    /// Number of available nonce slots
    NumSlots = 924,
}

impl MessageType {
    /// Response type expected for a request type, `None` for responses
    pub fn response(&self) -> Option<MessageType> {
        use MessageType::*;

        match self {
            GetOwnerKey => Some(OwnerKey),
            GetNoncePublic => Some(EccPoint),
            GenerateRangeproof => Some(RangeproofData),
            GetPKdf => Some(PKdf),
            SignTransactionSend => Some(SignTransactionSendResult),
            SignTransactionReceive => Some(SignTransactionReceiveResult),
            SignTransactionSplit => Some(SignTransactionSplitResult),
            GetNumSlots => Some(NumSlots),
            _ => None,
        }
    }
}
