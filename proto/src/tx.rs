// Copyright (c) 2022-2023 The Beam Developers

//! Transaction signing messages
//!
//! Signing responses echo the request message with device-computed fields
//! filled in, so each request type doubles as its result type.
//!

use crate::common::{TxCommon, TxMutualInfo};

/// Sign a split (self-transfer) transaction
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SignTransactionSplit {
    #[prost(message, optional, tag = "1")]
    pub tx_common: ::core::option::Option<TxCommon>,
}

/// Sign the receiving side of a two-party transaction
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SignTransactionReceive {
    #[prost(message, optional, tag = "1")]
    pub tx_common: ::core::option::Option<TxCommon>,
    #[prost(message, optional, tag = "2")]
    pub tx_mutual_info: ::core::option::Option<TxMutualInfo>,
}

/// Sign the sending side of a two-party transaction
///
/// An all-zero `user_agreement` marks a fresh request, the device responds with
/// its commitments and a token which must be returned with the continuation.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SignTransactionSend {
    #[prost(message, optional, tag = "1")]
    pub tx_common: ::core::option::Option<TxCommon>,
    #[prost(message, optional, tag = "2")]
    pub tx_mutual_info: ::core::option::Option<TxMutualInfo>,
    #[prost(uint32, tag = "3")]
    pub nonce_slot: u32,
    #[prost(bytes = "vec", tag = "4")]
    pub user_agreement: ::prost::alloc::vec::Vec<u8>,
}
