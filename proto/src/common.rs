// Copyright (c) 2022-2023 The Beam Developers

//! Shared transaction objects
//!
//! ## CoinId
//!
//! Identifies a derivable coin key and its value.
//!
//! | tag | field      | type   |
//! |-----|------------|--------|
//! | 1   | `idx`      | uint64 |
//! | 2   | `type`     | uint32 |
//! | 3   | `sub_idx`  | uint32 |
//! | 4   | `amount`   | uint64 |
//! | 5   | `asset_id` | uint32 |
//!
//! ## KernelParameters
//!
//! | tag | field             | type      |
//! |-----|-------------------|-----------|
//! | 1   | `fee`             | uint64    |
//! | 2   | `commitment`      | EccPoint  |
//! | 3   | `signature`       | Signature |
//! | 4   | `min_height`      | uint64    |
//! | 5   | `max_height`      | uint64    |
//! | 6   | `asset_emission`  | sint64    |
//! | 7   | `hash_lock`       | bytes     |
//! | 8   | `multisig_nonce`  | EccPoint  |
//! | 9   | `multisig_excess` | EccPoint  |
//!

/// Compressed curve point, 32-byte x coordinate and y parity selector
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EccPoint {
    #[prost(bytes = "vec", tag = "1")]
    pub x: ::prost::alloc::vec::Vec<u8>,
    #[prost(bool, tag = "2")]
    pub y: bool,
}

/// Schnorr signature (public nonce and scalar)
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Signature {
    #[prost(message, optional, tag = "1")]
    pub nonce_pub: ::core::option::Option<EccPoint>,
    #[prost(bytes = "vec", tag = "2")]
    pub sign_k: ::prost::alloc::vec::Vec<u8>,
}

/// Coin identifier
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct CoinId {
    #[prost(uint64, tag = "1")]
    pub idx: u64,
    #[prost(uint32, tag = "2")]
    pub r#type: u32,
    #[prost(uint32, tag = "3")]
    pub sub_idx: u32,
    #[prost(uint64, tag = "4")]
    pub amount: u64,
    #[prost(uint32, tag = "5")]
    pub asset_id: u32,
}

/// Transaction kernel parameters
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct KernelParameters {
    #[prost(uint64, tag = "1")]
    pub fee: u64,
    #[prost(message, optional, tag = "2")]
    pub commitment: ::core::option::Option<EccPoint>,
    #[prost(message, optional, tag = "3")]
    pub signature: ::core::option::Option<Signature>,
    #[prost(uint64, tag = "4")]
    pub min_height: u64,
    #[prost(uint64, tag = "5")]
    pub max_height: u64,
    #[prost(sint64, tag = "6")]
    pub asset_emission: i64,
    #[prost(bytes = "vec", tag = "7")]
    pub hash_lock: ::prost::alloc::vec::Vec<u8>,
    #[prost(message, optional, tag = "8")]
    pub multisig_nonce: ::core::option::Option<EccPoint>,
    #[prost(message, optional, tag = "9")]
    pub multisig_excess: ::core::option::Option<EccPoint>,
}

/// Transaction parameters common to all signing requests
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TxCommon {
    #[prost(message, repeated, tag = "1")]
    pub inputs: ::prost::alloc::vec::Vec<CoinId>,
    #[prost(bytes = "vec", tag = "2")]
    pub offset_sk: ::prost::alloc::vec::Vec<u8>,
    #[prost(message, repeated, tag = "3")]
    pub outputs: ::prost::alloc::vec::Vec<CoinId>,
    #[prost(message, optional, tag = "4")]
    pub kernel_params: ::core::option::Option<KernelParameters>,
}

/// Two-party (send / receive) transaction parameters
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TxMutualInfo {
    #[prost(bytes = "vec", tag = "1")]
    pub peer: ::prost::alloc::vec::Vec<u8>,
    #[prost(uint64, tag = "2")]
    pub wallet_identity_key: u64,
    #[prost(message, optional, tag = "3")]
    pub payment_proof_signature: ::core::option::Option<Signature>,
}
