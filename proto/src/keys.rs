// Copyright (c) 2022-2023 The Beam Developers

//! Key export messages

use crate::common::EccPoint;

/// Request a PKdf (public key derivation) export
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetPKdf {
    #[prost(uint32, tag = "1")]
    pub child_idx: u32,
    #[prost(bool, tag = "2")]
    pub is_root_key: bool,
    #[prost(bool, tag = "3")]
    pub show_display: bool,
}

/// Exported PKdf, generator secret with cofactor images on G and J
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PKdf {
    #[prost(bytes = "vec", tag = "1")]
    pub key: ::prost::alloc::vec::Vec<u8>,
    #[prost(message, optional, tag = "2")]
    pub cofactor_g: ::core::option::Option<EccPoint>,
    #[prost(message, optional, tag = "3")]
    pub cofactor_j: ::core::option::Option<EccPoint>,
}

/// Request the wallet owner key
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetOwnerKey {
    #[prost(bool, tag = "1")]
    pub show_display: bool,
}

/// Exported owner key
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OwnerKey {
    #[prost(bytes = "vec", tag = "1")]
    pub key: ::prost::alloc::vec::Vec<u8>,
}
