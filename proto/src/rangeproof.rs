// Copyright (c) 2022-2023 The Beam Developers

//! Range proof messages

use crate::common::{CoinId, EccPoint};

/// Request the device share of a multi-party range proof for a coin
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GenerateRangeproof {
    #[prost(message, optional, tag = "1")]
    pub cid: ::core::option::Option<CoinId>,
    #[prost(message, optional, tag = "2")]
    pub pt0: ::core::option::Option<EccPoint>,
    #[prost(message, optional, tag = "3")]
    pub pt1: ::core::option::Option<EccPoint>,
    #[prost(bytes = "vec", optional, tag = "4")]
    pub extra_sk0: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "5")]
    pub extra_sk1: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
}

/// Range proof fragment
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RangeproofData {
    #[prost(bytes = "vec", tag = "1")]
    pub data_taux: ::prost::alloc::vec::Vec<u8>,
    #[prost(bool, tag = "2")]
    pub is_successful: bool,
    #[prost(message, optional, tag = "3")]
    pub pt0: ::core::option::Option<EccPoint>,
    #[prost(message, optional, tag = "4")]
    pub pt1: ::core::option::Option<EccPoint>,
}
