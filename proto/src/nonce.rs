// Copyright (c) 2022-2023 The Beam Developers

//! Nonce slot messages

/// Request the number of available nonce slots
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetNumSlots {
    #[prost(bool, tag = "1")]
    pub show_display: bool,
}

/// Number of available nonce slots
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NumSlots {
    #[prost(uint32, tag = "1")]
    pub num_slots: u32,
}

/// Request the public image of a nonce slot, answered with an
/// [`EccPoint`][crate::common::EccPoint]
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetNoncePublic {
    #[prost(uint32, tag = "1")]
    pub slot: u32,
}
