// Copyright (c) 2022-2023 The Beam Developers

//! Prelude to simplify downstream use of protocol objects
//!

pub use crate::{
    common::{CoinId, EccPoint, KernelParameters, Signature, TxCommon, TxMutualInfo},
    failure::{Failure, FailureType},
    keys::{GetOwnerKey, GetPKdf, OwnerKey, PKdf},
    nonce::{GetNoncePublic, GetNumSlots, NumSlots},
    rangeproof::{GenerateRangeproof, RangeproofData},
    tx::{SignTransactionReceive, SignTransactionSend, SignTransactionSplit},
    MessageType,
};
