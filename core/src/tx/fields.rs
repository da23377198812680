// Copyright (c) 2022-2023 The Beam Developers

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::{Display, EnumIter};

/// Point fields readable from a [TransactionManager][super::TransactionManager]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, EnumIter, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum PointField {
    KernelCommitment = 0,
    KernelSignatureNoncePub = 1,
    PaymentProofSignatureNoncePub = 2,
}

/// Scalar fields readable from a [TransactionManager][super::TransactionManager]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, EnumIter, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum ScalarField {
    KernelSignatureK = 0,
    OffsetSk = 1,
    PaymentProofSignatureK = 2,
    UserAgreement = 3,
    KernelMsg = 4,
}
