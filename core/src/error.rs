// Copyright (c) 2022-2023 The Beam Developers

//! Engine error types, crypto status codes and their wire mappings

use core::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::{EnumIter, EnumString, EnumVariantNames};

use beam_hw_proto::failure::{Failure, FailureType};

/// [Engine][crate::engine::Engine] errors
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
pub enum Error {
    /// Seed or nonce generator missing
    #[cfg_attr(feature = "thiserror", error("{0}"))]
    NotInitialized(Uninit),

    /// Master nonce already exists
    #[cfg_attr(feature = "thiserror", error("Nonce Generator is already initialized"))]
    AlreadyInitialized,

    /// Malformed or out-of-range request field
    #[cfg_attr(feature = "thiserror", error("{0}"))]
    DataError(DataError),

    /// Non-OK status from the crypto layer or signing protocol
    #[cfg_attr(feature = "thiserror", error("{0}"))]
    ProcessError(Status),

    /// User declined a confirmation
    #[cfg_attr(feature = "thiserror", error("Action cancelled by user"))]
    ActionCancelled,

    /// Message not handled by the engine
    #[cfg_attr(feature = "thiserror", error("Unexpected message"))]
    UnexpectedEvent,

    /// Persisted storage write failed
    #[cfg_attr(feature = "thiserror", error("Storage write failed"))]
    Storage,
}

impl Error {
    /// Human readable error message, used for [Failure] responses
    pub fn message(&self) -> &'static str {
        match self {
            Error::NotInitialized(u) => u.message(),
            Error::AlreadyInitialized => "Nonce Generator is already initialized",
            Error::DataError(e) => e.message(),
            Error::ProcessError(s) => s.description(),
            Error::ActionCancelled => "Action cancelled by user",
            Error::UnexpectedEvent => "Unexpected message",
            Error::Storage => "Storage write failed",
        }
    }

    /// Wire failure code for an error
    pub fn failure_type(&self) -> FailureType {
        match self {
            Error::NotInitialized(_) => FailureType::NotInitialized,
            Error::AlreadyInitialized => FailureType::ProcessError,
            Error::DataError(_) => FailureType::DataError,
            Error::ProcessError(_) => FailureType::ProcessError,
            Error::ActionCancelled => FailureType::ActionCancelled,
            Error::UnexpectedEvent => FailureType::UnexpectedMessage,
            Error::Storage => FailureType::FirmwareError,
        }
    }

    /// Build a [Failure] response for an error
    pub fn failure(&self) -> Failure {
        Failure::new(self.failure_type(), self.message())
    }
}

impl From<DataError> for Error {
    fn from(e: DataError) -> Self {
        Error::DataError(e)
    }
}

impl From<Status> for Error {
    fn from(s: Status) -> Self {
        Error::ProcessError(s)
    }
}

/// Missing initialisation, selects the reported message
#[derive(Copy, Clone, PartialEq, Eq, Debug, EnumIter)]
pub enum Uninit {
    /// No seed / mnemonic on the device
    Device,
    /// Master nonce not yet created
    NonceGenerator,
    /// Slot count requested prior to master nonce creation
    NonceSlots,
}

impl Uninit {
    pub fn message(&self) -> &'static str {
        match self {
            Uninit::Device => "Device is not initialized",
            Uninit::NonceGenerator => "Nonce Generator is not initialized",
            Uninit::NonceSlots => "No Slots are available. Nonce Generator is not initialized",
        }
    }
}

impl fmt::Display for Uninit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Request validation errors
#[derive(Copy, Clone, PartialEq, Eq, Debug, EnumIter, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum DataError {
    InvalidPointSize = 0x01,
    InvalidExtraScalarSize = 0x02,
    InvalidSlot = 0x03,
    InvalidSenderParams = 0x04,
    InvalidNonceSlot = 0x05,
    InvalidScalarSize = 0x06,
    InvalidHeights = 0x07,
    MissingField = 0x08,
    InvalidPeer = 0x09,
    Decode = 0x0a,
}

impl DataError {
    pub fn message(&self) -> &'static str {
        match self {
            DataError::InvalidPointSize => "Invalid size of points params",
            DataError::InvalidExtraScalarSize => "Invalid size of extra scalar params",
            DataError::InvalidSlot => "Incorrect slot provided",
            DataError::InvalidSenderParams => "Sender parameters are invalid",
            DataError::InvalidNonceSlot => "Invalid nonce slot is provided",
            DataError::InvalidScalarSize => "Invalid size of scalar params",
            DataError::InvalidHeights => "Invalid kernel heights",
            DataError::MissingField => "Missing required field",
            DataError::InvalidPeer => "Invalid size of peer id",
            DataError::Decode => "Message decoding failed",
        }
    }
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Crypto / signing protocol status codes
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Debug,
    EnumString,
    EnumVariantNames,
    EnumIter,
    TryFromPrimitive,
    IntoPrimitive,
)]
#[repr(u8)]
pub enum Status {
    Ok = 0,
    Unspecified = 1,
    UserAbort = 2,
    NotImpl = 3,
    AggregationNull = 4,
    AggregationFailed = 5,
    AggregationInvalid = 6,
    WrongKernelKeys = 7,
    WrongSlot = 8,
    WrongUserAgreementToken = 9,
    WrongPaymentProofSignature = 10,
}

impl Status {
    /// Fetch firmware description for a status
    pub fn description(&self) -> &'static str {
        match self {
            Status::Ok => "Beam: OK",
            Status::Unspecified => "Beam: Unspecified error",
            Status::UserAbort => "Beam: UserAbort error",
            Status::NotImpl => "Beam: NotImpl error",
            Status::AggregationNull => "Beam: AggregationNull error",
            Status::AggregationFailed => "Beam: AggregationFailed error",
            Status::AggregationInvalid => "Beam: AggregationInvalid error",
            Status::WrongKernelKeys => "Beam: WrongKernelKeys error",
            Status::WrongSlot => "Beam: WrongSlot error",
            Status::WrongUserAgreementToken => "Beam: WrongUserAgreementToken error",
            Status::WrongPaymentProofSignature => "Beam: WrongPaymentProofSignature error",
        }
    }

    /// Fetch description for a raw status code
    pub fn describe(code: u8) -> &'static str {
        match Status::try_from(code) {
            Ok(s) => s.description(),
            Err(_) => "Beam: UNDEFINED error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod test {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn status_descriptions() {
        let tests = &[
            (0u8, "Beam: OK"),
            (1, "Beam: Unspecified error"),
            (2, "Beam: UserAbort error"),
            (3, "Beam: NotImpl error"),
            (9, "Beam: WrongUserAgreementToken error"),
            (42, "Beam: UNDEFINED error"),
            (0xff, "Beam: UNDEFINED error"),
        ];

        for (code, desc) in tests {
            assert_eq!(Status::describe(*code), *desc);
        }

        for s in Status::iter() {
            assert_eq!(Status::describe(s.into()), s.description());
        }
    }

    #[test]
    fn failure_mapping() {
        let tests = &[
            (
                Error::NotInitialized(Uninit::Device),
                FailureType::NotInitialized,
                "Device is not initialized",
            ),
            (
                Error::DataError(DataError::InvalidPointSize),
                FailureType::DataError,
                "Invalid size of points params",
            ),
            (
                Error::ProcessError(Status::AggregationFailed),
                FailureType::ProcessError,
                "Beam: AggregationFailed error",
            ),
            (
                Error::ActionCancelled,
                FailureType::ActionCancelled,
                "Action cancelled by user",
            ),
            (
                Error::UnexpectedEvent,
                FailureType::UnexpectedMessage,
                "Unexpected message",
            ),
        ];

        for (e, code, msg) in tests {
            let f = e.failure();

            assert_eq!(f.kind(), Some(*code));
            assert_eq!(f.message, *msg);
        }
    }

    #[cfg(feature = "thiserror")]
    #[test]
    fn display_matches_message() {
        let mut errors = std::vec![
            Error::AlreadyInitialized,
            Error::ActionCancelled,
            Error::UnexpectedEvent,
            Error::Storage,
        ];
        errors.extend(Uninit::iter().map(Error::NotInitialized));
        errors.extend(DataError::iter().map(Error::DataError));
        errors.extend(Status::iter().map(Error::ProcessError));

        for e in errors {
            assert_eq!(std::format!("{e}"), e.message());
        }
    }
}
