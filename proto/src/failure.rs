// Copyright (c) 2022-2023 The Beam Developers

//! Failure responses

/// Failure codes, shared with the host wallet
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum FailureType {
    UnexpectedMessage = 1,
    ButtonExpected = 2,
    DataError = 3,
    ActionCancelled = 4,
    PinExpected = 5,
    PinCancelled = 6,
    PinInvalid = 7,
    InvalidSignature = 8,
    ProcessError = 9,
    NotEnoughFunds = 10,
    NotInitialized = 11,
    PinMismatch = 12,
    FirmwareError = 99,
}

/// Failure response, returned in place of the expected response message
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Failure {
    #[prost(enumeration = "FailureType", tag = "1")]
    pub code: i32,
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,
}

impl Failure {
    /// Create a failure response with the provided code and message
    pub fn new(code: FailureType, message: &str) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
        }
    }

    /// Fetch failure code, `None` for unrecognised codes
    pub fn kind(&self) -> Option<FailureType> {
        FailureType::from_i32(self.code)
    }
}
