// Copyright (c) 2022-2023 The Beam Developers

//! Beam application constants

use static_assertions::const_assert_eq;

/// Application identifier for persisted nonce storage
pub const BEAM_APP_ID: u8 = 19;

/// Storage key for the master nonce
pub const MASTER_NONCE_IDX: u16 = 0;

/// Number of externally addressable nonce slots
pub const NUM_NONCE_SLOTS: u32 = 32;

/// Invalid nonce slot, set until sender parameters are accepted
pub const INVALID_NONCE_SLOT: u32 = NUM_NONCE_SLOTS + 1;

/// Key type tag for coin keys
pub const BBS_KEY: u32 = fourcc(b"BbsM");

/// Key type tag for wallet identity keys
pub const WALLET_ID_KEY: u32 = fourcc(b"tRid");

/// Send phase accepted by part one of the send protocol
pub const SEND_PHASE_INIT: u32 = 1;

/// Length of scalars and point coordinates
pub const FIELD_LEN: usize = beam_hw_proto::FIELD_LEN;

/// Helper to build big-endian four character key type tags
pub const fn fourcc(v: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*v)
}

const_assert_eq!(BBS_KEY, 1113748301);
const_assert_eq!(FIELD_LEN, 32);
// Master nonce and slots share one storage namespace
const_assert_eq!(MASTER_NONCE_IDX, 0);
