// Copyright (c) 2022-2023 The Beam Developers

//! Beam hardware wallet core
//!
//! This provides a common [Engine][engine] supporting Beam (Mimblewimble) transaction
//! co-signing, key export and nonce management for execution on hardware wallets.
//!
//! Interactions with the [Engine][engine] are performed via [Event][engine::Event]s and
//! [Output][engine::Output]s, see [beam_hw_proto] for message objects and wire encodings.
//! Curve arithmetic is provided by a [Crypto][crypto::Crypto] implementation, nonce
//! persistence by a [Storage][nonce::Storage] implementation, and confirmation dialogs
//! and seed access by the platform [Driver][engine::Driver].
//!
//! ## Operations
//!
//! ### Key export
//!
//! The owner key can be requested via [`GetOwnerKey`][beam_hw_proto::keys::GetOwnerKey],
//! returning an [`OwnerKey`][beam_hw_proto::keys::OwnerKey]. Public key derivation material
//! for the root or a child KDF is requested with [`GetPKdf`][beam_hw_proto::keys::GetPKdf].
//! Both always require user confirmation for root key material.
//!
//! ### Nonce slots
//!
//! The device reserves [`NUM_NONCE_SLOTS`][consts::NUM_NONCE_SLOTS] one-time nonces derived
//! from a master nonce created during device setup ([`Engine::create_master_nonce`][engine::Engine::create_master_nonce]).
//! Public images are fetched via [`GetNoncePublic`][beam_hw_proto::nonce::GetNoncePublic],
//! and a slot is rotated whenever its secret is used to complete a signature.
//!
//! ### Executing a transaction
//!
//! Each signing request is handled to completion within a single [`Engine::update`][engine::Engine::update]
//! call, transaction state is cleared on every exit path.
//!
//! - Split (self-transfer): [`SignTransactionSplit`][beam_hw_proto::tx::SignTransactionSplit],
//!   two phases, returns a fully signed kernel.
//! - Receive: [`SignTransactionReceive`][beam_hw_proto::tx::SignTransactionReceive],
//!   a single phase adding the receiver contribution and payment proof.
//! - Send: [`SignTransactionSend`][beam_hw_proto::tx::SignTransactionSend],
//!   four parts executed over two round trips.
//!     1. Issue the request with an all-zero `user_agreement` to fetch the sender
//!        commitment, public nonce, offset and a user agreement token.
//!     2. Pass these to the receiver wallet to fetch the receiver contribution.
//!     3. Re-issue the request with the receiver contribution and the returned
//!        token to fetch the final kernel signature.
//!

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use beam_hw_proto::{self as proto};

pub mod consts;

pub mod crypto;

pub mod engine;

pub mod error;

pub mod helpers;

pub mod keys;

pub mod nonce;

pub mod oracle;

pub mod tx;

pub mod types;
