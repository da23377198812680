// Copyright (c) 2022-2023 The Beam Developers

//! Transaction aggregation state
//!
//! A [TransactionManager] holds the parameters and per-session secrets for a
//! single signing request. Signing phases read from and write results back
//! into the same fields, responses are built via [`TransactionManager::get_point`]
//! and [`TransactionManager::get_scalar`].
//!
//! All secret material is cleared by [`TransactionManager::clear_state`],
//! which is also called on drop.

use alloc::vec::Vec;

use strum::{Display, EnumIter};
use zeroize::Zeroize;

use crate::{
    consts::INVALID_NONCE_SLOT,
    nonce::is_valid_slot,
    types::{CoinId, CommonInfo, EccPoint, Kdf, KernelParams, MutualInfo, SecretKey, Signature},
};

mod aggr;
pub use aggr::{CoinTotals, TxAggr, TxAggrInfo};

mod fields;
pub use fields::{PointField, ScalarField};

pub mod kernel;

mod sign;

/// Transaction kinds, bound into kernel identifiers
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, EnumIter)]
#[repr(u8)]
pub enum TxKind {
    Split = 1,
    Receive = 2,
    Send = 3,
}

/// Per-session secrets and intermediate values
#[derive(Clone, Default, PartialEq, Zeroize)]
pub(crate) struct Session {
    pub aggr: TxAggr,
    pub kernel_id: [u8; 32],
    pub sk_krn: SecretKey,
    pub sk_nonce: SecretKey,
    pub kernel_msg: [u8; 32],
    /// Wallet-id (payment proof) message
    pub pp_msg: [u8; 32],
    /// Device contribution to the kernel commitment
    pub commitment: EccPoint,
    /// Device contribution to the kernel nonce
    pub nonce_pub: EccPoint,
    pub user_agreement: [u8; 32],
    pub send_phase: u32,
}

/// Transaction state for a single signing request
pub struct TransactionManager {
    kdf: Option<Kdf>,

    inputs: Vec<CoinId>,
    outputs: Vec<CoinId>,

    kernel: KernelParams,
    offset_sk: SecretKey,

    mutual: MutualInfo,

    nonce_slot: u32,
    user_agreement: [u8; 32],

    session: Session,
}

impl Default for TransactionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionManager {
    pub fn new() -> Self {
        Self {
            kdf: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
            kernel: KernelParams::default(),
            offset_sk: SecretKey::ZERO,
            mutual: MutualInfo::default(),
            nonce_slot: INVALID_NONCE_SLOT,
            user_agreement: [0u8; 32],
            session: Session::default(),
        }
    }

    /// Set the key derivation context for this session
    pub fn init_keykeeper(&mut self, kdf: Kdf) {
        self.kdf = Some(kdf);
    }

    pub fn add_input(&mut self, cid: CoinId) {
        self.inputs.push(cid);
    }

    pub fn add_output(&mut self, cid: CoinId) {
        self.outputs.push(cid);
    }

    pub fn set_common_info(
        &mut self,
        fee: u64,
        min_height: u64,
        max_height: u64,
        commitment: EccPoint,
        signature: Signature,
        offset_sk: SecretKey,
    ) {
        self.kernel = KernelParams {
            fee,
            min_height,
            max_height,
            commitment,
            signature,
        };
        self.offset_sk = offset_sk;
    }

    /// Load coins and kernel parameters from validated common info
    pub fn set_common(&mut self, c: &CommonInfo) {
        for cid in &c.inputs {
            self.add_input(*cid);
        }
        for cid in &c.outputs {
            self.add_output(*cid);
        }

        let k = &c.kernel;
        self.set_common_info(
            k.fee,
            k.min_height,
            k.max_height,
            k.commitment,
            k.signature.clone(),
            c.offset_sk.clone(),
        );
    }

    pub fn set_mutual_info(
        &mut self,
        peer: [u8; 32],
        wallet_identity_key: u64,
        payment_proof_signature: Signature,
    ) {
        self.mutual = MutualInfo {
            peer,
            wallet_identity_key,
            payment_proof_signature,
        };
    }

    /// Set sender parameters, returning false for invalid nonce slots
    pub fn set_sender_params(&mut self, nonce_slot: u32, user_agreement: &[u8; 32]) -> bool {
        if !is_valid_slot(nonce_slot) {
            return false;
        }

        self.nonce_slot = nonce_slot;
        self.user_agreement = *user_agreement;

        true
    }

    pub fn get_point(&self, f: PointField) -> EccPoint {
        match f {
            PointField::KernelCommitment => self.kernel.commitment,
            PointField::KernelSignatureNoncePub => self.kernel.signature.nonce_pub,
            PointField::PaymentProofSignatureNoncePub => {
                self.mutual.payment_proof_signature.nonce_pub
            }
        }
    }

    pub fn get_scalar(&self, f: ScalarField) -> [u8; 32] {
        match f {
            ScalarField::KernelSignatureK => self.kernel.signature.sign_k.0,
            ScalarField::OffsetSk => self.offset_sk.0,
            ScalarField::PaymentProofSignatureK => self.mutual.payment_proof_signature.sign_k.0,
            ScalarField::UserAgreement => self.user_agreement,
            ScalarField::KernelMsg => self.session.kernel_msg,
        }
    }

    /// Fetch the aggregated coin values
    pub fn tx_aggr(&self) -> TxAggrInfo {
        self.session.aggr.info
    }

    pub fn inputs(&self) -> &[CoinId] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[CoinId] {
        &self.outputs
    }

    pub fn kernel(&self) -> &KernelParams {
        &self.kernel
    }

    pub fn mutual_info(&self) -> &MutualInfo {
        &self.mutual
    }

    pub fn nonce_slot(&self) -> u32 {
        self.nonce_slot
    }

    /// Check whether a send request is fresh (all-zero user agreement)
    pub fn is_fresh_request(&self) -> bool {
        self.user_agreement.iter().all(|b| *b == 0)
    }

    /// Zero all parameters and secrets, returning to the initial state
    pub fn clear_state(&mut self) {
        // Zeroize keys
        if let Some(k) = self.kdf.as_mut() {
            k.zeroize();
        }
        self.kdf = None;

        self.inputs.zeroize();
        self.outputs.zeroize();

        self.kernel.zeroize();
        self.offset_sk.zeroize();
        self.mutual.zeroize();

        self.nonce_slot = INVALID_NONCE_SLOT;
        self.user_agreement.zeroize();

        self.session.zeroize();
    }

    /// Check all parameters and secrets are cleared
    pub fn is_clear(&self) -> bool {
        self.kdf.is_none()
            && self.inputs.is_empty()
            && self.outputs.is_empty()
            && self.kernel == KernelParams::default()
            && self.offset_sk.is_zero()
            && self.mutual == MutualInfo::default()
            && self.nonce_slot == INVALID_NONCE_SLOT
            && self.user_agreement == [0u8; 32]
            && self.session == Session::default()
    }
}

impl Drop for TransactionManager {
    fn drop(&mut self) {
        self.clear_state();
    }
}
