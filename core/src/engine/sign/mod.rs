// Copyright (c) 2022-2023 The Beam Developers

//! Type state signing phases
//!
//! A [Signer] borrows the [TransactionManager] for the duration of a signing
//! request, each phase consumes the signer and returns it in the next state.

use core::marker::PhantomData;

use beam_hw_proto::prelude as proto;

use crate::{
    crypto::Crypto,
    tx::{PointField, ScalarField, TransactionManager},
    types::{SecretKey, Signature},
};

pub mod receive;
pub mod send;
pub mod split;

/// Signing protocol driver over a borrowed transaction
pub struct Signer<'a, C: Crypto, S> {
    tm: &'a mut TransactionManager,
    crypto: &'a C,
    _state: PhantomData<S>,
}

impl<'a, C: Crypto, S> Signer<'a, C, S> {
    fn with_state(tm: &'a mut TransactionManager, crypto: &'a C) -> Self {
        Self {
            tm,
            crypto,
            _state: PhantomData,
        }
    }

    fn next<N>(self) -> Signer<'a, C, N> {
        Signer::with_state(self.tm, self.crypto)
    }

    /// Fetch the transaction being signed
    pub fn transaction(&self) -> &TransactionManager {
        self.tm
    }
}

fn signature(tm: &TransactionManager, nonce_pub: PointField, k: ScalarField) -> proto::Signature {
    let s = Signature {
        nonce_pub: tm.get_point(nonce_pub),
        sign_k: SecretKey(tm.get_scalar(k)),
    };
    proto::Signature::from(&s)
}

/// Copy kernel results into a response
pub fn update_common(tm: &TransactionManager, c: &mut proto::TxCommon) {
    let k = c.kernel_params.get_or_insert_with(Default::default);

    k.commitment = Some((&tm.get_point(PointField::KernelCommitment)).into());
    k.signature = Some(signature(
        tm,
        PointField::KernelSignatureNoncePub,
        ScalarField::KernelSignatureK,
    ));

    c.offset_sk = tm.get_scalar(ScalarField::OffsetSk).to_vec();
}

/// Copy payment proof results into a response
pub fn update_mutual(tm: &TransactionManager, m: &mut proto::TxMutualInfo) {
    m.payment_proof_signature = Some(signature(
        tm,
        PointField::PaymentProofSignatureNoncePub,
        ScalarField::PaymentProofSignatureK,
    ));
}

/// Zero kernel fee and heights in a response
pub fn strip_kernel(c: &mut proto::TxCommon) {
    if let Some(k) = c.kernel_params.as_mut() {
        k.fee = 0;
        k.min_height = 0;
        k.max_height = 0;
    }
}

#[cfg(test)]
mod test {
    use alloc::vec;

    use super::*;
    use crate::types::EccPoint;

    #[test]
    fn common_fields_copied() {
        let mut tm = TransactionManager::new();
        let commitment = EccPoint {
            x: [0x11; 32],
            y: true,
        };
        let sig = Signature {
            nonce_pub: EccPoint {
                x: [0x22; 32],
                y: false,
            },
            sign_k: SecretKey([0x33; 32]),
        };
        tm.set_common_info(100, 1, 2, commitment, sig, SecretKey([0x44; 32]));

        let mut resp = proto::TxCommon {
            inputs: vec![proto::CoinId::default()],
            ..Default::default()
        };
        update_common(&tm, &mut resp);
        strip_kernel(&mut resp);

        let k = resp.kernel_params.as_ref().unwrap();
        assert_eq!(k.commitment.as_ref().unwrap().x, vec![0x11; 32]);
        assert!(k.commitment.as_ref().unwrap().y);
        assert_eq!(k.signature.as_ref().unwrap().sign_k, vec![0x33; 32]);
        assert_eq!((k.fee, k.min_height, k.max_height), (0, 0, 0));
        assert_eq!(resp.offset_sk, vec![0x44; 32]);
        assert_eq!(resp.inputs.len(), 1);
    }
}
