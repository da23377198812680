// Copyright (c) 2022-2023 The Beam Developers

//! Per-phase kernel math for split, receive and send transactions
//!
//! Phases update the kernel, offset and payment proof fields in place,
//! intermediate secrets are held in the session state until cleared.

use crate::{
    consts::SEND_PHASE_INIT,
    crypto::Crypto,
    error::{DataError, Error, Status},
    keys::{wallet_identity, wallet_identity_key},
    nonce::is_valid_slot,
    types::{EccPoint, Kdf, SecretKey, Signature},
};

use super::{
    kernel::{
        derived_id, kernel_id, kernel_msg, payment_proof_msg, payment_proof_nonce_id,
        user_agreement_id,
    },
    TransactionManager, TxAggr, TxKind,
};

/// Send phase markers
const SEND_PHASE_NONCE: u32 = 2;
const SEND_PHASE_AGREEMENT: u32 = 3;

fn derive<C: Crypto>(c: &C, kdf: &Kdf, label: &[u8], kernel_id: &[u8; 32]) -> SecretKey {
    c.derive_child_key(kdf, &derived_id(label, kernel_id))
}

impl TransactionManager {
    fn check_heights(&self) -> Result<(), Error> {
        match self.kernel.min_height <= self.kernel.max_height {
            true => Ok(()),
            false => Err(Error::DataError(DataError::InvalidHeights)),
        }
    }

    fn aggregate<C: Crypto>(&mut self, c: &C) -> Result<(), Status> {
        let kdf = self.kdf.as_ref().ok_or(Status::Unspecified)?;
        self.session.aggr = TxAggr::compute(c, kdf, &self.inputs, &self.outputs)?;
        Ok(())
    }

    /// Derive the device kernel key and nonce from the session kernel id
    fn derive_kernel_keys<C: Crypto>(&mut self, c: &C) -> Result<(), Status> {
        let kdf = self.kdf.as_ref().ok_or(Status::Unspecified)?;

        self.session.sk_krn = derive(c, kdf, b"krn", &self.session.kernel_id);
        self.session.sk_nonce = derive(c, kdf, b"nonce", &self.session.kernel_id);

        self.session.commitment = c.public_key(&self.session.sk_krn);
        self.session.nonce_pub = c.public_key(&self.session.sk_nonce);

        Ok(())
    }

    fn update_kernel_msg(&mut self) {
        let k = &self.kernel;

        self.session.kernel_msg = kernel_msg(
            k.fee,
            k.min_height,
            k.max_height,
            &k.commitment,
            self.session.aggr.info.asset_id,
        );
    }

    /// Device partial signature over the current kernel message and nonce
    fn sign_kernel<C: Crypto>(&self, c: &C) -> SecretKey {
        c.sign(
            &self.session.kernel_msg,
            &self.kernel.signature.nonce_pub,
            &self.session.sk_krn,
            &self.session.sk_nonce,
        )
    }

    fn verify_kernel<C: Crypto>(&self, c: &C) -> Result<(), Status> {
        match c.verify(
            &self.session.kernel_msg,
            &self.kernel.signature,
            &self.kernel.commitment,
        ) {
            true => Ok(()),
            false => Err(Status::WrongKernelKeys),
        }
    }

    /// Split part one, aggregate coins and compute the kernel commitment
    pub(crate) fn sign_split_part1<C: Crypto>(&mut self, c: &C) -> Result<(), Error> {
        self.check_heights()?;
        self.aggregate(c)?;
        self.session.aggr.check_split(self.kernel.fee)?;

        self.session.kernel_id =
            kernel_id(TxKind::Split, &self.kernel, &self.inputs, &self.outputs).finalize();
        self.derive_kernel_keys(c)?;

        self.kernel.commitment = self.session.commitment;
        self.kernel.signature.nonce_pub = self.session.nonce_pub;
        self.offset_sk = c.scalar_sub(&self.session.aggr.sk, &self.session.sk_krn);

        self.update_kernel_msg();

        Ok(())
    }

    /// Split part two, sign and check the kernel
    pub(crate) fn sign_split_part2<C: Crypto>(&mut self, c: &C) -> Result<(), Error> {
        self.kernel.signature.sign_k = self.sign_kernel(c);
        Ok(self.verify_kernel(c)?)
    }

    /// Receive, add the device contribution to the sender commitment and nonce,
    /// partially sign the kernel and sign the payment proof
    pub(crate) fn sign_receive<C: Crypto>(&mut self, c: &C) -> Result<(), Error> {
        self.check_heights()?;

        if self.kernel.commitment.is_zero() || self.kernel.signature.nonce_pub.is_zero() {
            return Err(Status::AggregationNull.into());
        }

        self.aggregate(c)?;
        self.session.aggr.check_receive()?;

        let mut o = kernel_id(TxKind::Receive, &self.kernel, &self.inputs, &self.outputs);
        o.write(&self.mutual.peer)
            .u64(self.mutual.wallet_identity_key)
            .point(&self.kernel.commitment)
            .point(&self.kernel.signature.nonce_pub)
            .scalar(&self.offset_sk);
        self.session.kernel_id = o.finalize();

        self.derive_kernel_keys(c)?;

        self.kernel.commitment = c.point_add(&self.kernel.commitment, &self.session.commitment)?;
        self.kernel.signature.nonce_pub =
            c.point_add(&self.kernel.signature.nonce_pub, &self.session.nonce_pub)?;

        let offset = c.scalar_sub(&self.session.aggr.sk, &self.session.sk_krn);
        self.offset_sk = c.scalar_add(&self.offset_sk, &offset);

        self.update_kernel_msg();
        self.kernel.signature.sign_k = self.sign_kernel(c);

        if self.mutual.has_peer() {
            self.sign_payment_proof(c)?;
        }

        Ok(())
    }

    fn sign_payment_proof<C: Crypto>(&mut self, c: &C) -> Result<(), Status> {
        let kdf = self.kdf.as_ref().ok_or(Status::Unspecified)?;
        let wid = self.mutual.wallet_identity_key;

        let (amount, asset_id) = self.session.aggr.info.received();
        self.session.pp_msg = payment_proof_msg(
            &self.session.kernel_msg,
            amount,
            asset_id,
            &self.mutual.peer,
        );

        let sk = wallet_identity_key(c, kdf, wid);
        let nonce = c.derive_child_key(kdf, &payment_proof_nonce_id(&self.session.kernel_msg, wid));
        let nonce_pub = c.public_key(&nonce);

        let sign_k = c.sign(&self.session.pp_msg, &nonce_pub, &sk, &nonce);
        self.mutual.payment_proof_signature = Signature { nonce_pub, sign_k };

        Ok(())
    }

    fn verify_payment_proof<C: Crypto>(&mut self, c: &C) -> Result<(), Status> {
        let kdf = self.kdf.as_ref().ok_or(Status::Unspecified)?;

        let (amount, asset_id) = self.session.aggr.info.spent(self.kernel.fee);
        let sender = wallet_identity(c, kdf, self.mutual.wallet_identity_key);
        self.session.pp_msg =
            payment_proof_msg(&self.session.kernel_msg, amount, asset_id, &sender);

        let receiver = EccPoint {
            x: self.mutual.peer,
            y: false,
        };

        match c.verify(
            &self.session.pp_msg,
            &self.mutual.payment_proof_signature,
            &receiver,
        ) {
            true => Ok(()),
            false => Err(Status::WrongPaymentProofSignature),
        }
    }

    /// Send part one, aggregate coins and derive the sender kernel key
    pub(crate) fn sign_send_part1<C: Crypto>(&mut self, c: &C, send_phase: u32) -> Result<(), Error> {
        if send_phase != SEND_PHASE_INIT {
            return Err(Status::Unspecified.into());
        }
        if !is_valid_slot(self.nonce_slot) {
            return Err(Status::WrongSlot.into());
        }

        self.check_heights()?;
        self.aggregate(c)?;
        self.session.aggr.check_send(self.kernel.fee)?;

        let mut o = kernel_id(TxKind::Send, &self.kernel, &self.inputs, &self.outputs);
        o.write(&self.mutual.peer)
            .u64(self.mutual.wallet_identity_key)
            .u32(self.nonce_slot);
        self.session.kernel_id = o.finalize();

        let kdf = self.kdf.as_ref().ok_or(Status::Unspecified)?;
        self.session.sk_krn = derive(c, kdf, b"krn", &self.session.kernel_id);
        self.session.commitment = c.public_key(&self.session.sk_krn);

        // Continuations carry the aggregate commitment and offset
        if self.is_fresh_request() {
            self.kernel.commitment = self.session.commitment;
            self.offset_sk = c.scalar_sub(&self.session.aggr.sk, &self.session.sk_krn);
        }

        self.session.send_phase = SEND_PHASE_INIT;

        Ok(())
    }

    /// Send part two, apply the slot nonce
    pub(crate) fn sign_send_part2<C: Crypto>(&mut self, c: &C, nonce: &SecretKey) -> Result<(), Error> {
        if self.session.send_phase != SEND_PHASE_INIT {
            return Err(Status::Unspecified.into());
        }

        self.session.sk_nonce = nonce.clone();
        self.session.nonce_pub = c.public_key(nonce);

        if self.is_fresh_request() {
            self.kernel.signature.nonce_pub = self.session.nonce_pub;
        }

        self.session.send_phase = SEND_PHASE_NONCE;

        Ok(())
    }

    /// Send part three, derive or check the user agreement token and check the
    /// receiver payment proof
    pub(crate) fn sign_send_part3<C: Crypto>(&mut self, c: &C) -> Result<(), Error> {
        if self.session.send_phase != SEND_PHASE_NONCE {
            return Err(Status::Unspecified.into());
        }

        let kdf = self.kdf.as_ref().ok_or(Status::Unspecified)?;
        let id = user_agreement_id(
            &self.session.kernel_id,
            &self.session.commitment,
            &self.session.nonce_pub,
        );
        let ua = c.derive_child_key(kdf, &id);

        self.update_kernel_msg();

        if self.is_fresh_request() {
            self.session.user_agreement = ua.0;
        } else {
            if ua.0 != self.user_agreement {
                return Err(Status::WrongUserAgreementToken.into());
            }

            if self.mutual.has_peer() {
                self.verify_payment_proof(c)?;
            }
        }

        self.session.send_phase = SEND_PHASE_AGREEMENT;

        Ok(())
    }

    /// Send part four, issue the user agreement token or complete the kernel
    /// signature
    pub(crate) fn sign_send_part4<C: Crypto>(&mut self, c: &C) -> Result<(), Error> {
        if self.session.send_phase != SEND_PHASE_AGREEMENT {
            return Err(Status::Unspecified.into());
        }

        self.update_kernel_msg();

        if self.is_fresh_request() {
            self.user_agreement = self.session.user_agreement;
            return Ok(());
        }

        let k = self.sign_kernel(c);
        self.kernel.signature.sign_k = c.scalar_add(&k, &self.kernel.signature.sign_k);

        Ok(self.verify_kernel(c)?)
    }
}
