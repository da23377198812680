// Copyright (c) 2022-2023 The Beam Developers

//! Transaction signing request handlers
//!
//! Requests are validated before any secret is derived, the response echoes
//! the request with device computed fields filled in.

use beam_hw_proto::prelude as proto;

use crate::{
    consts::FIELD_LEN,
    crypto::Crypto,
    error::{DataError, Error},
    nonce::{is_valid_slot, NonceVault},
    tx::{ScalarField, TransactionManager},
    types::{CommonInfo, MutualInfo},
};

use super::{
    prompt::{require_confirm, require_hold, Prompt},
    sign::{self, Signer},
    Driver, Engine, Output,
};

/// Parse a send request user agreement, empty values are fresh requests
fn parse_user_agreement(v: &[u8]) -> Result<[u8; 32], Error> {
    match v.len() {
        0 => Ok([0u8; 32]),
        FIELD_LEN => {
            let mut ua = [0u8; 32];
            ua.copy_from_slice(v);
            Ok(ua)
        }
        _ => Err(Error::DataError(DataError::InvalidSenderParams)),
    }
}

fn parse_common(c: Option<&proto::TxCommon>) -> Result<CommonInfo, DataError> {
    let c = c.ok_or(DataError::MissingField)?;
    CommonInfo::try_from(c)
}

fn parse_mutual(m: Option<&proto::TxMutualInfo>) -> Result<MutualInfo, DataError> {
    let m = m.ok_or(DataError::MissingField)?;
    MutualInfo::try_from(m)
}

/// Spending and kernel review shown prior to sender signature phases
fn review_send<DRV: Driver>(drv: &mut DRV, tm: &TransactionManager) -> Result<(), Error> {
    let fee = tm.kernel().fee;

    require_hold(drv, &Prompt::tx_aggr("Confirm spending", &tm.tx_aggr(), fee))?;
    require_confirm(drv, &Prompt::kernel_info("Confirm send tx", tm.kernel()))
}

impl<DRV: Driver, C: Crypto> Engine<DRV, C> {
    /// Sign a split transaction
    #[cfg_attr(feature = "noinline", inline(never))]
    pub(super) fn sign_split(&mut self, req: &proto::SignTransactionSplit) -> Result<Output, Error> {
        let info = parse_common(req.tx_common.as_ref())?;

        require_hold(&mut self.drv, &Prompt::transfer(&info.inputs, &info.outputs))?;

        let kdf = self.kdf()?;
        self.tm.init_keykeeper(kdf);
        self.tm.set_common(&info);

        let mut resp = req.clone();
        let common = resp.tx_common.get_or_insert_with(Default::default);

        let signer = Signer::split(&mut self.tm, &self.crypto).commit()?;
        sign::update_common(signer.transaction(), common);

        let tm = signer.transaction();
        require_confirm(
            &mut self.drv,
            &Prompt::hex("Kernel msg", &tm.get_scalar(ScalarField::KernelMsg)),
        )?;
        require_confirm(&mut self.drv, &Prompt::kernel_info("Confirm split tx", tm.kernel()))?;

        let signer = signer.sign()?;
        sign::update_common(signer.transaction(), common);
        sign::strip_kernel(common);

        #[cfg(feature = "log")]
        log::debug!("signed split transaction");

        Ok(Output::SignTransactionSplit(resp))
    }

    /// Sign the receive side of a transaction
    #[cfg_attr(feature = "noinline", inline(never))]
    pub(super) fn sign_receive(
        &mut self,
        req: &proto::SignTransactionReceive,
    ) -> Result<Output, Error> {
        let info = parse_common(req.tx_common.as_ref())?;
        let mutual = parse_mutual(req.tx_mutual_info.as_ref())?;

        let kdf = self.kdf()?;
        self.tm.init_keykeeper(kdf);
        self.tm.set_common(&info);
        self.tm.set_mutual_info(
            mutual.peer,
            mutual.wallet_identity_key,
            mutual.payment_proof_signature.clone(),
        );

        let signer = Signer::receive(&mut self.tm, &self.crypto).sign()?;

        let mut resp = req.clone();
        let tm = signer.transaction();
        sign::update_common(tm, resp.tx_common.get_or_insert_with(Default::default));

        let m = resp.tx_mutual_info.get_or_insert_with(Default::default);
        sign::update_mutual(tm, m);
        m.wallet_identity_key = 0;

        #[cfg(feature = "log")]
        log::debug!("signed receive transaction");

        Ok(Output::SignTransactionReceive(resp))
    }

    /// Sign the send side of a transaction, fresh requests return the sender
    /// contribution and a user agreement token, continuations the final kernel
    #[cfg_attr(feature = "noinline", inline(never))]
    pub(super) fn sign_send(&mut self, req: &proto::SignTransactionSend) -> Result<Output, Error> {
        let info = parse_common(req.tx_common.as_ref())?;
        let mutual = parse_mutual(req.tx_mutual_info.as_ref())?;
        let ua = parse_user_agreement(&req.user_agreement)?;
        if !is_valid_slot(req.nonce_slot) {
            return Err(Error::DataError(DataError::InvalidSenderParams));
        }

        require_hold(&mut self.drv, &Prompt::transfer(&info.inputs, &info.outputs))?;

        let kdf = self.kdf()?;
        self.tm.init_keykeeper(kdf);
        self.tm.set_common(&info);
        self.tm.set_mutual_info(
            mutual.peer,
            mutual.wallet_identity_key,
            mutual.payment_proof_signature.clone(),
        );
        if !self.tm.set_sender_params(req.nonce_slot, &ua) {
            return Err(Error::DataError(DataError::InvalidSenderParams));
        }

        let mut resp = req.clone();
        let common = resp.tx_common.get_or_insert_with(Default::default);
        let m = resp.tx_mutual_info.get_or_insert_with(Default::default);

        let signer = Signer::send(&mut self.tm, &self.crypto).part1()?;
        sign::update_common(signer.transaction(), common);

        let mut vault = NonceVault::new(self.drv.storage(), &self.crypto);
        let signer = signer.part2(&mut vault)?;
        sign::update_common(signer.transaction(), common);

        let tm = signer.transaction();
        require_confirm(&mut self.drv, &Prompt::hex("Confirm peer", &tm.mutual_info().peer))?;
        review_send(&mut self.drv, tm)?;

        let signer = signer.part3()?;
        sign::update_common(signer.transaction(), common);
        sign::update_mutual(signer.transaction(), m);

        review_send(&mut self.drv, signer.transaction())?;

        let signer = signer.part4()?;
        let tm = signer.transaction();
        sign::update_common(tm, common);
        sign::update_mutual(tm, m);
        resp.user_agreement = tm.get_scalar(ScalarField::UserAgreement).to_vec();

        // Strip coin and kernel parameters known to the host
        common.inputs.clear();
        common.outputs.clear();
        sign::strip_kernel(common);

        #[cfg(feature = "log")]
        log::debug!("signed send transaction (slot {})", req.nonce_slot);

        Ok(Output::SignTransactionSend(resp))
    }
}

#[cfg(test)]
mod test {
    use alloc::vec;

    use super::*;
    use crate::engine::{test::engine, State};

    #[test]
    fn user_agreement_sizes() {
        assert_eq!(parse_user_agreement(&[]), Ok([0u8; 32]));
        assert_eq!(parse_user_agreement(&[3u8; 32]), Ok([3u8; 32]));
        assert_eq!(
            parse_user_agreement(&[3u8; 12]),
            Err(Error::DataError(DataError::InvalidSenderParams))
        );
    }

    #[test]
    fn missing_common_info() {
        let mut e = engine();

        let r = e.update(&proto::SignTransactionSplit { tx_common: None }.into());
        assert_eq!(r, Err(Error::DataError(DataError::MissingField)));
        assert_eq!(e.state(), State::Error);

        // Validation precedes any prompt
        assert!(e.driver().prompts.is_empty());
        assert!(e.transaction_manager().is_clear());
    }

    #[test]
    fn receive_requires_mutual_info() {
        let mut e = engine();

        let req = proto::SignTransactionReceive {
            tx_common: Some(proto::TxCommon {
                outputs: vec![proto::CoinId {
                    idx: 1,
                    amount: 10,
                    ..Default::default()
                }],
                kernel_params: Some(Default::default()),
                ..Default::default()
            }),
            tx_mutual_info: None,
        };

        let r = e.update(&req.into());
        assert_eq!(r, Err(Error::DataError(DataError::MissingField)));
    }

    #[test]
    fn send_invalid_slot() {
        let mut e = engine();

        let req = proto::SignTransactionSend {
            tx_common: Some(proto::TxCommon {
                inputs: vec![proto::CoinId {
                    idx: 1,
                    amount: 1000,
                    ..Default::default()
                }],
                kernel_params: Some(proto::KernelParameters {
                    fee: 100,
                    ..Default::default()
                }),
                ..Default::default()
            }),
            tx_mutual_info: Some(Default::default()),
            nonce_slot: 32,
            user_agreement: vec![],
        };

        let r = e.update(&req.clone().into());
        assert_eq!(r, Err(Error::DataError(DataError::InvalidSenderParams)));
        assert!(e.transaction_manager().is_clear());

        // Rejected prior to any confirmation
        assert!(e.driver().prompts.is_empty());

        // Slot is checked before the seed is fetched
        e.driver_mut().mnemonic = None;
        let mut req = req;
        req.nonce_slot = 40;

        let r = e.update(&req.into());
        assert_eq!(r, Err(Error::DataError(DataError::InvalidSenderParams)));
        assert!(e.driver().prompts.is_empty());
    }
}
