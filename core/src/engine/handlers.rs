// Copyright (c) 2022-2023 The Beam Developers

//! Key export, nonce and range proof request handlers

use beam_hw_proto::prelude as proto;

use crate::{
    consts::{FIELD_LEN, NUM_NONCE_SLOTS},
    crypto::Crypto,
    error::{DataError, Error, Uninit},
    keys::{derive_secret_key, export_owner_key, export_pkdf, kdf_from_seed},
    nonce::NonceVault,
    types::{CoinId, EccPoint, SecretKey},
};

use super::{
    prompt::{require_confirm, Prompt, EXPORT_WARNING, WAIT_WARNING},
    Driver, Engine, Output,
};

/// Parse a required range proof point
fn rangeproof_point(p: Option<&proto::EccPoint>) -> Result<EccPoint, DataError> {
    let p = p.ok_or(DataError::InvalidPointSize)?;
    EccPoint::try_from(p)
}

fn extra_scalar(v: &[u8]) -> Result<SecretKey, DataError> {
    match v.len() {
        FIELD_LEN => {
            let mut k = SecretKey::ZERO;
            k.0.copy_from_slice(v);
            Ok(k)
        }
        _ => Err(DataError::InvalidExtraScalarSize),
    }
}

/// Parse optional extra scalars, both or neither must be present
fn extra_scalars(
    a: Option<&alloc::vec::Vec<u8>>,
    b: Option<&alloc::vec::Vec<u8>>,
) -> Result<Option<[SecretKey; 2]>, DataError> {
    match (a, b) {
        (None, None) => Ok(None),
        (Some(a), Some(b)) => Ok(Some([extra_scalar(a)?, extra_scalar(b)?])),
        _ => Err(DataError::InvalidExtraScalarSize),
    }
}

impl<DRV: Driver, C: Crypto> Engine<DRV, C> {
    /// Fetch the number of available nonce slots
    pub(super) fn get_num_slots(&mut self, req: &proto::GetNumSlots) -> Result<Output, Error> {
        let created = NonceVault::new(self.drv.storage(), &self.crypto).is_master_nonce_created();
        if !created {
            return Err(Error::NotInitialized(Uninit::NonceSlots));
        }

        if req.show_display {
            require_confirm(&mut self.drv, &Prompt::num_slots(NUM_NONCE_SLOTS))?;
        }

        Ok(Output::NumSlots(proto::NumSlots {
            num_slots: NUM_NONCE_SLOTS,
        }))
    }

    /// Fetch the public image of a nonce slot
    pub(super) fn get_nonce_public(
        &mut self,
        req: &proto::GetNoncePublic,
    ) -> Result<Output, Error> {
        let p = NonceVault::new(self.drv.storage(), &self.crypto).get_nonce_public(req.slot)?;

        Ok(Output::EccPoint((&p).into()))
    }

    /// Export root or child PKdf material
    #[cfg_attr(feature = "noinline", inline(never))]
    pub(super) fn get_pkdf(&mut self, req: &proto::GetPKdf) -> Result<Output, Error> {
        let seed = self.seed()?;

        if req.is_root_key {
            require_confirm(&mut self.drv, &Prompt::notice("Owner key", EXPORT_WARNING))?;
            require_confirm(&mut self.drv, &Prompt::notice("Owner key", WAIT_WARNING))?;
        } else if req.show_display {
            require_confirm(&mut self.drv, &Prompt::notice("Generate PKdf", WAIT_WARNING))?;
        }

        let pkdf = export_pkdf(&self.crypto, &seed, req.child_idx, req.is_root_key)?;

        if req.show_display {
            require_confirm(&mut self.drv, &Prompt::hex("Generated PKdf", &pkdf.key))?;
        }

        #[cfg(feature = "log")]
        log::debug!(
            "exported pkdf (root: {}, child: {})",
            req.is_root_key,
            req.child_idx
        );

        Ok(Output::PKdf(proto::PKdf {
            key: pkdf.key.to_vec(),
            cofactor_g: Some((&pkdf.cofactor_g).into()),
            cofactor_j: Some((&pkdf.cofactor_j).into()),
        }))
    }

    /// Export the wallet owner key
    #[cfg_attr(feature = "noinline", inline(never))]
    pub(super) fn get_owner_key(&mut self, req: &proto::GetOwnerKey) -> Result<Output, Error> {
        let seed = self.seed()?;

        require_confirm(&mut self.drv, &Prompt::notice("Owner key", EXPORT_WARNING))?;
        require_confirm(&mut self.drv, &Prompt::notice("Owner key", WAIT_WARNING))?;

        let key = export_owner_key(&self.crypto, &seed)?;

        if req.show_display {
            require_confirm(&mut self.drv, &Prompt::hex("Owner key", &key))?;
        }

        Ok(Output::OwnerKey(proto::OwnerKey { key: key.to_vec() }))
    }

    /// Compute the device share of a range proof
    #[cfg_attr(feature = "noinline", inline(never))]
    pub(super) fn generate_rangeproof(
        &mut self,
        req: &proto::GenerateRangeproof,
    ) -> Result<Output, Error> {
        let cid = req.cid.as_ref().ok_or(DataError::MissingField)?;
        let cid = CoinId::from(cid);

        let pt0 = rangeproof_point(req.pt0.as_ref())?;
        let pt1 = rangeproof_point(req.pt1.as_ref())?;
        let extra = extra_scalars(req.extra_sk0.as_ref(), req.extra_sk1.as_ref())?;

        let seed = self.seed()?;
        let kdf = kdf_from_seed(&self.crypto, &seed)?;
        let sk = derive_secret_key(&self.crypto, &kdf, &cid);

        let resp = match self
            .crypto
            .generate_rangeproof(&sk, &cid, &pt0, &pt1, extra.as_ref())
        {
            Ok(r) => proto::RangeproofData {
                data_taux: r.taux.0.to_vec(),
                is_successful: true,
                pt0: Some((&r.pt0).into()),
                pt1: Some((&r.pt1).into()),
            },
            Err(_s) => {
                #[cfg(feature = "log")]
                log::warn!("range proof failed: {}", _s);

                proto::RangeproofData {
                    data_taux: [0u8; FIELD_LEN].to_vec(),
                    is_successful: false,
                    pt0: None,
                    pt1: None,
                }
            }
        };

        Ok(Output::RangeproofData(resp))
    }
}
