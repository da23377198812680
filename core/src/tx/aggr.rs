// Copyright (c) 2022-2023 The Beam Developers

//! Coin value aggregation and balance checks

use zeroize::Zeroize;

use crate::{
    crypto::Crypto,
    error::Status,
    keys::derive_secret_key,
    types::{CoinId, Kdf, SecretKey},
};

/// BEAM and (single) asset totals for one side of a transaction
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug, Zeroize)]
pub struct CoinTotals {
    pub beams: u64,
    pub assets: u64,
}

impl CoinTotals {
    fn add(&mut self, cid: &CoinId) -> Result<(), Status> {
        let v = match cid.asset_id {
            0 => &mut self.beams,
            _ => &mut self.assets,
        };

        *v = v.checked_add(cid.amount).ok_or(Status::AggregationFailed)?;

        Ok(())
    }
}

/// Public summary of an aggregated transaction, used for confirmations
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug, Zeroize)]
pub struct TxAggrInfo {
    pub ins: CoinTotals,
    pub outs: CoinTotals,
    /// Non-BEAM asset in this transaction, 0 if none
    pub asset_id: u32,
}

impl TxAggrInfo {
    /// Net value received as `(amount, asset_id)`, asset values take priority
    pub fn received(&self) -> (u64, u32) {
        if self.asset_id != 0 && self.outs.assets > self.ins.assets {
            return (self.outs.assets - self.ins.assets, self.asset_id);
        }

        (self.outs.beams.saturating_sub(self.ins.beams), 0)
    }

    /// Net value spent excluding fees as `(amount, asset_id)`,
    /// asset values take priority
    pub fn spent(&self, fee: u64) -> (u64, u32) {
        if self.asset_id != 0 && self.ins.assets > self.outs.assets {
            return (self.ins.assets - self.outs.assets, self.asset_id);
        }

        let beams = self
            .ins
            .beams
            .saturating_sub(self.outs.beams)
            .saturating_sub(fee);

        (beams, 0)
    }
}

/// Aggregated coin values and blinding key
#[derive(Clone, Default, PartialEq, Debug, Zeroize)]
pub struct TxAggr {
    pub info: TxAggrInfo,
    /// Sum of output keys less sum of input keys
    pub sk: SecretKey,
}

impl TxAggr {
    /// Aggregate input and output coins, deriving each coin key
    pub fn compute<C: Crypto>(
        c: &C,
        kdf: &Kdf,
        inputs: &[CoinId],
        outputs: &[CoinId],
    ) -> Result<Self, Status> {
        if inputs.is_empty() && outputs.is_empty() {
            return Err(Status::AggregationNull);
        }

        let mut a = TxAggr::default();
        let mut sk_in = SecretKey::ZERO;
        let mut sk_out = SecretKey::ZERO;

        for cid in inputs {
            a.add_asset(cid)?;
            a.info.ins.add(cid)?;

            let k = derive_secret_key(c, kdf, cid);
            sk_in = c.scalar_add(&sk_in, &k);
        }

        for cid in outputs {
            a.add_asset(cid)?;
            a.info.outs.add(cid)?;

            let k = derive_secret_key(c, kdf, cid);
            sk_out = c.scalar_add(&sk_out, &k);
        }

        a.sk = c.scalar_sub(&sk_out, &sk_in);

        Ok(a)
    }

    fn add_asset(&mut self, cid: &CoinId) -> Result<(), Status> {
        match (cid.asset_id, self.info.asset_id) {
            (0, _) => Ok(()),
            (id, 0) => {
                self.info.asset_id = id;
                Ok(())
            }
            (id, current) if id == current => Ok(()),
            _ => Err(Status::AggregationFailed),
        }
    }

    /// Check a self-transfer balances, with only the fee leaving the wallet
    pub fn check_split(&self, fee: u64) -> Result<(), Status> {
        let i = &self.info;
        let outs = i.outs.beams.checked_add(fee).ok_or(Status::AggregationInvalid)?;

        match i.ins.beams == outs && i.ins.assets == i.outs.assets {
            true => Ok(()),
            false => Err(Status::AggregationInvalid),
        }
    }

    /// Check the receiving side gains value
    pub fn check_receive(&self) -> Result<(), Status> {
        let i = &self.info;

        if i.outs.beams < i.ins.beams || i.outs.assets < i.ins.assets {
            return Err(Status::AggregationInvalid);
        }

        match i.outs.beams > i.ins.beams || i.outs.assets > i.ins.assets {
            true => Ok(()),
            false => Err(Status::AggregationInvalid),
        }
    }

    /// Check the sending side covers the fee and spends value
    pub fn check_send(&self, fee: u64) -> Result<(), Status> {
        let i = &self.info;
        let outs = i.outs.beams.checked_add(fee).ok_or(Status::AggregationInvalid)?;

        if i.ins.beams < outs || i.ins.assets < i.outs.assets {
            return Err(Status::AggregationInvalid);
        }

        match i.spent(fee).0 {
            0 => Err(Status::AggregationInvalid),
            _ => Ok(()),
        }
    }
}
