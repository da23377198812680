// Copyright (c) 2022-2023 The Beam Developers

//! Receive signing, `Init -> Signed` in a single phase

use crate::{crypto::Crypto, error::Error, tx::TransactionManager};

use super::Signer;

/// Sender contribution loaded
pub struct Init;

/// Receiver contribution added and payment proof signed
pub struct Signed;

impl<'a, C: Crypto> Signer<'a, C, Init> {
    pub fn receive(tm: &'a mut TransactionManager, crypto: &'a C) -> Self {
        Self::with_state(tm, crypto)
    }

    pub fn sign(self) -> Result<Signer<'a, C, Signed>, Error> {
        self.tm.sign_receive(self.crypto)?;
        Ok(self.next())
    }
}
