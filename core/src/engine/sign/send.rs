// Copyright (c) 2022-2023 The Beam Developers

//! Send signing, `Init -> Part1 -> Part2 -> Part3 -> Signed`
//!
//! A request with an all-zero user agreement is fresh, the same four parts
//! run for both the fresh request and its continuation.

use crate::{
    consts::SEND_PHASE_INIT,
    crypto::Crypto,
    error::{DataError, Error},
    nonce::{NonceVault, Storage},
    tx::TransactionManager,
};

use super::Signer;

/// Sender parameters loaded
pub struct Init;

/// Coins aggregated and sender kernel key derived
pub struct Part1;

/// Slot nonce applied
pub struct Part2;

/// User agreement issued or checked
pub struct Part3;

/// Token published or kernel signature completed
pub struct Signed;

impl<'a, C: Crypto> Signer<'a, C, Init> {
    pub fn send(tm: &'a mut TransactionManager, crypto: &'a C) -> Self {
        Self::with_state(tm, crypto)
    }

    pub fn part1(self) -> Result<Signer<'a, C, Part1>, Error> {
        self.tm.sign_send_part1(self.crypto, SEND_PHASE_INIT)?;
        Ok(self.next())
    }
}

impl<'a, C: Crypto> Signer<'a, C, Part1> {
    /// Fetch the slot nonce, fresh requests read without rotation so retries
    /// are answered with the same public nonce
    pub fn part2<S: Storage>(
        self,
        vault: &mut NonceVault<'_, S, C>,
    ) -> Result<Signer<'a, C, Part2>, Error> {
        let slot = self.tm.nonce_slot();

        let nonce = match self.tm.is_fresh_request() {
            true => vault.get_nonce(slot),
            false => vault.consume(slot),
        };

        let nonce = nonce.map_err(|e| match e {
            Error::DataError(DataError::InvalidSlot) => Error::DataError(DataError::InvalidNonceSlot),
            e => e,
        })?;

        self.tm.sign_send_part2(self.crypto, &nonce)?;
        Ok(self.next())
    }
}

impl<'a, C: Crypto> Signer<'a, C, Part2> {
    pub fn part3(self) -> Result<Signer<'a, C, Part3>, Error> {
        self.tm.sign_send_part3(self.crypto)?;
        Ok(self.next())
    }
}

impl<'a, C: Crypto> Signer<'a, C, Part3> {
    pub fn part4(self) -> Result<Signer<'a, C, Signed>, Error> {
        self.tm.sign_send_part4(self.crypto)?;
        Ok(self.next())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        crypto::MockCrypto,
        error::Uninit,
        nonce::MemStorage,
        tx::PointField,
        types::{CoinId, EccPoint, SecretKey, Seed, Signature},
    };

    fn manager(c: &MockCrypto, slot: u32, ua: &[u8; 32]) -> TransactionManager {
        let mut tm = TransactionManager::new();
        tm.init_keykeeper(c.seed_to_kdf(&Seed::new([4; 32])).unwrap());

        tm.add_input(CoinId {
            idx: 1,
            amount: 1000,
            ..Default::default()
        });
        tm.set_common_info(100, 0, 10, EccPoint::ZERO, Signature::default(), SecretKey::ZERO);
        tm.set_mutual_info([0u8; 32], 1, Signature::default());
        assert!(tm.set_sender_params(slot, ua));

        tm
    }

    #[test]
    fn fresh_request_does_not_rotate() {
        let c = MockCrypto::new();
        let mut s = MemStorage::new();
        NonceVault::new(&mut s, &c)
            .create_master_nonce(&Seed::new([9; 32]))
            .unwrap();

        let mut nonces = [EccPoint::ZERO; 2];
        for n in &mut nonces {
            let mut tm = manager(&c, 3, &[0u8; 32]);
            let mut vault = NonceVault::new(&mut s, &c);

            let signer = Signer::send(&mut tm, &c)
                .part1()
                .unwrap()
                .part2(&mut vault)
                .unwrap();
            *n = signer
                .transaction()
                .get_point(PointField::KernelSignatureNoncePub);
        }

        assert_eq!(nonces[0], nonces[1]);
        assert_eq!(
            NonceVault::new(&mut s, &c).get_nonce_public(3).unwrap(),
            nonces[0]
        );
    }

    #[test]
    fn continuation_rotates() {
        let c = MockCrypto::new();
        let mut s = MemStorage::new();
        NonceVault::new(&mut s, &c)
            .create_master_nonce(&Seed::new([9; 32]))
            .unwrap();

        let before = NonceVault::new(&mut s, &c).get_nonce_public(3).unwrap();

        let mut tm = manager(&c, 3, &[0x55; 32]);
        let mut vault = NonceVault::new(&mut s, &c);
        let _ = Signer::send(&mut tm, &c)
            .part1()
            .unwrap()
            .part2(&mut vault)
            .unwrap();

        assert_ne!(vault.get_nonce_public(3).unwrap(), before);
    }

    #[test]
    fn uninitialised_vault() {
        let c = MockCrypto::new();
        let mut s = MemStorage::new();

        let mut tm = manager(&c, 3, &[0u8; 32]);
        let mut vault = NonceVault::new(&mut s, &c);

        let r = Signer::send(&mut tm, &c)
            .part1()
            .unwrap()
            .part2(&mut vault)
            .map(|_| ());
        assert_eq!(r, Err(Error::NotInitialized(Uninit::NonceGenerator)));
    }
}
