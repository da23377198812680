// Copyright (c) 2022-2023 The Beam Developers

//! Split (self-transfer) signing, `Init -> Committed -> Signed`

use crate::{crypto::Crypto, error::Error, tx::TransactionManager};

use super::Signer;

/// Parameters loaded, awaiting kernel commitment
pub struct Init;

/// Kernel commitment and nonce computed, awaiting signature
pub struct Committed;

/// Kernel signed
pub struct Signed;

impl<'a, C: Crypto> Signer<'a, C, Init> {
    pub fn split(tm: &'a mut TransactionManager, crypto: &'a C) -> Self {
        Self::with_state(tm, crypto)
    }

    /// Aggregate coins and compute the kernel commitment
    pub fn commit(self) -> Result<Signer<'a, C, Committed>, Error> {
        self.tm.sign_split_part1(self.crypto)?;
        Ok(self.next())
    }
}

impl<'a, C: Crypto> Signer<'a, C, Committed> {
    /// Sign and verify the kernel
    pub fn sign(self) -> Result<Signer<'a, C, Signed>, Error> {
        self.tm.sign_split_part2(self.crypto)?;
        Ok(self.next())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        crypto::MockCrypto,
        error::Status,
        tx::PointField,
        types::{CoinId, EccPoint, SecretKey, Seed, Signature},
    };

    fn manager(c: &MockCrypto, amounts: (u64, u64), fee: u64) -> TransactionManager {
        let mut tm = TransactionManager::new();
        tm.init_keykeeper(c.seed_to_kdf(&Seed::new([1; 32])).unwrap());

        tm.add_input(CoinId {
            idx: 1,
            amount: amounts.0,
            ..Default::default()
        });
        tm.add_output(CoinId {
            idx: 2,
            amount: amounts.1,
            ..Default::default()
        });
        tm.set_common_info(fee, 0, 10, EccPoint::ZERO, Signature::default(), SecretKey::ZERO);

        tm
    }

    #[test]
    fn split_phases() {
        let c = MockCrypto::new();
        let mut tm = manager(&c, (1000, 900), 100);

        let s = Signer::split(&mut tm, &c).commit().unwrap();
        let commitment = s.transaction().get_point(PointField::KernelCommitment);
        assert!(!commitment.is_zero());

        let s = s.sign().unwrap();
        assert_eq!(
            s.transaction().get_point(PointField::KernelCommitment),
            commitment
        );
    }

    #[test]
    fn split_imbalance() {
        let c = MockCrypto::new();
        let mut tm = manager(&c, (1000, 950), 100);

        let r = Signer::split(&mut tm, &c).commit().map(|_| ());
        assert_eq!(r, Err(Error::ProcessError(Status::AggregationInvalid)));
    }
}
