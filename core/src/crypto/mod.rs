// Copyright (c) 2022-2023 The Beam Developers

//! Curve / range proof capability consumed by the signing engine
//!
//! Signing code never performs curve arithmetic directly, all operations go
//! via a [Crypto] implementation.
//! [RistrettoCrypto] is provided for device use, `MockCrypto` (feature `mock`)
//! provides a fast deterministic implementation for tests.

use crate::{
    error::Status,
    types::{CoinId, EccPoint, Kdf, SecretKey, Seed, Signature},
};

mod ristretto;
pub use ristretto::RistrettoCrypto;

#[cfg(any(test, feature = "mock"))]
mod mock;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockCrypto;

/// Exported public key derivation material
#[derive(Clone, PartialEq, Debug)]
pub struct Pkdf {
    pub key: [u8; 32],
    pub cofactor_g: EccPoint,
    pub cofactor_j: EccPoint,
}

/// Device share of a multi-party range proof
#[derive(Clone, PartialEq, Debug)]
pub struct Rangeproof {
    pub taux: SecretKey,
    pub pt0: EccPoint,
    pub pt1: EccPoint,
}

/// [`Crypto`] trait provides curve operations for [`Engine`][crate::engine::Engine] instances
pub trait Crypto {
    /// Derive the root KDF for a seed
    fn seed_to_kdf(&self, seed: &Seed) -> Result<Kdf, Status>;

    /// Derive a child KDF
    fn child_kdf(&self, parent: &Kdf, idx: u32) -> Result<Kdf, Status>;

    /// Derive a child secret key for a hash identifier
    fn derive_child_key(&self, kdf: &Kdf, hash_id: &[u8; 32]) -> SecretKey;

    /// Compute `sk * G`
    fn public_key(&self, sk: &SecretKey) -> EccPoint;

    /// Compute a coin commitment `sk * G + amount * H(asset_id)`
    fn commit(&self, sk: &SecretKey, amount: u64, asset_id: u32) -> EccPoint;

    /// Add two points, zero points are the identity
    fn point_add(&self, a: &EccPoint, b: &EccPoint) -> Result<EccPoint, Status>;

    fn scalar_add(&self, a: &SecretKey, b: &SecretKey) -> SecretKey;

    fn scalar_neg(&self, a: &SecretKey) -> SecretKey;

    fn scalar_sub(&self, a: &SecretKey, b: &SecretKey) -> SecretKey {
        self.scalar_add(a, &self.scalar_neg(b))
    }

    /// Compute a (partial) signature scalar `k = nonce + e * sk`,
    /// with `e` the challenge over the (aggregate) public nonce and message
    fn sign(
        &self,
        msg: &[u8; 32],
        nonce_pub: &EccPoint,
        sk: &SecretKey,
        nonce: &SecretKey,
    ) -> SecretKey;

    /// Check a signature against a public key
    fn verify(&self, msg: &[u8; 32], sig: &Signature, pk: &EccPoint) -> bool;

    /// Derive the master nonce for a seed
    fn create_master_nonce(&self, seed: &Seed) -> SecretKey;

    /// Derive the next nonce for a slot, one-way in `prev`
    fn create_derived_nonce(&self, master: &SecretKey, idx: u16, prev: &SecretKey) -> SecretKey;

    /// Export the owner (viewing) key for a KDF
    fn export_owner_key(&self, kdf: &Kdf) -> [u8; 32];

    /// Export public derivation material for a KDF
    fn export_pkdf(&self, kdf: &Kdf) -> Pkdf;

    /// Compute the device share of a multi-party range proof for a coin
    fn generate_rangeproof(
        &self,
        sk: &SecretKey,
        cid: &CoinId,
        pt0: &EccPoint,
        pt1: &EccPoint,
        extra: Option<&[SecretKey; 2]>,
    ) -> Result<Rangeproof, Status>;
}

impl<T: Crypto> Crypto for &T {
    fn seed_to_kdf(&self, seed: &Seed) -> Result<Kdf, Status> {
        T::seed_to_kdf(self, seed)
    }

    fn child_kdf(&self, parent: &Kdf, idx: u32) -> Result<Kdf, Status> {
        T::child_kdf(self, parent, idx)
    }

    fn derive_child_key(&self, kdf: &Kdf, hash_id: &[u8; 32]) -> SecretKey {
        T::derive_child_key(self, kdf, hash_id)
    }

    fn public_key(&self, sk: &SecretKey) -> EccPoint {
        T::public_key(self, sk)
    }

    fn commit(&self, sk: &SecretKey, amount: u64, asset_id: u32) -> EccPoint {
        T::commit(self, sk, amount, asset_id)
    }

    fn point_add(&self, a: &EccPoint, b: &EccPoint) -> Result<EccPoint, Status> {
        T::point_add(self, a, b)
    }

    fn scalar_add(&self, a: &SecretKey, b: &SecretKey) -> SecretKey {
        T::scalar_add(self, a, b)
    }

    fn scalar_neg(&self, a: &SecretKey) -> SecretKey {
        T::scalar_neg(self, a)
    }

    fn sign(
        &self,
        msg: &[u8; 32],
        nonce_pub: &EccPoint,
        sk: &SecretKey,
        nonce: &SecretKey,
    ) -> SecretKey {
        T::sign(self, msg, nonce_pub, sk, nonce)
    }

    fn verify(&self, msg: &[u8; 32], sig: &Signature, pk: &EccPoint) -> bool {
        T::verify(self, msg, sig, pk)
    }

    fn create_master_nonce(&self, seed: &Seed) -> SecretKey {
        T::create_master_nonce(self, seed)
    }

    fn create_derived_nonce(&self, master: &SecretKey, idx: u16, prev: &SecretKey) -> SecretKey {
        T::create_derived_nonce(self, master, idx, prev)
    }

    fn export_owner_key(&self, kdf: &Kdf) -> [u8; 32] {
        T::export_owner_key(self, kdf)
    }

    fn export_pkdf(&self, kdf: &Kdf) -> Pkdf {
        T::export_pkdf(self, kdf)
    }

    fn generate_rangeproof(
        &self,
        sk: &SecretKey,
        cid: &CoinId,
        pt0: &EccPoint,
        pt1: &EccPoint,
        extra: Option<&[SecretKey; 2]>,
    ) -> Result<Rangeproof, Status> {
        T::generate_rangeproof(self, sk, cid, pt0, pt1, extra)
    }
}
