// Copyright (c) 2022-2023 The Beam Developers

//! Deterministic coin and identity key derivation
//!
//! Coin keys are derived from the root [Kdf] via a hash identifier over the
//! coin index, key type and sub index. Key type is always [`BBS_KEY`] for coins,
//! wallet identity keys use [`WALLET_ID_KEY`].

use crate::{
    consts::{BBS_KEY, WALLET_ID_KEY},
    crypto::{Crypto, Pkdf},
    error::Status,
    oracle::Oracle,
    types::{CoinId, Kdf, SecretKey, Seed},
};

/// Compute the hash identifier for a key derivation path
pub fn hash_id(idx: u64, kind: u32, sub_idx: u32) -> [u8; 32] {
    let mut o = Oracle::new();
    o.write(b"kid").u64(idx).u32(kind).u32(sub_idx);
    o.finalize()
}

/// Derive the root [Kdf] for a seed
pub fn kdf_from_seed<C: Crypto>(c: &C, seed: &Seed) -> Result<Kdf, Status> {
    c.seed_to_kdf(seed)
}

/// Derive the secret key for a coin
pub fn derive_secret_key<C: Crypto>(c: &C, kdf: &Kdf, cid: &CoinId) -> SecretKey {
    let id = hash_id(cid.idx, BBS_KEY, cid.sub_idx);
    c.derive_child_key(kdf, &id)
}

/// Derive the wallet identity key for a wallet id
pub fn wallet_identity_key<C: Crypto>(c: &C, kdf: &Kdf, wid: u64) -> SecretKey {
    let id = hash_id(wid, WALLET_ID_KEY, 0);
    c.derive_child_key(kdf, &id)
}

/// Compute the public wallet identity (x coordinate of the identity key image)
pub fn wallet_identity<C: Crypto>(c: &C, kdf: &Kdf, wid: u64) -> [u8; 32] {
    let sk = wallet_identity_key(c, kdf, wid);
    c.public_key(&sk).x
}

/// Export the owner key for a seed
pub fn export_owner_key<C: Crypto>(c: &C, seed: &Seed) -> Result<[u8; 32], Status> {
    let kdf = c.seed_to_kdf(seed)?;
    Ok(c.export_owner_key(&kdf))
}

/// Export PKdf material for the root or a child KDF
pub fn export_pkdf<C: Crypto>(
    c: &C,
    seed: &Seed,
    child_idx: u32,
    is_root: bool,
) -> Result<Pkdf, Status> {
    let root = c.seed_to_kdf(seed)?;

    match is_root {
        true => Ok(c.export_pkdf(&root)),
        false => {
            let child = c.child_kdf(&root, child_idx)?;
            Ok(c.export_pkdf(&child))
        }
    }
}
