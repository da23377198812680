// Copyright (c) 2022-2023 The Beam Developers

//! Ristretto255 [Crypto] implementation
//!
//! Points are carried as compressed ristretto encodings in `x`, ristretto encodings
//! select a unique representative so `y` is always false.

use curve25519_dalek::{
    constants::RISTRETTO_BASEPOINT_POINT,
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
};
use hkdf::Hkdf;
use merlin::Transcript;
use sha2::{Digest, Sha256, Sha512};
use zeroize::{Zeroize, Zeroizing};

use super::{Crypto, Pkdf, Rangeproof};
use crate::{
    error::Status,
    types::{CoinId, EccPoint, Kdf, SecretKey, Seed, Signature},
};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RistrettoCrypto;

impl RistrettoCrypto {
    pub const fn new() -> Self {
        Self
    }
}

/// Value generator for an asset, `H` for BEAM
fn value_generator(asset_id: u32) -> RistrettoPoint {
    match asset_id {
        0 => RistrettoPoint::hash_from_bytes::<Sha512>(b"beam.H"),
        _ => RistrettoPoint::from_hash(
            Sha512::new()
                .chain_update(b"beam.asset")
                .chain_update(asset_id.to_le_bytes()),
        ),
    }
}

/// Secondary generator for PKdf exports
fn j_generator() -> RistrettoPoint {
    RistrettoPoint::hash_from_bytes::<Sha512>(b"beam.J")
}

fn scalar(k: &SecretKey) -> Scalar {
    Scalar::from_bytes_mod_order(k.0)
}

fn secret(s: &Scalar) -> SecretKey {
    SecretKey(s.to_bytes())
}

fn compress(p: &RistrettoPoint) -> EccPoint {
    EccPoint {
        x: p.compress().to_bytes(),
        y: false,
    }
}

fn decompress(p: &EccPoint) -> Result<RistrettoPoint, Status> {
    if p.y {
        return Err(Status::Unspecified);
    }

    CompressedRistretto(p.x)
        .decompress()
        .ok_or(Status::Unspecified)
}

/// Signature challenge over the public nonce and message
fn challenge(nonce_pub: &EccPoint, msg: &[u8; 32]) -> Scalar {
    let mut t = Transcript::new(b"beam.kernel");
    t.append_message(b"nonce", &nonce_pub.x);
    t.append_message(b"msg", msg);

    let mut e = [0u8; 64];
    t.challenge_bytes(b"e", &mut e);

    Scalar::from_bytes_mod_order_wide(&e)
}

impl Crypto for RistrettoCrypto {
    fn seed_to_kdf(&self, seed: &Seed) -> Result<Kdf, Status> {
        let hk = Hkdf::<Sha256>::new(Some(&b"beam.kdf"[..]), seed.as_bytes());

        let mut gen = Zeroizing::new([0u8; 32]);
        hk.expand(b"gen", &mut gen[..])
            .map_err(|_| Status::Unspecified)?;

        let mut cof = Zeroizing::new([0u8; 64]);
        hk.expand(b"coF", &mut cof[..])
            .map_err(|_| Status::Unspecified)?;

        let mut cofactor = Scalar::from_bytes_mod_order_wide(&cof);
        if cofactor == Scalar::ZERO {
            return Err(Status::Unspecified);
        }

        let kdf = Kdf {
            secret: *gen,
            cofactor: secret(&cofactor),
        };
        cofactor.zeroize();

        Ok(kdf)
    }

    fn child_kdf(&self, parent: &Kdf, idx: u32) -> Result<Kdf, Status> {
        let hk = Hkdf::<Sha256>::new(Some(&parent.cofactor.as_bytes()[..]), &parent.secret);
        let idx = idx.to_le_bytes();

        let mut gen = Zeroizing::new([0u8; 32]);
        hk.expand_multi_info(&[&b"child.gen"[..], &idx[..]], &mut gen[..])
            .map_err(|_| Status::Unspecified)?;

        let mut cof = Zeroizing::new([0u8; 64]);
        hk.expand_multi_info(&[&b"child.coF"[..], &idx[..]], &mut cof[..])
            .map_err(|_| Status::Unspecified)?;

        let mut cofactor = Scalar::from_bytes_mod_order_wide(&cof);
        if cofactor == Scalar::ZERO {
            return Err(Status::Unspecified);
        }

        let kdf = Kdf {
            secret: *gen,
            cofactor: secret(&cofactor),
        };
        cofactor.zeroize();

        Ok(kdf)
    }

    fn derive_child_key(&self, kdf: &Kdf, hash_id: &[u8; 32]) -> SecretKey {
        let mut s = Scalar::from_hash(
            Sha512::new()
                .chain_update(b"beam.child")
                .chain_update(kdf.secret)
                .chain_update(hash_id),
        );
        let mut cof = scalar(&kdf.cofactor);

        let k = secret(&(s * cof));

        // Zeroize intermediates
        s.zeroize();
        cof.zeroize();

        k
    }

    fn public_key(&self, sk: &SecretKey) -> EccPoint {
        let mut s = scalar(sk);
        let p = compress(&(RISTRETTO_BASEPOINT_POINT * s));
        s.zeroize();
        p
    }

    fn commit(&self, sk: &SecretKey, amount: u64, asset_id: u32) -> EccPoint {
        let mut s = scalar(sk);
        let c = RISTRETTO_BASEPOINT_POINT * s + value_generator(asset_id) * Scalar::from(amount);
        s.zeroize();
        compress(&c)
    }

    fn point_add(&self, a: &EccPoint, b: &EccPoint) -> Result<EccPoint, Status> {
        let a = decompress(a)?;
        let b = decompress(b)?;
        Ok(compress(&(a + b)))
    }

    fn scalar_add(&self, a: &SecretKey, b: &SecretKey) -> SecretKey {
        secret(&(scalar(a) + scalar(b)))
    }

    fn scalar_neg(&self, a: &SecretKey) -> SecretKey {
        secret(&(-scalar(a)))
    }

    fn sign(
        &self,
        msg: &[u8; 32],
        nonce_pub: &EccPoint,
        sk: &SecretKey,
        nonce: &SecretKey,
    ) -> SecretKey {
        let e = challenge(nonce_pub, msg);

        let mut s = scalar(sk);
        let mut n = scalar(nonce);
        let k = secret(&(n + e * s));

        // Zeroize keys
        s.zeroize();
        n.zeroize();

        k
    }

    fn verify(&self, msg: &[u8; 32], sig: &Signature, pk: &EccPoint) -> bool {
        let (n, p) = match (decompress(&sig.nonce_pub), decompress(pk)) {
            (Ok(n), Ok(p)) => (n, p),
            _ => return false,
        };

        let e = challenge(&sig.nonce_pub, msg);
        let k = scalar(&sig.sign_k);

        RISTRETTO_BASEPOINT_POINT * k == n + p * e
    }

    fn create_master_nonce(&self, seed: &Seed) -> SecretKey {
        let s = Scalar::from_hash(
            Sha512::new()
                .chain_update(b"beam.nonce.master")
                .chain_update(seed.as_bytes()),
        );
        secret(&s)
    }

    fn create_derived_nonce(&self, master: &SecretKey, idx: u16, prev: &SecretKey) -> SecretKey {
        let s = Scalar::from_hash(
            Sha512::new()
                .chain_update(b"beam.nonce.derive")
                .chain_update(master.as_bytes())
                .chain_update(idx.to_le_bytes())
                .chain_update(prev.as_bytes()),
        );
        secret(&s)
    }

    fn export_owner_key(&self, kdf: &Kdf) -> [u8; 32] {
        let cofactor_g = self.public_key(&kdf.cofactor);

        Sha256::new()
            .chain_update(b"beam.owner")
            .chain_update(kdf.secret)
            .chain_update(cofactor_g.x)
            .finalize()
            .into()
    }

    fn export_pkdf(&self, kdf: &Kdf) -> Pkdf {
        let mut cof = scalar(&kdf.cofactor);

        let pkdf = Pkdf {
            key: Sha256::new()
                .chain_update(b"beam.pkdf")
                .chain_update(kdf.secret)
                .finalize()
                .into(),
            cofactor_g: compress(&(RISTRETTO_BASEPOINT_POINT * cof)),
            cofactor_j: compress(&(j_generator() * cof)),
        };
        cof.zeroize();

        pkdf
    }

    fn generate_rangeproof(
        &self,
        sk: &SecretKey,
        cid: &CoinId,
        pt0: &EccPoint,
        pt1: &EccPoint,
        extra: Option<&[SecretKey; 2]>,
    ) -> Result<Rangeproof, Status> {
        let p0 = decompress(pt0)?;
        let p1 = decompress(pt1)?;

        // Blinding factors for the polynomial commitments
        let tau = |label: &[u8]| {
            Scalar::from_hash(
                Sha512::new()
                    .chain_update(label)
                    .chain_update(sk.as_bytes())
                    .chain_update(cid.idx.to_le_bytes())
                    .chain_update(cid.kind.to_le_bytes())
                    .chain_update(cid.sub_idx.to_le_bytes())
                    .chain_update(cid.amount.to_le_bytes())
                    .chain_update(cid.asset_id.to_le_bytes()),
            )
        };
        let mut tau1 = tau(b"beam.rp.tau1");
        let mut tau2 = tau(b"beam.rp.tau2");

        if let Some([e0, e1]) = extra {
            tau1 += scalar(e0);
            tau2 += scalar(e1);
        }

        let t1 = compress(&(p0 + RISTRETTO_BASEPOINT_POINT * tau1));
        let t2 = compress(&(p1 + RISTRETTO_BASEPOINT_POINT * tau2));
        let commitment = self.commit(sk, cid.amount, cid.asset_id);

        let mut t = Transcript::new(b"beam.rangeproof");
        t.append_message(b"C", &commitment.x);
        t.append_message(b"T1", &t1.x);
        t.append_message(b"T2", &t2.x);

        let mut buff = [0u8; 64];
        t.challenge_bytes(b"x", &mut buff);
        let x = Scalar::from_bytes_mod_order_wide(&buff);
        t.challenge_bytes(b"z", &mut buff);
        let z = Scalar::from_bytes_mod_order_wide(&buff);

        let mut s = scalar(sk);
        let taux = tau1 * x + tau2 * x * x + z * z * s;

        // Zeroize blindings
        tau1.zeroize();
        tau2.zeroize();
        s.zeroize();

        Ok(Rangeproof {
            taux: secret(&taux),
            pt0: t1,
            pt1: t2,
        })
    }
}
