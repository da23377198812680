// Copyright (c) 2022-2023 The Beam Developers

//! Deterministic mock [Crypto] implementation for tests
//!
//! Scalars and points are both integers modulo the mersenne prime `2^61 - 1`,
//! stored little-endian in the first eight bytes. The base generator is `3`,
//! so `public_key(k) = 3k` and signatures check with the same equations as
//! a real group. Not secure, only for exercising protocol logic.

use core::cell::Cell;

use byteorder::{ByteOrder, LittleEndian};
use sha2::{Digest, Sha256};

use super::{Crypto, Pkdf, Rangeproof};
use crate::{
    error::Status,
    types::{CoinId, EccPoint, Kdf, SecretKey, Seed, Signature},
};

const P: u64 = (1 << 61) - 1;

const G: u64 = 3;
const H: u64 = 5;
const J: u64 = 7;

#[derive(Clone, Debug, Default)]
pub struct MockCrypto {
    fail_point_add: Cell<Option<Status>>,
}

impl MockCrypto {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail subsequent point additions with the provided status
    pub fn fail_point_add(&self, s: Option<Status>) {
        self.fail_point_add.set(s);
    }
}

fn reduce(v: u128) -> u64 {
    (v % P as u128) as u64
}

fn add(a: u64, b: u64) -> u64 {
    reduce(a as u128 + b as u128)
}

fn mul(a: u64, b: u64) -> u64 {
    reduce(a as u128 * b as u128)
}

fn neg(a: u64) -> u64 {
    (P - a % P) % P
}

fn read(b: &[u8; 32]) -> u64 {
    LittleEndian::read_u64(&b[..8]) % P
}

fn write(v: u64) -> [u8; 32] {
    let mut b = [0u8; 32];
    LittleEndian::write_u64(&mut b[..8], v);
    b
}

fn scalar(k: &SecretKey) -> u64 {
    read(&k.0)
}

fn secret(v: u64) -> SecretKey {
    SecretKey(write(v))
}

fn point(v: u64) -> EccPoint {
    EccPoint {
        x: write(v),
        y: false,
    }
}

fn hash(parts: &[&[u8]]) -> u64 {
    let mut h = Sha256::new();
    for p in parts {
        h.update(p);
    }
    let d: [u8; 32] = h.finalize().into();
    read(&d)
}

fn challenge(nonce_pub: &EccPoint, msg: &[u8; 32]) -> u64 {
    hash(&[b"challenge", &nonce_pub.x, msg])
}

fn value_generator(asset_id: u32) -> u64 {
    H + 2 * asset_id as u64
}

impl Crypto for MockCrypto {
    fn seed_to_kdf(&self, seed: &Seed) -> Result<Kdf, Status> {
        let secret = write(hash(&[b"gen", seed.as_bytes()]));
        let cofactor = hash(&[b"cof", seed.as_bytes()]).max(1);

        Ok(Kdf {
            secret,
            cofactor: self::secret(cofactor),
        })
    }

    fn child_kdf(&self, parent: &Kdf, idx: u32) -> Result<Kdf, Status> {
        let idx = idx.to_le_bytes();

        Ok(Kdf {
            secret: write(hash(&[b"child.gen", &parent.secret, &idx])),
            cofactor: secret(hash(&[b"child.cof", &parent.secret, &idx]).max(1)),
        })
    }

    fn derive_child_key(&self, kdf: &Kdf, hash_id: &[u8; 32]) -> SecretKey {
        let s = hash(&[b"child", &kdf.secret, hash_id]);
        secret(mul(s, scalar(&kdf.cofactor)))
    }

    fn public_key(&self, sk: &SecretKey) -> EccPoint {
        point(mul(scalar(sk), G))
    }

    fn commit(&self, sk: &SecretKey, amount: u64, asset_id: u32) -> EccPoint {
        let v = add(
            mul(scalar(sk), G),
            mul(amount % P, value_generator(asset_id)),
        );
        point(v)
    }

    fn point_add(&self, a: &EccPoint, b: &EccPoint) -> Result<EccPoint, Status> {
        if let Some(s) = self.fail_point_add.get() {
            return Err(s);
        }

        Ok(point(add(read(&a.x), read(&b.x))))
    }

    fn scalar_add(&self, a: &SecretKey, b: &SecretKey) -> SecretKey {
        secret(add(scalar(a), scalar(b)))
    }

    fn scalar_neg(&self, a: &SecretKey) -> SecretKey {
        secret(neg(scalar(a)))
    }

    fn sign(
        &self,
        msg: &[u8; 32],
        nonce_pub: &EccPoint,
        sk: &SecretKey,
        nonce: &SecretKey,
    ) -> SecretKey {
        let e = challenge(nonce_pub, msg);
        secret(add(scalar(nonce), mul(e, scalar(sk))))
    }

    fn verify(&self, msg: &[u8; 32], sig: &Signature, pk: &EccPoint) -> bool {
        let e = challenge(&sig.nonce_pub, msg);

        let lhs = mul(scalar(&sig.sign_k), G);
        let rhs = add(read(&sig.nonce_pub.x), mul(e, read(&pk.x)));

        lhs == rhs
    }

    fn create_master_nonce(&self, seed: &Seed) -> SecretKey {
        secret(hash(&[b"master", seed.as_bytes()]))
    }

    fn create_derived_nonce(&self, master: &SecretKey, idx: u16, prev: &SecretKey) -> SecretKey {
        secret(hash(&[
            b"derive",
            master.as_bytes(),
            &idx.to_le_bytes(),
            prev.as_bytes(),
        ]))
    }

    fn export_owner_key(&self, kdf: &Kdf) -> [u8; 32] {
        write(hash(&[b"owner", &kdf.secret, kdf.cofactor.as_bytes()]))
    }

    fn export_pkdf(&self, kdf: &Kdf) -> Pkdf {
        let cof = scalar(&kdf.cofactor);

        Pkdf {
            key: write(hash(&[b"pkdf", &kdf.secret])),
            cofactor_g: point(mul(cof, G)),
            cofactor_j: point(mul(cof, J)),
        }
    }

    fn generate_rangeproof(
        &self,
        sk: &SecretKey,
        cid: &CoinId,
        pt0: &EccPoint,
        pt1: &EccPoint,
        extra: Option<&[SecretKey; 2]>,
    ) -> Result<Rangeproof, Status> {
        let mut tau1 = hash(&[b"tau1", sk.as_bytes(), &cid.idx.to_le_bytes()]);
        let mut tau2 = hash(&[b"tau2", sk.as_bytes(), &cid.idx.to_le_bytes()]);

        if let Some([e0, e1]) = extra {
            tau1 = add(tau1, scalar(e0));
            tau2 = add(tau2, scalar(e1));
        }

        let t1 = add(read(&pt0.x), mul(tau1, G));
        let t2 = add(read(&pt1.x), mul(tau2, G));
        let x = hash(&[b"x", &write(t1), &write(t2)]);

        let taux = add(add(mul(tau1, x), mul(tau2, mul(x, x))), scalar(sk));

        Ok(Rangeproof {
            taux: secret(taux),
            pt0: point(t1),
            pt1: point(t2),
        })
    }
}
