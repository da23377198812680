// Copyright (c) 2022-2023 The Beam Developers

//! Validated domain types and conversions to / from protocol objects
//!
//! Protocol objects carry scalars and coordinates as variable length `bytes`,
//! these are checked here before any value reaches the signing code.

use alloc::vec::Vec;
use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use beam_hw_proto::common as proto;

use crate::{consts::FIELD_LEN, error::DataError};

/// Secret scalar, cleared on drop
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey(pub [u8; 32]);

impl SecretKey {
    /// All-zero scalar
    pub const ZERO: SecretKey = SecretKey([0u8; 32]);

    pub const fn new(v: [u8; 32]) -> Self {
        Self(v)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.is_zero() {
            true => write!(f, "SecretKey(zero)"),
            false => write!(f, "SecretKey(<redacted>)"),
        }
    }
}

impl From<[u8; 32]> for SecretKey {
    fn from(v: [u8; 32]) -> Self {
        Self(v)
    }
}

/// Seed derived from the device mnemonic
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; 32]);

impl Seed {
    pub const fn new(v: [u8; 32]) -> Self {
        Self(v)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed(<redacted>)")
    }
}

/// Key derivation context (generator secret and cofactor scalar)
#[derive(Clone, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct Kdf {
    pub secret: [u8; 32],
    pub cofactor: SecretKey,
}

impl fmt::Debug for Kdf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Kdf(<redacted>)")
    }
}

/// Compressed curve point
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug, Zeroize)]
pub struct EccPoint {
    pub x: [u8; 32],
    pub y: bool,
}

impl EccPoint {
    /// Zero (missing / identity) point
    pub const ZERO: EccPoint = EccPoint {
        x: [0u8; 32],
        y: false,
    };

    pub fn is_zero(&self) -> bool {
        !self.y && self.x.iter().all(|b| *b == 0)
    }
}

impl TryFrom<&proto::EccPoint> for EccPoint {
    type Error = DataError;

    fn try_from(p: &proto::EccPoint) -> Result<Self, Self::Error> {
        let x = p
            .x
            .as_slice()
            .try_into()
            .map_err(|_| DataError::InvalidPointSize)?;

        Ok(Self { x, y: p.y })
    }
}

impl From<&EccPoint> for proto::EccPoint {
    fn from(p: &EccPoint) -> Self {
        Self {
            x: p.x.to_vec(),
            y: p.y,
        }
    }
}

/// Parse an optional point, missing points are zero
pub fn parse_point(p: Option<&proto::EccPoint>) -> Result<EccPoint, DataError> {
    match p {
        Some(p) => EccPoint::try_from(p),
        None => Ok(EccPoint::ZERO),
    }
}

/// Parse a scalar, empty values are zero
pub fn parse_scalar(b: &[u8]) -> Result<SecretKey, DataError> {
    match b.len() {
        0 => Ok(SecretKey::ZERO),
        FIELD_LEN => {
            let mut k = SecretKey::ZERO;
            k.0.copy_from_slice(b);
            Ok(k)
        }
        _ => Err(DataError::InvalidScalarSize),
    }
}

/// Schnorr signature
#[derive(Clone, Default, PartialEq, Eq, Debug, Zeroize)]
pub struct Signature {
    pub nonce_pub: EccPoint,
    pub sign_k: SecretKey,
}

impl TryFrom<&proto::Signature> for Signature {
    type Error = DataError;

    fn try_from(s: &proto::Signature) -> Result<Self, Self::Error> {
        Ok(Self {
            nonce_pub: parse_point(s.nonce_pub.as_ref())?,
            sign_k: parse_scalar(&s.sign_k)?,
        })
    }
}

impl From<&Signature> for proto::Signature {
    fn from(s: &Signature) -> Self {
        Self {
            nonce_pub: Some((&s.nonce_pub).into()),
            sign_k: s.sign_k.0.to_vec(),
        }
    }
}

fn parse_signature(s: Option<&proto::Signature>) -> Result<Signature, DataError> {
    match s {
        Some(s) => Signature::try_from(s),
        None => Ok(Signature::default()),
    }
}

/// Coin identifier, key derivation path and value
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Zeroize)]
pub struct CoinId {
    pub idx: u64,
    pub kind: u32,
    pub sub_idx: u32,
    pub amount: u64,
    pub asset_id: u32,
}

impl From<&proto::CoinId> for CoinId {
    fn from(c: &proto::CoinId) -> Self {
        Self {
            idx: c.idx,
            kind: c.r#type,
            sub_idx: c.sub_idx,
            amount: c.amount,
            asset_id: c.asset_id,
        }
    }
}

impl From<&CoinId> for proto::CoinId {
    fn from(c: &CoinId) -> Self {
        Self {
            idx: c.idx,
            r#type: c.kind,
            sub_idx: c.sub_idx,
            amount: c.amount,
            asset_id: c.asset_id,
        }
    }
}

/// Kernel parameters used for signing
#[derive(Clone, Default, PartialEq, Eq, Debug, Zeroize)]
pub struct KernelParams {
    pub fee: u64,
    pub min_height: u64,
    pub max_height: u64,
    pub commitment: EccPoint,
    pub signature: Signature,
}

impl TryFrom<&proto::KernelParameters> for KernelParams {
    type Error = DataError;

    fn try_from(k: &proto::KernelParameters) -> Result<Self, Self::Error> {
        if k.min_height > k.max_height {
            return Err(DataError::InvalidHeights);
        }

        Ok(Self {
            fee: k.fee,
            min_height: k.min_height,
            max_height: k.max_height,
            commitment: parse_point(k.commitment.as_ref())?,
            signature: parse_signature(k.signature.as_ref())?,
        })
    }
}

/// Validated transaction common info
#[derive(Clone, Debug)]
pub struct CommonInfo {
    pub inputs: Vec<CoinId>,
    pub outputs: Vec<CoinId>,
    pub offset_sk: SecretKey,
    pub kernel: KernelParams,
}

impl TryFrom<&proto::TxCommon> for CommonInfo {
    type Error = DataError;

    fn try_from(c: &proto::TxCommon) -> Result<Self, Self::Error> {
        let kernel = c
            .kernel_params
            .as_ref()
            .ok_or(DataError::MissingField)?;

        Ok(Self {
            inputs: c.inputs.iter().map(CoinId::from).collect(),
            outputs: c.outputs.iter().map(CoinId::from).collect(),
            offset_sk: parse_scalar(&c.offset_sk)?,
            kernel: KernelParams::try_from(kernel)?,
        })
    }
}

/// Validated two party transaction info
#[derive(Clone, Default, PartialEq, Eq, Debug, Zeroize)]
pub struct MutualInfo {
    /// Peer identity, zero for anonymous transactions
    pub peer: [u8; 32],
    pub wallet_identity_key: u64,
    pub payment_proof_signature: Signature,
}

impl MutualInfo {
    pub fn has_peer(&self) -> bool {
        self.peer.iter().any(|b| *b != 0)
    }
}

impl TryFrom<&proto::TxMutualInfo> for MutualInfo {
    type Error = DataError;

    fn try_from(m: &proto::TxMutualInfo) -> Result<Self, Self::Error> {
        let peer = match m.peer.len() {
            0 => [0u8; 32],
            FIELD_LEN => {
                let mut p = [0u8; 32];
                p.copy_from_slice(&m.peer);
                p
            }
            _ => return Err(DataError::InvalidPeer),
        };

        Ok(Self {
            peer,
            wallet_identity_key: m.wallet_identity_key,
            payment_proof_signature: parse_signature(m.payment_proof_signature.as_ref())?,
        })
    }
}

#[cfg(test)]
mod test {
    use alloc::vec;

    use super::*;

    #[test]
    fn point_sizes() {
        let tests = &[
            (vec![0x11; 32], Ok(())),
            (vec![0x11; 31], Err(DataError::InvalidPointSize)),
            (vec![0x11; 33], Err(DataError::InvalidPointSize)),
            (vec![], Err(DataError::InvalidPointSize)),
        ];

        for (x, r) in tests {
            let p = proto::EccPoint {
                x: x.clone(),
                y: true,
            };
            assert_eq!(EccPoint::try_from(&p).map(|_| ()), *r, "x len {}", x.len());
        }

        assert_eq!(parse_point(None), Ok(EccPoint::ZERO));
    }

    #[test]
    fn scalar_sizes() {
        assert_eq!(parse_scalar(&[]), Ok(SecretKey::ZERO));
        assert_eq!(parse_scalar(&[7u8; 32]), Ok(SecretKey([7u8; 32])));
        assert_eq!(parse_scalar(&[7u8; 16]), Err(DataError::InvalidScalarSize));
    }

    #[test]
    fn kernel_heights() {
        let mut k = proto::KernelParameters {
            fee: 100,
            min_height: 10,
            max_height: 9,
            ..Default::default()
        };

        assert_eq!(
            KernelParams::try_from(&k),
            Err(DataError::InvalidHeights)
        );

        k.max_height = 10;
        let p = KernelParams::try_from(&k).unwrap();
        assert_eq!(p.fee, 100);
        assert!(p.commitment.is_zero());
        assert!(p.signature.sign_k.is_zero());
    }

    #[test]
    fn common_requires_kernel() {
        let c = proto::TxCommon::default();
        assert_eq!(
            CommonInfo::try_from(&c).map(|_| ()),
            Err(DataError::MissingField)
        );
    }

    #[test]
    fn mutual_peer_size() {
        let mut m = proto::TxMutualInfo {
            peer: vec![1u8; 20],
            ..Default::default()
        };
        assert_eq!(MutualInfo::try_from(&m), Err(DataError::InvalidPeer));

        m.peer = vec![];
        let i = MutualInfo::try_from(&m).unwrap();
        assert!(!i.has_peer());

        m.peer = vec![1u8; 32];
        let i = MutualInfo::try_from(&m).unwrap();
        assert!(i.has_peer());
    }

    #[test]
    fn coin_id_equality() {
        let a = CoinId {
            idx: 1,
            kind: 0,
            sub_idx: 0,
            amount: 100_000_000,
            asset_id: 0,
        };

        let p = proto::CoinId::from(&a);
        assert_eq!(CoinId::from(&p), a);

        let mut b = a;
        b.asset_id = 1;
        assert_ne!(a, b);
    }

    #[test]
    fn secret_debug_redacted() {
        let k = SecretKey([0xab; 32]);
        let s = alloc::format!("{k:?}");
        assert!(!s.contains("ab"));
        assert!(!s.contains("171"));
    }
}
