// Copyright (c) 2022-2023 The Beam Developers

//! Hash oracle for domain separated identifiers
//!
//! A SHA-256 transcript, integers are written as base-128 varints and points
//! as their x coordinate followed by a single y byte.

use sha2::{Digest, Sha256};

use crate::types::{EccPoint, SecretKey};

/// Maximum encoded length for a u64 varint
const MAX_VARINT_LEN: usize = 10;

#[derive(Clone, Default)]
pub struct Oracle {
    h: Sha256,
}

impl Oracle {
    pub fn new() -> Self {
        Self { h: Sha256::new() }
    }

    pub fn write(&mut self, b: &[u8]) -> &mut Self {
        self.h.update(b);
        self
    }

    pub fn u8(&mut self, v: u8) -> &mut Self {
        self.write(&[v])
    }

    pub fn u64(&mut self, v: u64) -> &mut Self {
        let mut buff = [0u8; MAX_VARINT_LEN];
        let n = encode_varint(v, &mut buff);
        self.write(&buff[..n])
    }

    pub fn u32(&mut self, v: u32) -> &mut Self {
        self.u64(v as u64)
    }

    pub fn point(&mut self, p: &EccPoint) -> &mut Self {
        self.write(&p.x);
        self.u8(p.y as u8)
    }

    pub fn scalar(&mut self, s: &SecretKey) -> &mut Self {
        self.write(s.as_bytes())
    }

    /// Finalise the oracle, returning the hash value
    pub fn finalize(self) -> [u8; 32] {
        self.h.finalize().into()
    }
}

/// Encode a u64 as a base-128 varint, returning the encoded length
pub fn encode_varint(mut v: u64, buff: &mut [u8; MAX_VARINT_LEN]) -> usize {
    let mut n = 0;

    while v >= 0x80 {
        buff[n] = (v as u8) | 0x80;
        v >>= 7;
        n += 1;
    }

    buff[n] = v as u8;
    n + 1
}
