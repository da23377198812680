// Copyright (c) 2022-2023 The Beam Developers

//! Kernel identifiers and signed message digests

use crate::{
    oracle::Oracle,
    types::{CoinId, EccPoint, KernelParams},
};

use super::TxKind;

fn coins(o: &mut Oracle, label: &[u8], coins: &[CoinId]) {
    o.write(label).u64(coins.len() as u64);

    for c in coins {
        o.u64(c.idx)
            .u32(c.kind)
            .u32(c.sub_idx)
            .u64(c.amount)
            .u32(c.asset_id);
    }
}

/// Start a kernel identifier transcript over the transaction parameters,
/// callers append any kind-specific values prior to finalising
pub fn kernel_id(kind: TxKind, k: &KernelParams, inputs: &[CoinId], outputs: &[CoinId]) -> Oracle {
    let mut o = Oracle::new();

    o.write(b"krn.id")
        .u8(kind as u8)
        .u64(k.fee)
        .u64(k.min_height)
        .u64(k.max_height);

    coins(&mut o, b"ins", inputs);
    coins(&mut o, b"outs", outputs);

    o
}

/// Hash identifier for a value derived from a kernel id
pub fn derived_id(label: &[u8], kernel_id: &[u8; 32]) -> [u8; 32] {
    let mut o = Oracle::new();
    o.write(label).write(kernel_id);
    o.finalize()
}

/// Kernel message, binding fee, heights, commitment and asset
pub fn kernel_msg(fee: u64, min_height: u64, max_height: u64, commitment: &EccPoint, asset_id: u32) -> [u8; 32] {
    let mut o = Oracle::new();

    o.write(b"krn.msg")
        .u64(fee)
        .u64(min_height)
        .u64(max_height)
        .point(commitment)
        .u32(asset_id);

    o.finalize()
}

/// Payment proof message, signed by the receiver identity
pub fn payment_proof_msg(kernel_msg: &[u8; 32], amount: u64, asset_id: u32, sender: &[u8; 32]) -> [u8; 32] {
    let mut o = Oracle::new();

    o.write(b"pp")
        .write(kernel_msg)
        .u64(amount)
        .u32(asset_id)
        .write(sender);

    o.finalize()
}

/// Nonce identifier for payment proof signatures
pub fn payment_proof_nonce_id(kernel_msg: &[u8; 32], wid: u64) -> [u8; 32] {
    let mut o = Oracle::new();
    o.write(b"pp.nonce").write(kernel_msg).u64(wid);
    o.finalize()
}

/// User agreement identifier over the sender contribution
pub fn user_agreement_id(kernel_id: &[u8; 32], commitment: &EccPoint, nonce_pub: &EccPoint) -> [u8; 32] {
    let mut o = Oracle::new();
    o.write(b"ua").write(kernel_id).point(commitment).point(nonce_pub);
    o.finalize()
}
