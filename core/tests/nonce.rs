// Copyright (c) 2022-2023 The Beam Developers

use beam_hw_core::{engine::Engine, proto::prelude::*};

mod helpers;
use helpers::*;

fn nonce_public(e: &TestEngine, slot: u32) -> Result<EccPoint, Failure> {
    e.exchange(MessageType::GetNoncePublic, &GetNoncePublic { slot })
}

#[test]
fn nonce_slots() -> anyhow::Result<()> {
    setup();

    let e = TestEngine::new(MNEMONIC);

    let n: NumSlots = e
        .exchange(MessageType::GetNumSlots, &GetNumSlots { show_display: true })
        .unwrap();
    assert_eq!(n.num_slots, 32);

    let prompts = e.take_prompts();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].pages[0].body(), "Number of available nonce slots is:32");

    // Slot images are stable and distinct
    let mut images = Vec::new();
    for slot in 0..n.num_slots {
        let a = nonce_public(&e, slot).unwrap();
        let b = nonce_public(&e, slot).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.x.len(), 32);
        assert!(!images.contains(&a));

        images.push(a);
    }

    Ok(())
}

#[test]
fn nonce_slot_errors() -> anyhow::Result<()> {
    setup();

    let e = TestEngine::new(MNEMONIC);

    for slot in [32, 33, u32::MAX] {
        let f = nonce_public(&e, slot).unwrap_err();
        assert_eq!(f.kind(), Some(FailureType::DataError));
        assert_eq!(f.message, "Incorrect slot provided");
    }

    // Uninitialised vault, slot range is checked first
    let e = TestEngine::from_engine(Engine::new(TestDriver::new(MNEMONIC)));

    let f = nonce_public(&e, 5).unwrap_err();
    assert_eq!(f.kind(), Some(FailureType::NotInitialized));
    assert_eq!(f.message, "Nonce Generator is not initialized");

    let f = nonce_public(&e, 32).unwrap_err();
    assert_eq!(f.kind(), Some(FailureType::DataError));

    let f = e
        .exchange::<_, NumSlots>(MessageType::GetNumSlots, &GetNumSlots { show_display: false })
        .unwrap_err();
    assert_eq!(
        f.message,
        "No Slots are available. Nonce Generator is not initialized"
    );

    Ok(())
}

#[test]
fn master_nonce_setup() -> anyhow::Result<()> {
    setup();

    let mut engine = Engine::new(TestDriver::new(MNEMONIC));
    engine.create_master_nonce()?;

    // Master nonce is created once per device
    let r = engine.create_master_nonce();
    assert!(r.is_err());

    // Devices with distinct seeds hold distinct slots
    let a = TestEngine::from_engine(engine);
    let b = TestEngine::new(PEER_MNEMONIC);
    assert_ne!(nonce_public(&a, 0).unwrap(), nonce_public(&b, 0).unwrap());

    Ok(())
}
