// Copyright (c) 2022-2023 The Beam Developers

use beam_hw_core::engine::{Engine, PromptKind, State, EXPORT_WARNING, WAIT_WARNING};
use beam_hw_core::proto::prelude::*;

mod helpers;
use helpers::*;

fn owner_key(e: &TestEngine, show_display: bool) -> Result<OwnerKey, Failure> {
    e.exchange(MessageType::GetOwnerKey, &GetOwnerKey { show_display })
}

fn pkdf(e: &TestEngine, child_idx: u32, is_root_key: bool, show_display: bool) -> Result<PKdf, Failure> {
    e.exchange(
        MessageType::GetPKdf,
        &GetPKdf {
            child_idx,
            is_root_key,
            show_display,
        },
    )
}

#[test]
fn owner_key_export() {
    setup();

    let e = TestEngine::new(MNEMONIC);

    let a = owner_key(&e, false).unwrap();
    assert_eq!(a.key.len(), 32);

    // Export and wait warnings only
    let prompts = e.take_prompts();
    assert_eq!(prompts.len(), 2);
    for (p, msg) in prompts.iter().zip([EXPORT_WARNING, WAIT_WARNING]) {
        assert_eq!(p.kind, PromptKind::ProtectCall);
        assert_eq!(p.title(), "Owner key");
        assert_eq!(p.pages[0].body(), msg);
    }

    // Displayed keys match the response
    let b = owner_key(&e, true).unwrap();
    assert_eq!(a, b);

    let prompts = e.take_prompts();
    assert_eq!(prompts.len(), 3);
    let shown: String = b.key.iter().map(|v| format!("{v:02x}")).collect();
    assert_eq!(prompts[2].pages[0].body(), shown);

    // Keys are specific to the seed
    let other = TestEngine::new(PEER_MNEMONIC);
    assert_ne!(owner_key(&other, false).unwrap(), a);
}

#[test]
fn owner_key_declined() {
    setup();

    for n in 0..2 {
        let e = TestEngine::new(MNEMONIC);

        let mut answers = vec![true; n];
        answers.push(false);
        e.answers(&answers);

        let f = owner_key(&e, false).unwrap_err();
        assert_eq!(f.kind(), Some(FailureType::ActionCancelled));
        assert_eq!(e.engine.lock().unwrap().state(), State::Cancelled);
    }
}

#[test]
fn pkdf_export() {
    setup();

    let e = TestEngine::new(MNEMONIC);

    // Child keys are quiet unless displayed
    let child = pkdf(&e, 0, false, false).unwrap();
    assert!(e.take_prompts().is_empty());
    assert_eq!(child.key.len(), 32);
    assert!(child.cofactor_g.is_some() && child.cofactor_j.is_some());

    assert_eq!(pkdf(&e, 0, false, false).unwrap(), child);
    assert_ne!(pkdf(&e, 1, false, false).unwrap(), child);

    // Displayed child export
    let shown = pkdf(&e, 0, false, true).unwrap();
    assert_eq!(shown, child);

    let titles: Vec<_> = e
        .take_prompts()
        .iter()
        .map(|p| p.title().to_string())
        .collect();
    assert_eq!(titles, vec!["Generate PKdf", "Generated PKdf"]);

    // Root export carries both owner key warnings
    let root = pkdf(&e, 0, true, false).unwrap();
    assert_ne!(root, child);

    let prompts = e.take_prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts.iter().all(|p| p.title() == "Owner key"));
}

#[test]
fn pkdf_root_declined() {
    setup();

    let e = TestEngine::new(MNEMONIC);
    e.answers(&[true, false]);

    let f = pkdf(&e, 0, true, true).unwrap_err();
    assert_eq!(f.kind(), Some(FailureType::ActionCancelled));
    assert_eq!(e.take_prompts().len(), 2);
}

#[test]
fn keys_require_seed() {
    setup();

    let e = TestEngine::from_engine(Engine::new(TestDriver::uninitialised()));

    let f = owner_key(&e, true).unwrap_err();
    assert_eq!(f.kind(), Some(FailureType::NotInitialized));
    assert_eq!(f.message, "Device is not initialized");

    let f = pkdf(&e, 0, true, true).unwrap_err();
    assert_eq!(f.kind(), Some(FailureType::NotInitialized));

    // No warnings are shown without a seed
    assert!(e.take_prompts().is_empty());
}
