// Copyright (c) 2022-2023 The Beam Developers

#![allow(unused)]

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
};

use bip39::{Language, Mnemonic, Seed as Bip39Seed};
use log::{debug, LevelFilter};
use prost::Message;
use sha2::{Digest, Sha256};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use zeroize::Zeroizing;

use beam_hw_core::{
    crypto::RistrettoCrypto,
    engine::{Driver, Engine, Error, Event, Output, Prompt},
    keys::{kdf_from_seed, wallet_identity},
    nonce::Storage,
    proto::prelude::*,
    types::Seed,
};

pub const MNEMONIC: &str = "duck deal pretty pen thunder economy wide common goose fit engine main aisle curtain choose cube claim snake enroll detect brief history float unit";

pub const PEER_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

/// Initialise test logging
pub fn setup() {
    let _ = TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
}

/// In-memory nonce storage
#[derive(Default)]
pub struct TestStorage {
    values: HashMap<(u8, u16), [u8; 32]>,
}

impl Storage for TestStorage {
    fn get(&self, app_id: u8, key: u16, value: &mut [u8; 32]) -> bool {
        match self.values.get(&(app_id, key)) {
            Some(v) => {
                value.copy_from_slice(v);
                true
            }
            None => false,
        }
    }

    fn set(&mut self, app_id: u8, key: u16, value: &[u8; 32]) -> bool {
        self.values.insert((app_id, key), *value);
        true
    }
}

/// Driver implementation for test use
pub struct TestDriver {
    pub mnemonic: Option<String>,
    pub storage: TestStorage,
    /// Scripted confirmation answers, accepts once exhausted
    pub answers: VecDeque<bool>,
    /// Prompts shown, in order
    pub prompts: Vec<Prompt>,
}

impl TestDriver {
    pub fn new(mnemonic: &str) -> Self {
        Self {
            mnemonic: Some(mnemonic.to_string()),
            storage: TestStorage::default(),
            answers: VecDeque::new(),
            prompts: Vec::new(),
        }
    }

    /// Create a driver with no mnemonic loaded
    pub fn uninitialised() -> Self {
        Self {
            mnemonic: None,
            ..Self::new("")
        }
    }

    fn answer(&mut self, p: &Prompt) -> bool {
        debug!("prompt: {} ({} pages)", p.title(), p.pages.len());

        self.prompts.push(p.clone());
        self.answers.pop_front().unwrap_or(true)
    }
}

impl Driver for TestDriver {
    type Storage = TestStorage;

    fn mnemonic_secret(&self) -> Option<Zeroizing<String>> {
        self.mnemonic.clone().map(Zeroizing::new)
    }

    fn seed_from_mnemonic(&self, mnemonic: &str) -> Seed {
        let m = Mnemonic::from_phrase(mnemonic, Language::English).unwrap();
        let s = Bip39Seed::new(&m, "");

        let h = Sha256::digest(s.as_bytes());
        Seed::new(h.into())
    }

    fn storage(&mut self) -> &mut Self::Storage {
        &mut self.storage
    }

    fn confirm(&mut self, p: &Prompt) -> bool {
        self.answer(p)
    }

    fn confirm_hold(&mut self, p: &Prompt) -> bool {
        self.answer(p)
    }
}

/// Engine wrapper exchanging encoded messages
#[derive(Clone)]
pub struct TestEngine {
    pub engine: Arc<Mutex<Engine<TestDriver>>>,
}

impl TestEngine {
    /// Create a test engine with an initialised nonce vault
    pub fn new(mnemonic: &str) -> Self {
        let mut e = Engine::new(TestDriver::new(mnemonic));
        e.create_master_nonce().unwrap();

        Self {
            engine: Arc::new(Mutex::new(e)),
        }
    }

    pub fn from_engine(engine: Engine<TestDriver>) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
        }
    }

    /// Queue confirmation answers
    pub fn answers(&self, answers: &[bool]) {
        let mut e = self.engine.lock().unwrap();
        e.driver_mut().answers.extend(answers);
    }

    /// Fetch and clear recorded prompts
    pub fn take_prompts(&self) -> Vec<Prompt> {
        let mut e = self.engine.lock().unwrap();
        std::mem::take(&mut e.driver_mut().prompts)
    }

    /// Exchange an encoded request, returning the decoded response or failure
    pub fn exchange<REQ: Message, RESP: Message + Default>(
        &self,
        t: MessageType,
        req: &REQ,
    ) -> Result<RESP, Failure> {
        let buff = req.encode_to_vec();

        let evt = Event::parse(t.into(), &buff).unwrap();

        let mut e = self.engine.lock().unwrap();
        let out = e.handle(&evt);

        // Transaction state is cleared on every exit path
        assert!(e.transaction_manager().is_clear());

        let resp = out.encode();
        match out.message_type() {
            Some(MessageType::Failure) => Err(Failure::decode(&resp[..]).unwrap()),
            Some(r) => {
                assert_eq!(t.response(), Some(r));
                Ok(RESP::decode(&resp[..]).unwrap())
            }
            None => panic!("no response for {t}"),
        }
    }
}

/// Helper to build a BEAM coin
pub fn coin(idx: u64, amount: u64) -> CoinId {
    CoinId {
        idx,
        r#type: 0,
        sub_idx: 0,
        amount,
        asset_id: 0,
    }
}

pub fn kernel(fee: u64, min_height: u64, max_height: u64) -> KernelParameters {
    KernelParameters {
        fee,
        min_height,
        max_height,
        ..Default::default()
    }
}

/// Compute the wallet identity for a mnemonic, as known to peer wallets
pub fn wallet_id(mnemonic: &str, wid: u64) -> Vec<u8> {
    let c = RistrettoCrypto::new();

    let seed = TestDriver::new(mnemonic).seed_from_mnemonic(mnemonic);
    let kdf = kdf_from_seed(&c, &seed).unwrap();

    wallet_identity(&c, &kdf, wid).to_vec()
}
