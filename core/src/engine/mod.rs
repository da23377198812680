// Copyright (c) 2022-2023 The Beam Developers

//! The [Engine] provides functionality required by Beam hardware wallets.
//!
//! This handles [Event] inputs and returns [Output] responses to the caller,
//! see [beam_hw_proto] for message definitions and encodings.
//!
//! Each request is handled to completion within a single [`Engine::update`]
//! call, user confirmations are requested synchronously via the [Driver].
//! Transaction state is cleared on every exit path.

use alloc::string::String;

use strum::{Display, EnumIter, EnumString, EnumVariantNames};
use zeroize::Zeroizing;

use crate::{
    crypto::{Crypto, RistrettoCrypto},
    error::Uninit,
    keys::kdf_from_seed,
    nonce::{NonceVault, Storage},
    tx::TransactionManager,
    types::{Kdf, Seed},
};

pub use crate::error::Error;

mod event;
pub use event::Event;

mod output;
pub use output::Output;

mod prompt;
pub use prompt::{require_confirm, require_hold, Page, Prompt, PromptKind, Text, EXPORT_WARNING, WAIT_WARNING};

mod handlers;

pub mod sign;

mod transaction;

/// Engine state, updated on completion of each request
#[derive(Copy, Clone, PartialEq, Debug, EnumString, Display, EnumVariantNames, EnumIter)]
pub enum State {
    /// Idle, no request handled
    Init,
    /// Last request completed successfully
    Complete,
    /// Last request cancelled by the user
    Cancelled,
    /// Last request failed
    Error,
}

/// [`Driver`] trait provides platform support for [`Engine`] instances
pub trait Driver {
    /// Persisted storage for nonce slots
    type Storage: Storage;

    /// Fetch the device mnemonic, `None` if the device is not initialised
    fn mnemonic_secret(&self) -> Option<Zeroizing<String>>;

    /// Derive the wallet seed from a mnemonic
    fn seed_from_mnemonic(&self, mnemonic: &str) -> Seed;

    /// Fetch nonce slot storage
    fn storage(&mut self) -> &mut Self::Storage;

    /// Display a prompt, returning true if accepted by the user
    fn confirm(&mut self, prompt: &Prompt) -> bool;

    /// Display a hold-to-confirm prompt, returning true if accepted by the user
    fn confirm_hold(&mut self, prompt: &Prompt) -> bool;
}

impl<T: Driver> Driver for &mut T {
    type Storage = T::Storage;

    fn mnemonic_secret(&self) -> Option<Zeroizing<String>> {
        T::mnemonic_secret(self)
    }

    fn seed_from_mnemonic(&self, mnemonic: &str) -> Seed {
        T::seed_from_mnemonic(self, mnemonic)
    }

    fn storage(&mut self) -> &mut Self::Storage {
        T::storage(self)
    }

    fn confirm(&mut self, prompt: &Prompt) -> bool {
        T::confirm(self, prompt)
    }

    fn confirm_hold(&mut self, prompt: &Prompt) -> bool {
        T::confirm_hold(self, prompt)
    }
}

/// [Engine] provides hardware-independent support for Beam wallet operations
pub struct Engine<DRV: Driver, C: Crypto = RistrettoCrypto> {
    state: State,

    tm: TransactionManager,

    drv: DRV,
    crypto: C,
}

impl<DRV: Driver> Engine<DRV> {
    /// Create a new engine instance with the provided driver,
    /// using the default [RistrettoCrypto]
    pub fn new(drv: DRV) -> Self {
        Self::new_with_crypto(drv, RistrettoCrypto::new())
    }
}

impl<DRV: Driver, C: Crypto> Engine<DRV, C> {
    /// Create a new engine instance with the provided driver and crypto
    pub fn new_with_crypto(drv: DRV, crypto: C) -> Self {
        Self {
            state: State::Init,
            tm: TransactionManager::new(),
            drv,
            crypto,
        }
    }

    /// Handle incoming request events
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn update(&mut self, evt: &Event) -> Result<Output, Error> {
        self.state = State::Init;

        // Requests may carry secrets, only the type is logged
        #[cfg(feature = "log")]
        log::debug!("event: {:?}", evt.message_type());

        let r = self.dispatch(evt);

        // Zeroize transaction state
        self.tm.clear_state();

        self.state = match &r {
            Ok(Output::None) => State::Init,
            Ok(_) => State::Complete,
            Err(Error::ActionCancelled) => State::Cancelled,
            Err(_e) => {
                #[cfg(feature = "log")]
                log::warn!("request failed: {:?}", _e);

                State::Error
            }
        };

        r
    }

    /// Handle an incoming event, returning a [`Output::Failure`] on error
    pub fn handle(&mut self, evt: &Event) -> Output {
        match self.update(evt) {
            Ok(o) => o,
            Err(e) => Output::Failure(e.failure()),
        }
    }

    fn dispatch(&mut self, evt: &Event) -> Result<Output, Error> {
        match evt {
            Event::None => Ok(Output::None),

            Event::GetNumSlots(req) => self.get_num_slots(req),
            Event::GetNoncePublic(req) => self.get_nonce_public(req),
            Event::GetPKdf(req) => self.get_pkdf(req),
            Event::GetOwnerKey(req) => self.get_owner_key(req),
            Event::GenerateRangeproof(req) => self.generate_rangeproof(req),

            Event::SignTransactionSplit(req) => self.sign_split(req),
            Event::SignTransactionReceive(req) => self.sign_receive(req),
            Event::SignTransactionSend(req) => self.sign_send(req),
        }
    }

    /// Create the master nonce and initial nonce slots, called once at device setup
    pub fn create_master_nonce(&mut self) -> Result<(), Error> {
        let seed = self.seed()?;

        NonceVault::new(self.drv.storage(), &self.crypto).create_master_nonce(&seed)
    }

    /// Fetch the device seed
    fn seed(&self) -> Result<Seed, Error> {
        let mnemonic = self
            .drv
            .mnemonic_secret()
            .ok_or(Error::NotInitialized(Uninit::Device))?;

        Ok(self.drv.seed_from_mnemonic(&mnemonic))
    }

    /// Fetch the root KDF for the device seed
    fn kdf(&self) -> Result<Kdf, Error> {
        let seed = self.seed()?;
        let kdf = kdf_from_seed(&self.crypto, &seed)?;
        Ok(kdf)
    }

    /// Fetch engine state
    pub fn state(&self) -> State {
        self.state
    }

    /// Fetch transaction state, cleared between requests
    pub fn transaction_manager(&self) -> &TransactionManager {
        &self.tm
    }

    /// Fetch the platform driver
    pub fn driver(&self) -> &DRV {
        &self.drv
    }

    /// Fetch the platform driver for mutation, used to update stored state
    pub fn driver_mut(&mut self) -> &mut DRV {
        &mut self.drv
    }
}

#[cfg(test)]
pub(crate) mod test {
    extern crate std;

    use std::{collections::VecDeque, vec::Vec};

    use strum::IntoEnumIterator;

    use super::*;
    use crate::{crypto::MockCrypto, nonce::MemStorage, proto::prelude::*};

    /// Driver implementation for unit test use
    pub struct TestDriver {
        pub mnemonic: Option<&'static str>,
        pub storage: MemStorage,
        /// Scripted confirmation answers, empty accepts
        pub answers: VecDeque<bool>,
        pub prompts: Vec<Prompt>,
    }

    impl TestDriver {
        pub fn new() -> Self {
            Self {
                mnemonic: Some("unit test mnemonic"),
                storage: MemStorage::new(),
                answers: VecDeque::new(),
                prompts: Vec::new(),
            }
        }

        fn answer(&mut self, p: &Prompt) -> bool {
            self.prompts.push(p.clone());
            self.answers.pop_front().unwrap_or(true)
        }
    }

    impl Driver for TestDriver {
        type Storage = MemStorage;

        fn mnemonic_secret(&self) -> Option<Zeroizing<String>> {
            self.mnemonic.map(|m| Zeroizing::new(m.into()))
        }

        fn seed_from_mnemonic(&self, mnemonic: &str) -> Seed {
            let mut s = [0u8; 32];
            for (i, b) in mnemonic.bytes().enumerate() {
                s[i % 32] ^= b;
            }
            Seed::new(s)
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

    pub fn engine() -> Engine<TestDriver, MockCrypto> {
        Engine::new_with_crypto(TestDriver::new(), MockCrypto::new())
    }

    #[test]
    fn state_names() {
        for s in State::iter() {
            let n = std::format!("{s}");
            assert_eq!(n.parse::<State>().ok(), Some(s));
        }
    }

    #[test]
    fn empty_event() {
        let mut e = engine();

        assert_eq!(e.update(&Event::None), Ok(Output::None));
        assert_eq!(e.state(), State::Init);
    }

    #[test]
    fn uninitialised_device() {
        let mut e = engine();
        e.driver_mut().mnemonic = None;

        let r = e.update(&Event::GetOwnerKey(GetOwnerKey { show_display: false }));
        assert_eq!(r, Err(Error::NotInitialized(Uninit::Device)));
        assert_eq!(e.state(), State::Error);

        // Seed is checked before any prompt
        assert!(e.driver().prompts.is_empty());
        assert_eq!(e.create_master_nonce(), Err(Error::NotInitialized(Uninit::Device)));
    }

    #[test]
    fn cancelled_state() {
        let mut e = engine();
        e.driver_mut().answers.push_back(false);

        let r = e.update(&Event::GetOwnerKey(GetOwnerKey { show_display: false }));
        assert_eq!(r, Err(Error::ActionCancelled));
        assert_eq!(e.state(), State::Cancelled);
        assert!(e.transaction_manager().is_clear());

        // Failure responses carry the error code
        e.driver_mut().answers.push_back(false);
        match e.handle(&Event::GetOwnerKey(GetOwnerKey { show_display: false })) {
            Output::Failure(f) => assert_eq!(f.kind(), Some(FailureType::ActionCancelled)),
            o => panic!("unexpected output: {o:?}"),
        }
    }

    #[test]
    fn master_nonce_once() {
        let mut e = engine();

        e.create_master_nonce().unwrap();
        assert_eq!(e.create_master_nonce(), Err(Error::AlreadyInitialized));
    }
}
