// Copyright (c) 2022-2023 The Beam Developers

//! Persisted one-time nonce slots
//!
//! The vault stores a master nonce at [`MASTER_NONCE_IDX`] and
//! [`NUM_NONCE_SLOTS`] derived nonces at storage keys `1..=NUM_NONCE_SLOTS`.
//! Slots are addressed externally as `0..NUM_NONCE_SLOTS`, slot `n` lives at
//! key `n + 1`.
//!
//! A slot is rotated on [`NonceVault::consume`], the replacement is derived
//! one-way from the master nonce and the consumed value.

use zeroize::Zeroize;

use crate::{
    consts::{BEAM_APP_ID, MASTER_NONCE_IDX, NUM_NONCE_SLOTS},
    crypto::Crypto,
    error::{DataError, Error, Uninit},
    types::{EccPoint, SecretKey, Seed},
};

/// [`Storage`] trait provides persisted key / value storage for nonce slots
pub trait Storage {
    /// Read a value, returning false if no value is stored
    fn get(&self, app_id: u8, key: u16, value: &mut [u8; 32]) -> bool;

    /// Write a value, returning false on failure
    fn set(&mut self, app_id: u8, key: u16, value: &[u8; 32]) -> bool;
}

impl<T: Storage> Storage for &mut T {
    fn get(&self, app_id: u8, key: u16, value: &mut [u8; 32]) -> bool {
        T::get(self, app_id, key, value)
    }

    fn set(&mut self, app_id: u8, key: u16, value: &[u8; 32]) -> bool {
        T::set(self, app_id, key, value)
    }
}

/// Check whether a slot index is externally addressable
pub fn is_valid_slot(idx: u32) -> bool {
    idx < NUM_NONCE_SLOTS
}

/// Check whether a storage key refers to a derived nonce
pub fn is_valid_key(key: u16) -> bool {
    key != MASTER_NONCE_IDX && key as u32 <= NUM_NONCE_SLOTS
}

/// Nonce vault over borrowed storage and crypto
pub struct NonceVault<'a, S: Storage, C: Crypto> {
    storage: &'a mut S,
    crypto: &'a C,
}

impl<'a, S: Storage, C: Crypto> NonceVault<'a, S, C> {
    pub fn new(storage: &'a mut S, crypto: &'a C) -> Self {
        Self { storage, crypto }
    }

    fn read(&self, key: u16) -> Option<SecretKey> {
        let mut k = SecretKey::ZERO;

        match self.storage.get(BEAM_APP_ID, key, &mut k.0) {
            true => Some(k),
            false => None,
        }
    }

    fn write(&mut self, key: u16, value: &SecretKey) -> Result<(), Error> {
        match self.storage.set(BEAM_APP_ID, key, value.as_bytes()) {
            true => Ok(()),
            false => Err(Error::Storage),
        }
    }

    /// Check whether the master nonce has been created
    pub fn is_master_nonce_created(&self) -> bool {
        match self.read(MASTER_NONCE_IDX) {
            Some(k) => !k.is_zero(),
            None => false,
        }
    }

    /// Create the master nonce and derive the initial slot nonces
    pub fn create_master_nonce(&mut self, seed: &Seed) -> Result<(), Error> {
        if self.is_master_nonce_created() {
            return Err(Error::AlreadyInitialized);
        }

        let master = self.crypto.create_master_nonce(seed);

        for key in 1..=NUM_NONCE_SLOTS as u16 {
            let n = self.crypto.create_derived_nonce(&master, key, &master);
            self.write(key, &n)?;
        }

        // Master is written last so partially initialised slots are re-derived
        self.write(MASTER_NONCE_IDX, &master)?;

        #[cfg(feature = "log")]
        log::debug!("created master nonce and {} slots", NUM_NONCE_SLOTS);

        Ok(())
    }

    /// Resolve a slot index to a storage key, checking the index prior to
    /// initialisation
    fn slot_key(&self, idx: u32) -> Result<u16, Error> {
        if !is_valid_slot(idx) {
            return Err(Error::DataError(DataError::InvalidSlot));
        }

        if !self.is_master_nonce_created() {
            return Err(Error::NotInitialized(Uninit::NonceGenerator));
        }

        Ok(idx as u16 + 1)
    }

    fn read_slot(&self, key: u16) -> Result<SecretKey, Error> {
        debug_assert!(is_valid_key(key));

        self.read(key).ok_or(Error::Storage)
    }

    /// Fetch the public image of a slot nonce
    pub fn get_nonce_public(&self, idx: u32) -> Result<EccPoint, Error> {
        let key = self.slot_key(idx)?;
        let n = self.read_slot(key)?;

        Ok(self.crypto.public_key(&n))
    }

    /// Fetch the current secret for a slot without rotation
    pub fn get_nonce(&self, idx: u32) -> Result<SecretKey, Error> {
        let key = self.slot_key(idx)?;
        self.read_slot(key)
    }

    /// Fetch the current secret for a slot and replace it with the next nonce
    pub fn consume(&mut self, idx: u32) -> Result<SecretKey, Error> {
        let key = self.slot_key(idx)?;

        let current = self.read_slot(key)?;
        let master = self.read(MASTER_NONCE_IDX).ok_or(Error::Storage)?;

        let mut next = self.crypto.create_derived_nonce(&master, key, &current);
        let r = self.write(key, &next);
        next.zeroize();
        r?;

        #[cfg(feature = "log")]
        log::debug!("rotated nonce slot {}", idx);

        Ok(current)
    }
}

/// In-memory [Storage] for tests and simulation
#[cfg(any(test, feature = "mock"))]
#[derive(Default)]
pub struct MemStorage {
    values: heapless::FnvIndexMap<(u8, u16), [u8; 32], 64>,
    fail_writes: bool,
}

#[cfg(any(test, feature = "mock"))]
impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail subsequent writes
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Fetch a raw stored value
    pub fn raw(&self, app_id: u8, key: u16) -> Option<&[u8; 32]> {
        self.values.get(&(app_id, key))
    }
}

#[cfg(any(test, feature = "mock"))]
impl Storage for MemStorage {
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
        if self.fail_writes {
            return false;
        }

        self.values.insert((app_id, key), *value).is_ok()
    }
}
