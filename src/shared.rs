// SPDX-License-Identifier: MIT

//! A lock-guarded handle for sharing one round's HMAC_DRBG between
//! threads.
use crate::{error::Error, hmac_drbg::HmacDrbg};

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    vec::Vec,
};

/// A cloneable handle to a single [`HmacDrbg`].
///
/// Every method call locks the instance for its whole duration, so
/// calls from different threads never interleave inside one generate
/// call. Use [`with`](SharedHmacDrbg::with) when a sequence of calls,
/// such as a whole draw, must not be interleaved either.
///
/// The order in which threads acquire the lock decides which part of
/// the stream each one gets. Distinct rounds should use distinct
/// instances, which need no coordination at all.
///
/// # Example
///
/// ```
/// # use fairdraw::error::Error;
/// use fairdraw::{draw, entropy::RoundSeeds, hash::HashAlgorithm, shared::SharedHmacDrbg};
///
/// # fn main() -> Result<(),Error> {
/// let seeds = RoundSeeds::new("server seed", "client seed", 3);
/// let drbg = SharedHmacDrbg::from(seeds.drbg(HashAlgorithm::Sha256)?);
/// let roulette = drbg.with(|drbg| draw::draw_with_replacement(drbg, 0, 36, 1))?;
/// assert!(roulette[0] <= 36);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SharedHmacDrbg {
    rng: Arc<Mutex<HmacDrbg>>,
}

impl From<HmacDrbg> for SharedHmacDrbg {
    fn from(drbg: HmacDrbg) -> Self {
        Self {
            rng: Arc::new(Mutex::new(drbg)),
        }
    }
}

impl SharedHmacDrbg {
    // Every operation leaves the state consistent before it can
    // panic, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HmacDrbg> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the instance.
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut HmacDrbg) -> R,
    {
        f(&mut *self.lock())
    }

    /// See [`generate`](crate::hmac_drbg::HmacDrbg::generate) for details.
    pub fn generate(
        &self,
        bytes_requested: usize,
        additional: Option<&[u8]>,
    ) -> Result<Vec<u8>, Error> {
        self.lock().generate(bytes_requested, additional)
    }

    /// See [`fill_bytes`](crate::hmac_drbg::HmacDrbg::fill_bytes) for details.
    pub fn fill_bytes(&self, bytes: &mut [u8], additional: Option<&[u8]>) -> Result<(), Error> {
        self.lock().fill_bytes(bytes, additional)
    }

    /// See [`reseed`](crate::hmac_drbg::HmacDrbg::reseed) for details.
    pub fn reseed(&self, entropy: &[u8], additional: Option<&[u8]>) -> Result<(), Error> {
        self.lock().reseed(entropy, additional)
    }

    /// See [`rounds`](crate::hmac_drbg::HmacDrbg::rounds) for details.
    pub fn rounds(&self) -> u64 {
        self.lock().rounds()
    }
}
