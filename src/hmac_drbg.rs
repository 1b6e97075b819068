//
// Copyright (c) 2023 Daniel Ottavio
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE
//
//! A module to facilitate the HMAC_DRBG algorithm.
//!
//! The HMAC_DRBG algorithm is implemented via the [`HmacDrbg`]
//! type. This type may be created directly in the uninitialized state
//! with [`HmacDrbg::new`], or configured and instantiated in one step
//! with the builder class [`HmacBuilder`].
//!
use crate::{
    error::Error,
    hash::{Block, HashAlgorithm, HmacFn, MAX_DIGEST_LEN},
};

use alloc::{vec, vec::Vec};
use zeroize::{Zeroize, Zeroizing};

/// Maximum number of generate calls between two (re)seeds.
pub const MAX_RESEED_INTERVAL: u64 = 1 << 48;

/// Implementation of HMAC_DRBG as outlined by [SP 800-90A
/// Rev. 1](https://csrc.nist.gov/publications/detail/sp/800-90a/rev-1/final).
///
/// The generator never draws entropy on its own: every byte it
/// produces is a deterministic function of the seed material handed
/// to [`instantiate`](HmacDrbg::instantiate) and
/// [`reseed`](HmacDrbg::reseed) and of the sequence of calls made on
/// it. Callers must serialize access to an instance; see
/// [`SharedHmacDrbg`](crate::shared::SharedHmacDrbg) for a locked
/// handle.
///
/// # Example
///
/// ```
/// use fairdraw::{hash::HashAlgorithm, hmac_drbg::HmacDrbg};
///
/// # use fairdraw::error::Error;
/// #
/// # fn main() -> Result<(), Error> {
/// #
/// let mut drbg = HmacDrbg::new(HashAlgorithm::Sha256);
/// drbg.instantiate(b"0123456789abcdef0123456789abcdef", None, None)?;
///
/// // Generate random data
/// let random_data = drbg.generate(32, None)?;
/// assert_eq!(32, random_data.len());
///
/// // Reseed the instance
/// drbg.reseed(b"fresh entropy, at least 16 bytes", None)?;
/// #
/// # Ok(())
/// # }
/// ```
pub struct HmacDrbg {
    k: Block,
    v: Block,
    hmac: HmacFn,
    algorithm: HashAlgorithm,
    rounds: u64,
    reseed_itr: u64,
}

/// Builder class for allocating `HmacDrbg` instances.
///
/// When no entropy is supplied the built instance is uninitialized,
/// and the nonce and personalization info are ignored.
///
/// # Example
/// ```
/// use fairdraw::{hash::HashAlgorithm, hmac_drbg::HmacBuilder};
///
/// # use fairdraw::error::Error;
/// #
/// # fn main() -> Result<(), Error> {
/// #
/// let entropy = [7u8; 32];
/// let mut drbg = HmacBuilder::new(HashAlgorithm::Sha512)
///     .entropy(&entropy)
///     .nonce(b"round-42")
///     .personal(b"keno")
///     .reseed_interval(1 << 20)
///     .build()?;
/// assert_eq!(1, drbg.rounds());
/// #
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HmacBuilder<'a> {
    algorithm: HashAlgorithm,
    entropy: Option<&'a [u8]>,
    nonce: Option<&'a [u8]>,
    personal: Option<&'a [u8]>,
    reseed_itr: u64,
}

impl<'a> HmacBuilder<'a> {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            entropy: None,
            nonce: None,
            personal: None,
            reseed_itr: MAX_RESEED_INTERVAL,
        }
    }

    /// Specify the entropy used to instantiate the HMAC_DRBG
    /// instance.
    pub fn entropy(mut self, entropy: &'a [u8]) -> HmacBuilder<'a> {
        self.entropy = Some(entropy);
        self
    }

    /// Specify the nonce mixed into the seed material.
    ///
    /// By default, this value is empty.
    pub fn nonce(mut self, nonce: &'a [u8]) -> HmacBuilder<'a> {
        self.nonce = Some(nonce);
        self
    }

    /// Specify the personalization info mixed into the seed material.
    ///
    /// By default, this value is empty.
    pub fn personal(mut self, personal: &'a [u8]) -> HmacBuilder<'a> {
        self.personal = Some(personal);
        self
    }

    /// Specify the reseed interval for the HMAC_DRBG instance.
    ///
    /// This interval is the number of generate calls allowed before
    /// [`HmacDrbg::generate`] fails with [`Error::ReseedRequired`].
    ///
    /// By default, this value is 2^48.
    ///
    /// # Panics
    ///
    /// The reseed interval cannot exceed 2^48. This function panics
    /// if the max threshold is exceeded.
    pub fn reseed_interval(mut self, reseed_itr: u64) -> HmacBuilder<'a> {
        if reseed_itr > MAX_RESEED_INTERVAL {
            panic!("HmacDrbg: reseed interval exceeds max interval")
        }
        self.reseed_itr = reseed_itr;
        self
    }

    /// Build and return a new [`HmacDrbg`] instance.
    ///
    /// # Error
    ///
    /// Returns [`Error::InsufficientEntropy`] when entropy is given
    /// but the seed material is shorter than the algorithm minimum.
    pub fn build(self) -> Result<HmacDrbg, Error> {
        let mut drbg = HmacDrbg::new(self.algorithm);
        drbg.reseed_itr = self.reseed_itr;
        if let Some(entropy) = self.entropy {
            drbg.instantiate(entropy, self.nonce, self.personal)?;
        }
        Ok(drbg)
    }
}

impl Default for HmacDrbg {
    fn default() -> Self {
        Self::new(HashAlgorithm::default())
    }
}

impl Drop for HmacDrbg {
    fn drop(&mut self) {
        self.uninstantiate();
    }
}

impl HmacDrbg {
    /// Create an uninitialized instance. It must be instantiated
    /// before it can generate.
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            k: [0x00; MAX_DIGEST_LEN],
            v: [0x01; MAX_DIGEST_LEN],
            hmac: algorithm.hmac_fn(),
            algorithm,
            rounds: 0,
            reseed_itr: MAX_RESEED_INTERVAL,
        }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Number of generate calls since the last (re)seed, plus one.
    /// Zero means the instance was never instantiated.
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    pub fn is_instantiated(&self) -> bool {
        self.rounds != 0
    }

    /// Wipe `K` and `V` and return to the uninitialized state. The
    /// algorithm and reseed interval are kept, so the instance can be
    /// instantiated again.
    pub fn uninstantiate(&mut self) {
        self.k.zeroize();
        self.v.zeroize();
        self.rounds = 0;
    }

    /// Seed the instance from `entropy || nonce || personal`,
    /// discarding any previous state.
    ///
    /// # Error
    ///
    /// Returns [`Error::InsufficientEntropy`] if the seed material is
    /// shorter than [`HashAlgorithm::min_entropy`].
    pub fn instantiate(
        &mut self,
        entropy: &[u8],
        nonce: Option<&[u8]>,
        personal: Option<&[u8]>,
    ) -> Result<(), Error> {
        let nonce = nonce.unwrap_or(&[]);
        let personal = personal.unwrap_or(&[]);
        let mut seed_input = Zeroizing::new(Vec::<u8>::with_capacity(
            entropy.len() + nonce.len() + personal.len(),
        ));
        seed_input.extend_from_slice(entropy);
        seed_input.extend_from_slice(nonce);
        seed_input.extend_from_slice(personal);
        self.check_seed(&seed_input)?;

        self.k = [0x00; MAX_DIGEST_LEN];
        self.v = [0x01; MAX_DIGEST_LEN];
        self.update(&seed_input);
        self.rounds = 1;
        Ok(())
    }

    /// Mix `entropy || additional` into the current state and reset
    /// the round counter.
    ///
    /// # Error
    ///
    /// Returns [`Error::NotInitialized`] before the first
    /// `instantiate`, and [`Error::InsufficientEntropy`] if the seed
    /// material is too short.
    pub fn reseed(&mut self, entropy: &[u8], additional: Option<&[u8]>) -> Result<(), Error> {
        if self.rounds == 0 {
            return Err(Error::NotInitialized);
        }
        let add_bytes = additional.unwrap_or(&[]);
        let mut seed_input =
            Zeroizing::new(Vec::<u8>::with_capacity(entropy.len() + add_bytes.len()));
        seed_input.extend_from_slice(entropy);
        seed_input.extend_from_slice(add_bytes);
        self.check_seed(&seed_input)?;

        self.update(&seed_input);
        self.rounds = 1;
        Ok(())
    }

    /// Return exactly `bytes_requested` random bytes. Optional
    /// `additional` data is mixed into the state before and after
    /// the output is produced.
    ///
    /// # Error
    ///
    /// Returns [`Error::NotInitialized`] before the first
    /// `instantiate`, and [`Error::ReseedRequired`] once the reseed
    /// interval is exhausted.
    pub fn generate(
        &mut self,
        bytes_requested: usize,
        additional: Option<&[u8]>,
    ) -> Result<Vec<u8>, Error> {
        let mut bytes = vec![0u8; bytes_requested];
        self.fill_bytes(&mut bytes, additional)?;
        Ok(bytes)
    }

    /// Fill the slice `bytes` with random data. This is one generate
    /// call: it has exactly the effect of
    /// [`generate`](HmacDrbg::generate) with `bytes.len()`.
    pub fn fill_bytes(&mut self, bytes: &mut [u8], additional: Option<&[u8]>) -> Result<(), Error> {
        if self.rounds == 0 {
            return Err(Error::NotInitialized);
        }
        if self.rounds > self.reseed_itr {
            return Err(Error::ReseedRequired);
        }

        let add_bytes = additional.unwrap_or(&[]);
        if !add_bytes.is_empty() {
            self.update(add_bytes);
        }
        let len = self.algorithm.digest_len();
        for blk in bytes.chunks_mut(len) {
            self.v = (self.hmac)(&self.k[..len], &[&self.v[..len]]);
            blk.copy_from_slice(&self.v[0..blk.len()]);
        }
        // Always runs, even without additional input.
        self.update(add_bytes);
        self.rounds += 1;
        Ok(())
    }

    fn check_seed(&self, seed_input: &[u8]) -> Result<(), Error> {
        let min = self.algorithm.min_entropy();
        if seed_input.len() < min {
            return Err(Error::InsufficientEntropy {
                got: seed_input.len(),
                min,
            });
        }
        Ok(())
    }

    fn update(&mut self, data: &[u8]) {
        let len = self.algorithm.digest_len();
        self.k = (self.hmac)(&self.k[..len], &[&self.v[..len], &[0x00], data]);
        self.v = (self.hmac)(&self.k[..len], &[&self.v[..len]]);
        if data.is_empty() {
            return;
        }
        self.k = (self.hmac)(&self.k[..len], &[&self.v[..len], &[0x01], data]);
        self.v = (self.hmac)(&self.k[..len], &[&self.v[..len]]);
    }
}
