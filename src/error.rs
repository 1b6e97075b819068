// SPDX-License-Identifier: MIT

//! Error type shared by the generator, the sampler and the draw engine.
use alloc::string::{String, ToString};
use core::fmt::Display;

/// Errors returned by this crate.
///
/// `InsufficientEntropy` and `InvalidRange` are caller misuse and
/// only go away with different inputs. `ReseedRequired` is
/// recoverable by calling
/// [`HmacDrbg::reseed`](crate::hmac_drbg::HmacDrbg::reseed).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The entropy source failed to produce random data.
    #[error("entropy error: {0}")]
    Entropy(String),

    /// Seed material is shorter than the algorithm minimum.
    #[error("not enough entropy: got {got} bytes, need at least {min}")]
    InsufficientEntropy { got: usize, min: usize },

    /// `generate` or `reseed` was called before `instantiate`.
    #[error("DRBG not initialized")]
    NotInitialized,

    /// The reseed interval has been exhausted.
    #[error("reseed is required")]
    ReseedRequired,

    /// Sampler bounds or selection count are invalid.
    #[error("invalid range: {0}")]
    InvalidRange(&'static str),

    /// The hash algorithm name is not in the supported table.
    #[error("unknown hash algorithm")]
    UnknownAlgorithm,
}

impl Error {
    /// Create a new error by wrapping an underlying entropy source
    /// error.
    ///
    /// # Example
    /// ```
    /// use fairdraw::error::Error;
    ///
    /// fn fill_bytes(bytes: &mut [u8]) -> Result<(), Error> {
    ///    getrandom::getrandom(bytes).map_err(Error::entropy)
    /// }
    /// ```
    pub fn entropy<E>(error: E) -> Self
    where
        E: Display,
    {
        Self::Entropy(error.to_string())
    }
}
