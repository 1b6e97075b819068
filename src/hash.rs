// SPDX-License-Identifier: MIT

//! The closed set of hash functions an [`HmacDrbg`] may be built on.
//!
//! [`HmacDrbg`]: crate::hmac_drbg::HmacDrbg
use crate::error::Error;

use alloc::vec::Vec;
use core::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};
use hmac::{digest::KeyInit, Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};

/// Largest digest length of any supported algorithm.
pub const MAX_DIGEST_LEN: usize = 64;

/// A digest buffer. Only the first `digest_len()` bytes are
/// meaningful.
pub(crate) type Block = [u8; MAX_DIGEST_LEN];

/// HMAC over the concatenation of `parts`, keyed with `key`.
pub(crate) type HmacFn = fn(key: &[u8], parts: &[&[u8]]) -> Block;

/// Hash algorithm used by the HMAC primitive.
///
/// Each variant carries its digest length and the minimum seed
/// material length (half the digest length, the security strength in
/// bytes) accepted by `instantiate` and `reseed`.
///
/// | algorithm  | digest length | min entropy |
/// |------------|---------------|-------------|
/// | `sha1`     | 20            | 10          |
/// | `sha224`   | 28            | 14          |
/// | `sha256`   | 32            | 16          |
/// | `sha384`   | 48            | 24          |
/// | `sha512`   | 64            | 32          |
/// | `sha3-224` | 28            | 14          |
/// | `sha3-256` | 32            | 16          |
/// | `sha3-384` | 48            | 24          |
/// | `sha3-512` | 64            | 32          |
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha1,
    Sha224,
    #[default]
    Sha256,
    Sha384,
    Sha512,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
}

fn hmac_with<M>(key: &[u8], parts: &[&[u8]]) -> Block
where
    M: Mac + KeyInit,
{
    let mut mac = <M as KeyInit>::new_from_slice(key).expect("HMAC can take key of any size");
    for part in parts {
        mac.update(part);
    }
    let tag = mac.finalize().into_bytes();
    let mut out = [0u8; MAX_DIGEST_LEN];
    out[..tag.len()].copy_from_slice(&tag);
    out
}

impl HashAlgorithm {
    /// Every supported algorithm.
    pub const ALL: [HashAlgorithm; 9] = [
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha224,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
        HashAlgorithm::Sha3_224,
        HashAlgorithm::Sha3_256,
        HashAlgorithm::Sha3_384,
        HashAlgorithm::Sha3_512,
    ];

    /// Digest length in bytes. This is also the length of the DRBG
    /// `K` and `V` buffers.
    pub const fn digest_len(self) -> usize {
        match self {
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha224 | HashAlgorithm::Sha3_224 => 28,
            HashAlgorithm::Sha256 | HashAlgorithm::Sha3_256 => 32,
            HashAlgorithm::Sha384 | HashAlgorithm::Sha3_384 => 48,
            HashAlgorithm::Sha512 | HashAlgorithm::Sha3_512 => 64,
        }
    }

    /// Minimum seed material length in bytes.
    pub const fn min_entropy(self) -> usize {
        self.digest_len() / 2
    }

    /// Canonical lower-case name, as accepted by [`str::parse`].
    pub const fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha224 => "sha224",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Sha3_224 => "sha3-224",
            HashAlgorithm::Sha3_256 => "sha3-256",
            HashAlgorithm::Sha3_384 => "sha3-384",
            HashAlgorithm::Sha3_512 => "sha3-512",
        }
    }

    /// Compute `HMAC(key, data)` and return the full digest.
    ///
    /// ```
    /// use fairdraw::hash::HashAlgorithm;
    ///
    /// let tag = HashAlgorithm::Sha384.mac(b"key", b"message");
    /// assert_eq!(48, tag.len());
    /// ```
    pub fn mac(self, key: &[u8], data: &[u8]) -> Vec<u8> {
        let block = (self.hmac_fn())(key, &[data]);
        block[..self.digest_len()].to_vec()
    }

    pub(crate) fn hmac_fn(self) -> HmacFn {
        match self {
            HashAlgorithm::Sha1 => hmac_with::<Hmac<Sha1>>,
            HashAlgorithm::Sha224 => hmac_with::<Hmac<Sha224>>,
            HashAlgorithm::Sha256 => hmac_with::<Hmac<Sha256>>,
            HashAlgorithm::Sha384 => hmac_with::<Hmac<Sha384>>,
            HashAlgorithm::Sha512 => hmac_with::<Hmac<Sha512>>,
            HashAlgorithm::Sha3_224 => hmac_with::<Hmac<Sha3_224>>,
            HashAlgorithm::Sha3_256 => hmac_with::<Hmac<Sha3_256>>,
            HashAlgorithm::Sha3_384 => hmac_with::<Hmac<Sha3_384>>,
            HashAlgorithm::Sha3_512 => hmac_with::<Hmac<Sha3_512>>,
        }
    }
}

impl Display for HashAlgorithm {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HashAlgorithm::ALL
            .into_iter()
            .find(|alg| alg.name() == s)
            .ok_or(Error::UnknownAlgorithm)
    }
}
