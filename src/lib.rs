// SPDX-License-Identifier: MIT

//! Deterministic, unbiased random draws for provably-fair games of
//! chance, built on the HMAC_DRBG defined by NIST [SP 800-90A
//! Rev. 1](https://csrc.nist.gov/publications/detail/sp/800-90a/rev-1/final).
//!
//! A round is fixed by a secret server seed, a client seed and a
//! nonce. The triple is hashed into entropy input, the entropy input
//! seeds an [`HmacDrbg`](hmac_drbg::HmacDrbg), and the generator's
//! byte stream is turned into unbiased integers by rejection
//! sampling. Once the server seed is revealed anybody can replay the
//! round and check its outcome.
//!
//! # Quick Example
//!
//! ```
//! use fairdraw::{
//!     draw::{self, Replacement},
//!     entropy::{self, RoundSeeds},
//!     hash::HashAlgorithm,
//! };
//!
//! # use fairdraw::error::Error;
//! #
//! # fn main() -> Result<(),Error> {
//! #
//! let server_seed = entropy::generate_server_seed()?;
//! let seeds = RoundSeeds::new(&server_seed, "1234567890", 0);
//!
//! // Ten rows of a tower game: 3 mines among 5 cells per row.
//! let mut drbg = seeds.drbg(HashAlgorithm::Sha256)?;
//! let rows = draw::generate_random_draws(&mut drbg, 1, 5, 3, 10, Replacement::Without)?;
//!
//! // Replaying the round gives the same rows.
//! let mut replay = seeds.drbg(HashAlgorithm::Sha256)?;
//! assert_eq!(
//!     rows,
//!     draw::generate_random_draws(&mut replay, 1, 5, 3, 10, Replacement::Without)?
//! );
//! #
//! # Ok(())
//! # }
//! ```
//!
//! An instance may also be constructed by hand using the
//! [`HmacBuilder`](hmac_drbg::HmacBuilder) class, which allows the
//! caller to pick the hash algorithm, nonce, personalization info and
//! reseed interval.
//!
#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod draw;
pub mod entropy;
pub mod error;
pub mod hash;
pub mod hmac_drbg;
pub mod sample;

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod shared;
