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
//! Seeds, and the entropy input derived from them.
//!
//! A round is identified by a secret server seed, a client seed and a
//! nonce. The server seed is the only place true randomness enters;
//! everything derived from the triple is deterministic.
use crate::{
    error::Error,
    hash::HashAlgorithm,
    hmac_drbg::{HmacBuilder, HmacDrbg},
};

use alloc::{format, string::String, vec::Vec};
use zeroize::Zeroizing;

/// Number of random bytes in a server seed.
pub const SERVER_SEED_LEN: usize = 32;

/// Represents a source of cryptographically secure random data. Its
/// primary use-case is to create server seeds.
pub trait Entropy {
    /// Fill `bytes` with random data from the entropy source.
    ///
    /// # Error
    ///
    /// Returns an error if there is a problem with the underlying
    /// entropy source.
    fn fill_bytes(&mut self, bytes: &mut [u8]) -> Result<(), Error>;
}

/// An entropy source that draws random data from the host operating
/// system.
///
/// ```
/// use fairdraw::entropy::{OsEntropy, Entropy};
///
/// # use fairdraw::error::Error;
/// #
/// # fn main() -> Result<(),Error> {
/// #
/// let mut entropy = OsEntropy::default();
/// let mut random_data = [0u8; 32];
/// entropy.fill_bytes(&mut random_data)?;
/// #
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct OsEntropy {}

impl OsEntropy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Entropy for OsEntropy {
    /// Fill `bytes` with random data from the operating system using
    /// [`getrandom`](getrandom::getrandom).
    ///
    /// # Error
    ///
    /// Returns any error from `getrandom`.
    fn fill_bytes(&mut self, bytes: &mut [u8]) -> Result<(), Error> {
        getrandom::getrandom(bytes).map_err(Error::entropy)
    }
}

/// Return a new server seed: 32 bytes from the operating system,
/// hex-encoded into 64 characters.
///
/// # Error
///
/// Returns an error when the operating system cannot provide random
/// data.
pub fn generate_server_seed() -> Result<String, Error> {
    server_seed_from(&mut OsEntropy::new())
}

/// Same as [`generate_server_seed`], reading from `entropy`.
pub fn server_seed_from<E>(entropy: &mut E) -> Result<String, Error>
where
    E: Entropy,
{
    let mut seed = Zeroizing::new([0u8; SERVER_SEED_LEN]);
    entropy.fill_bytes(&mut seed[..])?;
    Ok(hex::encode(&seed[..]))
}

/// Compute `HMAC(server_seed, "{client_seed}:{nonce}")` with
/// `algorithm`, the entropy input for one round.
///
/// ```
/// use fairdraw::{entropy::create_entropy_input, hash::HashAlgorithm};
///
/// let entropy = create_entropy_input("server", "client", 7, HashAlgorithm::Sha256);
/// assert_eq!(32, entropy.len());
/// ```
pub fn create_entropy_input(
    server_seed: &str,
    client_seed: &str,
    nonce: u64,
    algorithm: HashAlgorithm,
) -> Vec<u8> {
    let message = format!("{client_seed}:{nonce}");
    algorithm.mac(server_seed.as_bytes(), message.as_bytes())
}

/// The seeds identifying one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSeeds<'a> {
    pub server_seed: &'a str,
    pub client_seed: &'a str,
    pub nonce: u64,
}

impl<'a> RoundSeeds<'a> {
    pub fn new(server_seed: &'a str, client_seed: &'a str, nonce: u64) -> Self {
        Self {
            server_seed,
            client_seed,
            nonce,
        }
    }

    /// See [`create_entropy_input`].
    pub fn entropy_input(&self, algorithm: HashAlgorithm) -> Vec<u8> {
        create_entropy_input(self.server_seed, self.client_seed, self.nonce, algorithm)
    }

    /// Build an [`HmacDrbg`] instantiated with this round's entropy
    /// input. The same algorithm is used for both.
    pub fn drbg(&self, algorithm: HashAlgorithm) -> Result<HmacDrbg, Error> {
        let entropy = Zeroizing::new(self.entropy_input(algorithm));
        HmacBuilder::new(algorithm).entropy(&entropy).build()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        entropy::{
            create_entropy_input, generate_server_seed, server_seed_from, Entropy, RoundSeeds,
        },
        error::Error,
        hash::HashAlgorithm,
        hmac_drbg::HmacBuilder,
    };

    const SERVER_SEED: &str = "8f1e5a3b9c0d2e7f4a6b1c3d5e7f9a0b2c4d6e8f0a1b3c5d7e9f1a2b4c6d8e0f";
    const CLIENT_SEED: &str = "1234567890";

    struct CountingEntropy {
        next: u8,
    }

    impl Entropy for CountingEntropy {
        fn fill_bytes(&mut self, bytes: &mut [u8]) -> Result<(), Error> {
            for b in bytes.iter_mut() {
                *b = self.next;
                self.next = self.next.wrapping_add(1);
            }
            Ok(())
        }
    }

    struct BrokenEntropy;

    impl Entropy for BrokenEntropy {
        fn fill_bytes(&mut self, _bytes: &mut [u8]) -> Result<(), Error> {
            Err(Error::entropy("device unplugged"))
        }
    }

    #[test]
    fn entropy_input_known_answers() {
        let expected = [
            "74c63c6d9335292f5cedcb285ab58dfa09aee187",
            "39f33f2a09457fff06031a9e3c7be3789f6b5f5004d523141ff59ab9",
            "dfbcc04741fa691b3914faf73332825040cfbf7aa1bc5b18692c3df305635f79",
            "2de5c3a8c7702c4088da932de1666f547027fbd98e1514840cefd1920a3df88d550cec4feb6924ae6b34ee3acbc9e594",
            "40a2016a85e79dfc34c62a160b973474565a5ebf3237b408ae327a4fde9a441397e2389c8d98363871141748c0fc8de1c63293634d00d4d6c348ab079e20cc5e",
            "0bc8678f41445e3a25cdb59067617f9404f6aced3ecdfcd1f6e285ca",
            "13a8538dad4d1bdc0ae880a6e6abe601003fc1f88c41f7b960271432db9d69d2",
            "bc6f16199ba971c8f74cec6e87cb1731013a3e93638337c1231e155fb2246240fc136ba18999f10aa67952a7e06c7b1c",
            "f9e3f4fa0e26d90c33674c5b3d89d7e0ca85a1ffe1aaa35234c6c1c55142bcb49e9cadd4346d322d6100e1fe95f618702e1021434294090ca2352fe3e180687d",
        ];
        for (algorithm, digest) in HashAlgorithm::ALL.into_iter().zip(expected) {
            let entropy = create_entropy_input(SERVER_SEED, CLIENT_SEED, 0, algorithm);
            assert_eq!(hex::decode(digest).unwrap(), entropy, "{algorithm}");
        }
    }

    #[test]
    fn entropy_input_message_format() {
        let entropy = create_entropy_input("s", "c", u64::MAX, HashAlgorithm::Sha256);
        assert_eq!(
            HashAlgorithm::Sha256.mac(b"s", b"c:18446744073709551615"),
            entropy
        );
        assert_ne!(
            create_entropy_input("s", "c", 1, HashAlgorithm::Sha256),
            create_entropy_input("s", "c", 2, HashAlgorithm::Sha256)
        );
    }

    #[test]
    fn round_seeds_drbg() -> Result<(), Error> {
        let seeds = RoundSeeds::new(SERVER_SEED, CLIENT_SEED, 0);
        let entropy = seeds.entropy_input(HashAlgorithm::Sha256);
        let mut a = seeds.drbg(HashAlgorithm::Sha256)?;
        let mut b = HmacBuilder::new(HashAlgorithm::Sha256)
            .entropy(&entropy)
            .build()?;
        assert_eq!(1, a.rounds());
        assert_eq!(a.generate(40, None)?, b.generate(40, None)?);
        Ok(())
    }

    #[test]
    fn server_seed_encoding() -> Result<(), Error> {
        let seed = server_seed_from(&mut CountingEntropy { next: 0 })?;
        assert_eq!(
            "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
            seed
        );
        Ok(())
    }

    #[test]
    fn server_seed_entropy_failure() {
        assert_eq!(
            Err(Error::Entropy("device unplugged".into())),
            server_seed_from(&mut BrokenEntropy)
        );
    }

    #[test]
    fn os_server_seed() -> Result<(), Error> {
        let a = generate_server_seed()?;
        let b = generate_server_seed()?;
        assert_eq!(64, a.len());
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(a, b);
        Ok(())
    }
}
