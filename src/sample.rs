// SPDX-License-Identifier: MIT

//! Unbiased bounded integers drawn from an [`HmacDrbg`].
use crate::{error::Error, hmac_drbg::HmacDrbg};

/// 2^32, the size of the space a 4-byte draw covers.
const SPACE: u64 = 1 << 32;

/// Read one `u32` from a single 4-byte generate call, little-endian.
pub fn next_u32(drbg: &mut HmacDrbg) -> Result<u32, Error> {
    let mut buf = [0u8; 4];
    drbg.fill_bytes(&mut buf, None)?;
    Ok(u32::from_le_bytes(buf))
}

/// Return a uniformly distributed integer in the inclusive range
/// `[min, max]`.
///
/// Values at or above the largest multiple of the range size below
/// 2^32 are rejected and redrawn, so there is no modulo bias. A
/// rejected draw still consumes one generate call. Fewer than two
/// generate calls are needed on average for any range.
///
/// A range of a single value returns `min` without touching the
/// generator.
///
/// # Error
///
/// Returns [`Error::InvalidRange`] if `min > max`, and any error
/// from [`HmacDrbg::generate`].
///
/// # Example
///
/// ```
/// use fairdraw::{hash::HashAlgorithm, hmac_drbg::HmacBuilder, sample};
///
/// # use fairdraw::error::Error;
/// #
/// # fn main() -> Result<(), Error> {
/// #
/// let mut drbg = HmacBuilder::new(HashAlgorithm::Sha256)
///     .entropy(&[42u8; 32])
///     .build()?;
/// let die = sample::generate_uniform_u32(&mut drbg, 1, 6)?;
/// assert!((1..=6).contains(&die));
/// #
/// # Ok(())
/// # }
/// ```
pub fn generate_uniform_u32(drbg: &mut HmacDrbg, min: u32, max: u32) -> Result<u32, Error> {
    if min > max {
        return Err(Error::InvalidRange("min must be <= max"));
    }
    let range = u64::from(max - min) + 1;
    if range == 1 {
        return Ok(min);
    }
    let threshold = SPACE - (SPACE % range);
    loop {
        let value = u64::from(next_u32(drbg)?);
        if value < threshold {
            return Ok(min + (value % range) as u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::Error,
        hash::HashAlgorithm,
        hmac_drbg::{HmacBuilder, HmacDrbg},
        sample::{generate_uniform_u32, next_u32},
    };
    use alloc::vec;

    const ENTROPY: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

    fn drbg() -> HmacDrbg {
        let entropy = hex::decode(ENTROPY).unwrap();
        HmacBuilder::new(HashAlgorithm::Sha256)
            .entropy(&entropy)
            .build()
            .unwrap()
    }

    #[test]
    fn next_u32_is_little_endian() -> Result<(), Error> {
        let mut a = drbg();
        let mut b = drbg();
        let bytes = a.generate(4, None)?;
        let expected = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        assert_eq!(expected, next_u32(&mut b)?);
        Ok(())
    }

    #[test]
    fn full_range_takes_raw_values() -> Result<(), Error> {
        let mut a = drbg();
        let mut b = drbg();
        for _ in 0..8 {
            assert_eq!(next_u32(&mut a)?, generate_uniform_u32(&mut b, 0, u32::MAX)?);
        }
        assert_eq!(a.rounds(), b.rounds());
        Ok(())
    }

    #[test]
    fn degenerate_range_consumes_nothing() -> Result<(), Error> {
        let mut drbg = drbg();
        drbg.generate(3, None)?;
        let rounds = drbg.rounds();
        for k in [0, 1, 7, 1 << 31, u32::MAX] {
            assert_eq!(k, generate_uniform_u32(&mut drbg, k, k)?);
        }
        assert_eq!(rounds, drbg.rounds());
        Ok(())
    }

    #[test]
    fn degenerate_range_on_uninitialized() {
        let mut drbg = HmacDrbg::default();
        assert_eq!(Ok(5), generate_uniform_u32(&mut drbg, 5, 5));
        assert_eq!(Err(Error::NotInitialized), generate_uniform_u32(&mut drbg, 5, 6));
    }

    #[test]
    fn invalid_range() {
        let mut drbg = drbg();
        assert_eq!(
            Err(Error::InvalidRange("min must be <= max")),
            generate_uniform_u32(&mut drbg, 10, 9)
        );
        assert_eq!(1, drbg.rounds());
    }

    #[test]
    fn within_bounds() -> Result<(), Error> {
        let mut drbg = drbg();
        for (min, max) in [(0, 1), (1, 6), (0, 36), (1000, 1003), (u32::MAX - 2, u32::MAX)] {
            for _ in 0..200 {
                let value = generate_uniform_u32(&mut drbg, min, max)?;
                assert!(min <= value && value <= max);
            }
        }
        Ok(())
    }

    #[test]
    fn first_values() -> Result<(), Error> {
        let entropy = HashAlgorithm::Sha256.mac(
            b"8f1e5a3b9c0d2e7f4a6b1c3d5e7f9a0b2c4d6e8f0a1b3c5d7e9f1a2b4c6d8e0f",
            b"1234567890:0",
        );
        let mut drbg = HmacBuilder::new(HashAlgorithm::Sha256)
            .entropy(&entropy)
            .build()?;
        assert_eq!(2484799032, generate_uniform_u32(&mut drbg, 0, u32::MAX)?);
        assert_eq!(3577101914, generate_uniform_u32(&mut drbg, 0, u32::MAX)?);
        assert_eq!(3290697622, generate_uniform_u32(&mut drbg, 0, u32::MAX)?);
        assert_eq!(4, drbg.rounds());
        Ok(())
    }

    // Chi-square against the 0.1% critical value for R - 1 degrees
    // of freedom.
    #[test]
    fn no_modulo_bias() -> Result<(), Error> {
        for (range, critical) in [(3u32, 13.816), (5, 18.467), (7, 22.458)] {
            let mut drbg = drbg();
            let samples = range * 2000;
            let mut counts = vec![0u32; range as usize];
            for _ in 0..samples {
                counts[generate_uniform_u32(&mut drbg, 0, range - 1)? as usize] += 1;
            }
            let expected = f64::from(samples) / f64::from(range);
            let chi_square: f64 = counts
                .iter()
                .map(|&c| (f64::from(c) - expected) * (f64::from(c) - expected) / expected)
                .sum();
            assert!(chi_square < critical, "range {range}: {chi_square}");
        }
        Ok(())
    }

    // Just above 2^31 rejects almost half of all draws, the worst
    // case.
    #[test]
    fn rejection_is_bounded() -> Result<(), Error> {
        let mut drbg = drbg();
        let samples = 2000;
        for _ in 0..samples {
            let value = generate_uniform_u32(&mut drbg, 0, 1 << 31)?;
            assert!(value <= 1 << 31);
        }
        let calls = drbg.rounds() - 1;
        assert!(calls >= samples);
        assert!(calls < 2 * samples + samples / 10);
        Ok(())
    }
}
