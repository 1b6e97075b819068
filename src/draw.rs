// SPDX-License-Identifier: MIT

//! Draws of integers built from repeated uniform samples.
//!
//! Every function takes the generator by `&mut` so consecutive draws
//! consume consecutive, non-overlapping parts of its stream. Given the
//! same seeded [`HmacDrbg`] and the same sequence of calls, the output
//! is reproducible bit for bit.
use crate::{error::Error, hmac_drbg::HmacDrbg, sample::generate_uniform_u32};

use alloc::{collections::BTreeMap, vec::Vec};

/// Selected integers in the order they were drawn.
pub type Draw = Vec<u32>;

/// Populations up to this size are shuffled in a dense array.
const DENSE_LIMIT: u64 = 1 << 16;

/// Whether a value may appear more than once within one draw.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Replacement {
    /// Values may repeat.
    With,
    /// Values are pairwise distinct.
    #[default]
    Without,
}

/// Draw `selection` independent values from `[min, max]`. Values may
/// repeat, and `selection` may exceed the size of the range.
pub fn draw_with_replacement(
    drbg: &mut HmacDrbg,
    min: u32,
    max: u32,
    selection: usize,
) -> Result<Draw, Error> {
    (0..selection)
        .map(|_| generate_uniform_u32(drbg, min, max))
        .collect()
}

/// Draw `selection` distinct values from `[min, max]` with a partial
/// Fisher–Yates shuffle, returned in the order they were fixed.
///
/// # Error
///
/// Returns [`Error::InvalidRange`] if `selection` is larger than the
/// range. An empty range (`min == max + 1`) only admits an empty
/// selection.
///
/// # Example
///
/// ```
/// use fairdraw::{draw, hash::HashAlgorithm, hmac_drbg::HmacBuilder};
///
/// # use fairdraw::error::Error;
/// #
/// # fn main() -> Result<(), Error> {
/// #
/// let mut drbg = HmacBuilder::new(HashAlgorithm::Sha256)
///     .entropy(&[42u8; 32])
///     .build()?;
/// let mines = draw::draw_without_replacement(&mut drbg, 1, 25, 5)?;
/// assert_eq!(5, mines.len());
/// #
/// # Ok(())
/// # }
/// ```
pub fn draw_without_replacement(
    drbg: &mut HmacDrbg,
    min: u32,
    max: u32,
    selection: usize,
) -> Result<Draw, Error> {
    // Negative when `min > max + 1`, which no selection fits.
    let size = i64::from(max) - i64::from(min) + 1;
    if i64::try_from(selection).map_or(true, |selection| selection > size) {
        return Err(Error::InvalidRange(
            "range too small for desired selection size",
        ));
    }
    if selection == 0 {
        return Ok(Draw::new());
    }
    let size = size as u64;
    if size <= DENSE_LIMIT {
        shuffle_dense(drbg, min, max, selection)
    } else {
        shuffle_sparse(drbg, min, size, selection)
    }
}

fn shuffle_dense(
    drbg: &mut HmacDrbg,
    min: u32,
    max: u32,
    selection: usize,
) -> Result<Draw, Error> {
    let mut population: Vec<u32> = (min..=max).collect();
    let size = population.len();
    for i in 0..selection {
        let j = i + generate_uniform_u32(drbg, 0, (size - i - 1) as u32)? as usize;
        population.swap(i, j);
    }
    population.truncate(selection);
    Ok(population)
}

// Same swaps as `shuffle_dense`, but only displaced positions are
// stored.
fn shuffle_sparse(
    drbg: &mut HmacDrbg,
    min: u32,
    size: u64,
    selection: usize,
) -> Result<Draw, Error> {
    let mut displaced: BTreeMap<u64, u32> = BTreeMap::new();
    let value_at = |displaced: &BTreeMap<u64, u32>, pos: u64| {
        displaced
            .get(&pos)
            .copied()
            .unwrap_or(min + pos as u32)
    };
    let mut draw = Vec::with_capacity(selection);
    for i in 0..selection as u64 {
        let j = i + u64::from(generate_uniform_u32(drbg, 0, (size - i - 1) as u32)?);
        let picked = value_at(&displaced, j);
        let replaced = value_at(&displaced, i);
        displaced.remove(&i);
        displaced.insert(j, replaced);
        draw.push(picked);
    }
    Ok(draw)
}

/// Produce `draws` draws of `selections` values each from
/// `[min, max]`, one after the other on the same generator.
///
/// # Example
///
/// A keno round: one draw of 20 distinct numbers out of 80.
///
/// ```
/// use fairdraw::{
///     draw::{self, Replacement},
///     entropy::RoundSeeds,
///     hash::HashAlgorithm,
/// };
///
/// # use fairdraw::error::Error;
/// #
/// # fn main() -> Result<(), Error> {
/// #
/// let seeds = RoundSeeds::new("server seed", "client seed", 0);
/// let mut drbg = seeds.drbg(HashAlgorithm::Sha256)?;
/// let keno = draw::generate_random_draws(&mut drbg, 1, 80, 20, 1, Replacement::Without)?;
/// assert_eq!(1, keno.len());
/// assert_eq!(20, keno[0].len());
/// #
/// # Ok(())
/// # }
/// ```
pub fn generate_random_draws(
    drbg: &mut HmacDrbg,
    min: u32,
    max: u32,
    selections: usize,
    draws: usize,
    replacement: Replacement,
) -> Result<Vec<Draw>, Error> {
    (0..draws)
        .map(|_| match replacement {
            Replacement::With => draw_with_replacement(drbg, min, max, selections),
            Replacement::Without => draw_without_replacement(drbg, min, max, selections),
        })
        .collect()
}
