//! Non-deterministic sampling helpers, the free-running companions to the
//! seeded generation in [`crate::seed`]. Callers pass their own `Rng` so a
//! session can still pin the stream with a seeded generator.

use rand::Rng;

use crate::error::{LumicError, LumicResult};

/// Uniform integer in `min..=max`.
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> LumicResult<i64> {
    if min > max {
        return Err(LumicError::invalid_input(format!(
            "random_int range is inverted ({min} > {max})"
        )));
    }
    Ok(rng.gen_range(min..=max))
}

/// `len` uniform integers in `min..=max`.
pub fn random_array<R: Rng + ?Sized>(
    rng: &mut R,
    len: usize,
    min: i64,
    max: i64,
) -> LumicResult<Vec<i64>> {
    (0..len).map(|_| random_int(rng, min, max)).collect()
}

/// Samples `sample_size` elements from `pool` with replacement, optionally
/// rejecting immediate repeats. Repeat prevention is skipped when every pool
/// element is equal, since no non-repeating draw exists.
pub fn randomize<R, T>(
    rng: &mut R,
    pool: &[T],
    sample_size: usize,
    prevent_consecutive_repeats: bool,
) -> LumicResult<Vec<T>>
where
    R: Rng + ?Sized,
    T: Clone + PartialEq,
{
    if pool.is_empty() {
        return Err(LumicError::invalid_input(
            "randomize requires a non-empty pool",
        ));
    }
    let prevent = prevent_consecutive_repeats && pool.iter().any(|x| *x != pool[0]);

    let mut result = Vec::with_capacity(sample_size);
    let mut last: Option<&T> = None;
    for _ in 0..sample_size {
        let pick = loop {
            let candidate = &pool[rng.gen_range(0..pool.len())];
            if !prevent || last != Some(candidate) {
                break candidate;
            }
        };
        result.push(pick.clone());
        last = Some(pick);
    }
    Ok(result)
}
