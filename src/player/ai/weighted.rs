use crate::core::GameError;
use rand::Rng;

/// Exponential variate with the given mean, via the inverse CDF.
pub fn sample_exponential<R: Rng + ?Sized>(rng: &mut R, mean: f64) -> f64 {
    let u: f64 = rng.gen();
    -mean * (1.0 - u).ln()
}

/// Picks one item with probability proportional to its weight.
///
/// Weights must be non-negative; the pool fails with `EmptyPool` when it is
/// empty or carries no weight at all.
pub fn weighted_choice<T: Clone, R: Rng + ?Sized>(
    rng: &mut R,
    pool: &[(T, f64)],
) -> Result<T, GameError> {
    let total: f64 = pool.iter().map(|(_, w)| w.max(0.0)).sum();
    if pool.is_empty() || !total.is_finite() || total <= 0.0 {
        return Err(GameError::EmptyPool);
    }

    let mut r = rng.gen::<f64>() * total;
    for (item, weight) in pool {
        let weight = weight.max(0.0);
        if r < weight {
            return Ok(item.clone());
        }
        r -= weight;
    }

    // rounding can leave r just above the last bucket
    pool.iter()
        .rev()
        .find(|(_, w)| *w > 0.0)
        .map(|(item, _)| item.clone())
        .ok_or(GameError::EmptyPool)
}
