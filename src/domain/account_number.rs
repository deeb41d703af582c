use std::collections::HashSet;

use rand::Rng;

/// Inclusive bounds of the 8-digit account number space.
pub const ACCOUNT_NUMBER_MIN: u32 = 10_000_000;
pub const ACCOUNT_NUMBER_MAX: u32 = 99_999_999;

/// Draws a fresh account number by rejection sampling: candidates come
/// uniformly from the 8-digit range and are redrawn while they collide with
/// `existing`.
///
/// Termination is probabilistic, not bounded. There is no retry cap; the
/// liveness assumption is that the store stays many orders of magnitude
/// smaller than the ~9e7 candidate space. Numbers are lookup keys, not
/// secrets, so no unpredictability beyond the process RNG is claimed.
pub fn next<R: Rng + ?Sized>(rng: &mut R, existing: &HashSet<u32>) -> u32 {
    loop {
        let candidate = rng.gen_range(ACCOUNT_NUMBER_MIN..=ACCOUNT_NUMBER_MAX);
        if !existing.contains(&candidate) {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generates_numbers_in_the_8_digit_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let existing = HashSet::new();
        for _ in 0..100 {
            let n = next(&mut rng, &existing);
            assert!((ACCOUNT_NUMBER_MIN..=ACCOUNT_NUMBER_MAX).contains(&n));
        }
    }

    #[test]
    fn rejects_candidates_already_in_the_store() {
        // Same seed twice: the second draw starts from the same candidate,
        // which is now taken, so the sampler must move past it.
        let first = next(&mut StdRng::seed_from_u64(7), &HashSet::new());

        let mut existing = HashSet::new();
        existing.insert(first);
        let second = next(&mut StdRng::seed_from_u64(7), &existing);

        assert_ne!(second, first);
        assert!(!existing.contains(&second));
    }

    #[test]
    fn never_returns_a_number_present_in_the_existing_set() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut existing = HashSet::new();
        for _ in 0..500 {
            let n = next(&mut rng, &existing);
            assert!(existing.insert(n), "duplicate account number {n}");
        }
    }
}
