//! Account number generation.
//!
//! Account numbers are six independently drawn decimal digits. The space is
//! small (10^6), so callers that generate numbers must run a
//! generate-and-check-exists loop against storage; this module only draws
//! candidates.

use rand::Rng;

/// Length of a generated account number.
pub const ACCOUNT_NUMBER_LEN: usize = 6;

/// Draws a candidate account number: [`ACCOUNT_NUMBER_LEN`] decimal digits,
/// each uniform over 0-9.
///
/// Pass a cryptographically secure generator (`rand::rng()` qualifies).
pub fn generate_account_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ACCOUNT_NUMBER_LEN)
        .map(|_| char::from(b'0' + rng.random_range(0u8..10)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_number_is_six_decimal_digits() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let number = generate_account_number(&mut rng);
            assert_eq!(number.len(), ACCOUNT_NUMBER_LEN);
            assert!(number.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn test_digit_distribution_is_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(42);
        let samples = 5_000;
        let mut counts = [[0u32; 10]; ACCOUNT_NUMBER_LEN];

        for _ in 0..samples {
            let number = generate_account_number(&mut rng);
            for (position, byte) in number.bytes().enumerate() {
                counts[position][usize::from(byte - b'0')] += 1;
            }
        }

        // Expected 500 per digit per position; 300..700 is far beyond any
        // plausible deviation for a uniform draw.
        for position in counts {
            for count in position {
                assert!((300..700).contains(&count), "skewed digit count: {count}");
            }
        }
    }

    #[test]
    fn test_generation_is_not_constant() {
        let mut rng = StdRng::seed_from_u64(99);
        let first = generate_account_number(&mut rng);
        let distinct = (0..50).any(|_| generate_account_number(&mut rng) != first);
        assert!(distinct);
    }
}
