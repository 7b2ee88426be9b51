// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Small integer helpers on element orders.
//!
//! Orders of group elements are modest, so trial division is plenty.

/// Exponent of the prime `p` in `n`. Returns 0 for `n == 0`.
pub fn valuation(mut n: u64, p: u64) -> u32 {
    debug_assert!(p >= 2);
    if n == 0 {
        return 0;
    }
    let mut k = 0;
    while n % p == 0 {
        n /= p;
        k += 1;
    }
    k
}

/// Split `n > 0` as `2^k * m` with `m` odd, returning `(k, m)`.
pub fn split_two_power(n: u64) -> (u32, u64) {
    if n == 0 {
        return (0, 0);
    }
    let k = n.trailing_zeros();
    (k, n >> k)
}

/// Prime factorization of `n` as `(prime, exponent)` pairs, ascending.
pub fn factor(mut n: u64) -> Vec<(u64, u32)> {
    let mut factors = Vec::new();
    if n < 2 {
        return factors;
    }
    let mut p = 2u64;
    while p.saturating_mul(p) <= n {
        if n % p == 0 {
            let mut e = 0;
            while n % p == 0 {
                n /= p;
                e += 1;
            }
            factors.push((p, e));
        }
        p += if p == 2 { 1 } else { 2 };
    }
    if n > 1 {
        factors.push((n, 1));
    }
    factors
}

/// Omega(n): number of prime factors counted with multiplicity.
pub fn prime_omega(n: u64) -> u32 {
    factor(n).iter().map(|&(_, e)| e).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valuation() {
        assert_eq!(valuation(48, 2), 4);
        assert_eq!(valuation(48, 3), 1);
        assert_eq!(valuation(48, 5), 0);
        assert_eq!(valuation(1, 2), 0);
    }

    #[test]
    fn test_split_two_power() {
        assert_eq!(split_two_power(1), (0, 1));
        assert_eq!(split_two_power(12), (2, 3));
        assert_eq!(split_two_power(64), (6, 1));
        assert_eq!(split_two_power(21), (0, 21));
    }

    #[test]
    fn test_factor() {
        assert_eq!(factor(1), vec![]);
        assert_eq!(factor(360), vec![(2, 3), (3, 2), (5, 1)]);
        assert_eq!(factor(97), vec![(97, 1)]);
        assert_eq!(factor(2 * 1_000_003), vec![(2, 1), (1_000_003, 1)]);
    }

    #[test]
    fn test_prime_omega() {
        assert_eq!(prime_omega(1), 0);
        assert_eq!(prime_omega(2), 1);
        assert_eq!(prime_omega(4), 2);
        assert_eq!(prime_omega(12), 3);
        assert_eq!(prime_omega(30), 3);
    }
}
