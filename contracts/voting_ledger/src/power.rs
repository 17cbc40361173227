//! Quadratic voting power.
//!
//! ```text
//! power(stake) = floor(sqrt(stake))
//! ```
//!
//! Computed with integer Newton iteration so every caller reproduces the same
//! rounding. No floating point is involved.

/// Integer square root, rounded toward zero.
///
/// Returns 0 for `n <= 0`.
pub fn isqrt(n: i128) -> i128 {
    if n <= 0 {
        return 0;
    }
    // (n + 1) / 2 without overflowing at i128::MAX
    let mut x = n;
    let mut y = n / 2 + n % 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

/// Voting power granted by a stake balance.
pub fn voting_power(stake: i128) -> i128 {
    isqrt(stake)
}
