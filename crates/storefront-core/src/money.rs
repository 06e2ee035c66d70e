//! # Money Module
//!
//! Integer money for the storefront.
//!
//! Every amount is an `i64` in the currency's minor unit. For IDR there is no
//! minor unit in practice, so `Money::from_minor(150_000)` reads as Rp150.000.
//! Floating point never touches a price: tax and discounts are computed in
//! basis points with `i128` intermediates.
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_minor(100_000);
//! let line = price.multiply_quantity(3);
//! assert_eq!(line.amount(), 300_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

/// A monetary value in the smallest currency unit.
///
/// Signed so that savings, refunds and deltas can be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a value from minor units.
    #[inline]
    pub const fn from_minor(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the raw amount in minor units.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax on this amount, rounding half up.
    ///
    /// ## Implementation
    /// `(amount * bps + 5000) / 10000`, in `i128` so large order totals
    /// cannot overflow.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    /// use storefront_core::types::TaxRate;
    ///
    /// let tax = Money::from_minor(1_000_000).calculate_tax(TaxRate::from_bps(1100));
    /// assert_eq!(tax.amount(), 110_000);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let tax = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_minor(tax as i64)
    }

    /// Multiplies a unit price by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Returns how much cheaper `self` is than `reference`, as whole percent.
    ///
    /// Used for the "-25%" badge on discounted products. Returns 0 when there
    /// is no discount or the reference is not positive.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let sale = Money::from_minor(75_000);
    /// assert_eq!(sale.discount_percent_from(Money::from_minor(100_000)), 25);
    /// ```
    pub fn discount_percent_from(&self, reference: Money) -> u32 {
        if reference.0 <= 0 || self.0 >= reference.0 {
            return 0;
        }
        let saved = (reference.0 - self.0) as i128;
        ((saved * 100 + reference.0 as i128 / 2) / reference.0 as i128) as u32
    }
}

/// Writes `value` with a dot between each group of three digits.
///
/// ```
/// use storefront_core::money::group_thousands;
/// assert_eq!(group_thousands(1_110_000), "1.110.000");
/// ```
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Groups thousands with dots, the way IDR prices are written: `1.110.000`.
///
/// Currency symbols are applied by the app's config, not here.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grouped = group_thousands(self.0.unsigned_abs());
        if self.0 < 0 {
            write!(f, "-{}", grouped)
        } else {
            write!(f, "{}", grouped)
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rounds_half_up() {
        // 12_345 * 11% = 1_357.95
        let tax = Money::from_minor(12_345).calculate_tax(TaxRate::from_bps(1100));
        assert_eq!(tax.amount(), 1_358);
    }

    #[test]
    fn test_zero_tax_rate() {
        let tax = Money::from_minor(99_000).calculate_tax(TaxRate::zero());
        assert!(tax.is_zero());
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300].iter().map(|a| Money::from_minor(*a)).sum();
        assert_eq!(total.amount(), 600);
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Money::from_minor(1_110_000).to_string(), "1.110.000");
        assert_eq!(Money::from_minor(999).to_string(), "999");
        assert_eq!(Money::from_minor(0).to_string(), "0");
        assert_eq!(Money::from_minor(-15_000).to_string(), "-15.000");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(100), "100");
        assert_eq!(group_thousands(1_000), "1.000");
        assert_eq!(group_thousands(12_345_678), "12.345.678");
    }

    #[test]
    fn test_discount_percent() {
        let price = Money::from_minor(199_000);
        assert_eq!(price.discount_percent_from(Money::from_minor(249_000)), 20);
        assert_eq!(price.discount_percent_from(price), 0);
        assert_eq!(price.discount_percent_from(Money::zero()), 0);
    }

    #[test]
    fn test_arithmetic() {
        let mut a = Money::from_minor(500);
        a += Money::from_minor(250);
        a -= Money::from_minor(100);
        assert_eq!(a, Money::from_minor(650));
        assert!((Money::zero() - a).is_negative());
    }
}
