//! Monetary amounts with exact decimal arithmetic.
//!
//! Amounts accumulate exactly (no binary floating point) and are only rounded
//! to cents when a value is shown or stored on a record.

use core::iter::Sum;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places amounts are rounded to.
pub const CENT_SCALE: u32 = 2;

/// A currency-agnostic monetary amount.
///
/// Two amounts are equal when their values are equal (`4.90 == 4.9`).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Build an amount from an integer number of cents (`499` -> `4.99`).
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, CENT_SCALE))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Round half away from zero to cents, the way receipts display amounts.
    pub fn rounded(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(CENT_SCALE, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Unit price times quantity (exact).
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// `rate` percent of this amount (exact, unrounded).
    pub fn percent(self, rate: Decimal) -> Self {
        Self(self.0 * rate / Decimal::ONE_HUNDRED)
    }

    /// Divide evenly by `count`; `None` when `count` is zero.
    pub fn checked_div_count(self, count: u64) -> Option<Self> {
        if count == 0 {
            return None;
        }
        self.0.checked_div(Decimal::from(count)).map(Self)
    }

    /// Share of `whole` this amount represents, in percent (exact).
    ///
    /// Returns zero when `whole` is zero.
    pub fn share_of(self, whole: Money) -> Decimal {
        if whole.is_zero() {
            return Decimal::ZERO;
        }
        self.0 * Decimal::ONE_HUNDRED / whole.0
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2}", self.rounded().0)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}
