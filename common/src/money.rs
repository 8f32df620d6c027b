//! [`Money`]-related definitions.

use std::fmt;

use rust_decimal::{prelude::ToPrimitive as _, Decimal, RoundingStrategy};

use crate::define_kind;

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Divides this [`Money`] by the provided `divisor`, keeping the
    /// [`Currency`].
    ///
    /// [`None`] is returned if the `divisor` is zero or the result overflows.
    #[must_use]
    pub fn per(self, divisor: Decimal) -> Option<Self> {
        Some(Self {
            amount: self.amount.checked_div(divisor)?,
            currency: self.currency,
        })
    }

    /// Returns this [`Money`] rounded to whole units of its [`Currency`].
    #[must_use]
    pub fn whole(self) -> Self {
        Self {
            amount: self.amount.round_dp_with_strategy(
                0,
                RoundingStrategy::MidpointAwayFromZero,
            ),
            currency: self.currency,
        }
    }

    /// Formats the whole part of this [`Money`] with `,` thousands
    /// separators, like `9,000,000`.
    #[must_use]
    pub fn grouped(self) -> String {
        let whole = self.whole().amount;
        let digits = whole.abs().trunc().to_string();
        let mut out =
            String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if whole.is_sign_negative() && !whole.is_zero() {
            out.push('-');
        }
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        out
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        match amount.is_integer().then(|| amount.to_i128()).flatten() {
            Some(int) => write!(f, "{int}{currency}"),
            None => write!(f, "{amount}{currency}"),
        }
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "US Dollar."]
        Usd => "USD",

        #[doc = "Euro."]
        Eur => "EUR",

        #[doc = "Russian Ruble."]
        Rub => "RUB",
    }
}

impl Currency {
    /// Returns the sign used to display amounts in this [`Currency`].
    #[must_use]
    pub const fn sign(self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Rub => "₽",
        }
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::{Currency, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn rub(s: &str) -> Money {
        Money {
            amount: decimal(s),
            currency: Currency::Rub,
        }
    }

    #[test]
    fn to_string() {
        assert_eq!(rub("150000.00").to_string(), "150000RUB");
        assert_eq!(rub("150000.5").to_string(), "150000.5RUB");
    }

    #[test]
    fn per() {
        assert_eq!(rub("9000000").per(decimal("60")), Some(rub("150000")));
        assert_eq!(rub("9000000").per(Decimal::ZERO), None);
    }

    #[test]
    fn grouped() {
        assert_eq!(rub("9000000").grouped(), "9,000,000");
        assert_eq!(rub("150000").grouped(), "150,000");
        assert_eq!(rub("999.5").grouped(), "1,000");
        assert_eq!(rub("12").grouped(), "12");
        assert_eq!(rub("0.2").grouped(), "0");
        assert_eq!(rub("-1234567").grouped(), "-1,234,567");
    }
}
