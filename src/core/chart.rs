//! Derives chart data from the account list.
//!
//! Everything here is a pure function of its inputs: the same accounts and
//! palette always give the same [`Breakdown`].
use crate::core::account::{Account, AccountId};
use crate::core::config::Palette;
use crate::core::format::format_currency;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// One wedge of the chart, backed by a nonzero-balance account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSlice {
    pub account_id: AccountId,
    pub name: String,
    /// Signed balance of the account, negative for amounts owed.
    pub balance: Decimal,
    /// Absolute balance; the size of the wedge.
    pub value: Decimal,
    /// Share of the total, rounded to a whole percent on its own.
    pub percentage: u32,
    /// Position in the palette, counted over slices only.
    pub color_index: usize,
    pub color: String,
}

impl ChartSlice {
    pub fn is_owed(&self) -> bool {
        self.balance.is_sign_negative()
    }

    /// Compact label shown on the wedge, e.g. `"1,000\n(56%)"`.
    pub fn label_text(&self) -> String {
        format!(
            "{}\n({}%)",
            format_currency(self.balance, None, false),
            self.percentage
        )
    }
}

/// Total balance magnitude plus the slices that make it up.
///
/// Percentages are rounded independently and may not add up to exactly 100.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Breakdown {
    pub total: Decimal,
    pub slices: Vec<ChartSlice>,
}

impl Breakdown {
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn slice(&self, index: usize) -> Option<&ChartSlice> {
        self.slices.get(index)
    }
}

/// Sum of absolute balances over every account, saturating at
/// [`Decimal::MAX`].
pub fn total_balance(accounts: &[Account]) -> Decimal {
    accounts
        .iter()
        .map(Account::magnitude)
        .fold(Decimal::ZERO, |total, value| {
            total.checked_add(value).unwrap_or(Decimal::MAX)
        })
}

/// `value / total` as a whole percent, rounding halves away from zero.
/// Zero when `total` is zero.
pub fn percentage_of(value: Decimal, total: Decimal) -> u32 {
    if total <= Decimal::ZERO {
        return 0;
    }
    // value never exceeds total, so the ratio stays within [0, 1]
    (value / total * Decimal::ONE_HUNDRED)
        .min(Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}

/// Builds the chart breakdown for `accounts`, in list order.
///
/// Zero-balance accounts count toward nothing and get no slice, so they do
/// not use up a palette color either.
pub fn aggregate(accounts: &[Account], palette: &Palette) -> Breakdown {
    let total = total_balance(accounts);
    let slices = accounts
        .iter()
        .filter(|account| !account.balance.is_zero())
        .enumerate()
        .map(|(index, account)| {
            let value = account.magnitude();
            ChartSlice {
                account_id: account.id.clone(),
                name: account.name.clone(),
                balance: account.balance,
                value,
                percentage: percentage_of(value, total),
                color_index: index % palette.len(),
                color: palette.color(index).to_string(),
            }
        })
        .collect();

    Breakdown { total, slices }
}
