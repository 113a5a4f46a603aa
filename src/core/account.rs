//! Account records and the name-based rules attached to them.
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

const CREDIT_CARD_MARKER: &str = "credit card";

/// Opaque account identifier. Assigned once at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of a time-derived id, if this id is one.
    pub(crate) fn as_millis(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A named holding with a signed balance.
///
/// The balance is non-negative unless [`is_credit_card_type`] holds for the
/// name, in which case a negative value is an amount owed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub balance: Decimal,
}

impl Account {
    /// Absolute balance, the amount this account contributes to the chart.
    pub fn magnitude(&self) -> Decimal {
        self.balance.abs()
    }
}

/// Whether an account with this name may carry a negative balance.
pub fn is_credit_card_type(name: &str) -> bool {
    name.to_lowercase().contains(CREDIT_CARD_MARKER)
}

/// Broad classification used to pick an icon for an account card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountKind {
    Bank,
    Cash,
    Card,
    EWallet,
    Wallet,
}

impl From<&str> for AccountKind {
    // Order matters: "GCash" matches "cash" before the e-wallet rule is reached.
    fn from(name: &str) -> Self {
        let lower = name.to_lowercase();
        if ["bank", "bdo", "bpi"].iter().any(|k| lower.contains(k)) {
            AccountKind::Bank
        } else if lower.contains("cash") {
            AccountKind::Cash
        } else if lower.contains("card") {
            AccountKind::Card
        } else if ["gcash", "maya"].iter().any(|k| lower.contains(k)) {
            AccountKind::EWallet
        } else {
            AccountKind::Wallet
        }
    }
}

impl AccountKind {
    /// Returns display name and emoji for the kind
    pub fn display_info(&self) -> (&'static str, &'static str) {
        match self {
            AccountKind::Bank => ("Bank", "🏦"),
            AccountKind::Cash => ("Cash", "💵"),
            AccountKind::Card => ("Card", "💳"),
            AccountKind::EWallet => ("E-wallet", "📱"),
            AccountKind::Wallet => ("Wallet", "👛"),
        }
    }
}
