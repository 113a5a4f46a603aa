//! Add/edit form state and the validation applied before the ledger mutates.
use crate::core::account::{Account, is_credit_card_type};
use crate::core::config::OTHER_INSTITUTION;
use crate::core::error::ValidationError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Largest balance magnitude an account may hold.
pub const MAX_BALANCE: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Parses user-entered balance text into a decimal amount.
pub fn parse_balance(text: &str) -> Result<Decimal, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidBalance(text.to_string()));
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ValidationError::InvalidBalance(text.to_string()))
}

/// Validates a name/balance pair, returning the trimmed name and parsed balance.
pub fn validate(name: &str, balance_text: &str) -> Result<(String, Decimal), ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let balance = parse_balance(balance_text)?;
    // "-0" is stored as plain zero
    let balance = if balance.is_zero() {
        Decimal::ZERO
    } else {
        balance
    };
    if balance.abs() > MAX_BALANCE {
        return Err(ValidationError::BalanceTooLarge(balance_text.trim().to_string()));
    }
    if balance.is_sign_negative() && !is_credit_card_type(name) {
        return Err(ValidationError::NegativeBalance(name.to_string()));
    }
    Ok((name.to_string(), balance))
}

/// Contents of the add/edit account form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountForm {
    /// Selected institution, or [`OTHER_INSTITUTION`] for a custom name.
    pub selection: String,
    pub custom_name: String,
    pub balance_text: String,
}

impl AccountForm {
    /// Blank form with the first institution selected.
    pub fn new(institutions: &[String]) -> Self {
        Self {
            selection: institutions
                .first()
                .cloned()
                .unwrap_or_else(|| OTHER_INSTITUTION.to_string()),
            custom_name: String::new(),
            balance_text: String::new(),
        }
    }

    /// Form pre-filled for editing an existing account.
    pub fn for_account(account: &Account, institutions: &[String]) -> Self {
        let (selection, custom_name) = if account.name != OTHER_INSTITUTION
            && institutions.iter().any(|i| *i == account.name)
        {
            (account.name.clone(), String::new())
        } else {
            (OTHER_INSTITUTION.to_string(), account.name.clone())
        };
        Self {
            selection,
            custom_name,
            balance_text: account.balance.normalize().to_string(),
        }
    }

    pub fn is_custom(&self) -> bool {
        self.selection == OTHER_INSTITUTION
    }

    /// The account name this form would submit.
    pub fn resolved_name(&self) -> &str {
        if self.is_custom() {
            self.custom_name.trim()
        } else {
            &self.selection
        }
    }

    pub fn validate(&self) -> Result<(String, Decimal), ValidationError> {
        validate(self.resolved_name(), &self.balance_text)
    }
}
