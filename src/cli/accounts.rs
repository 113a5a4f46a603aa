use super::ui;
use crate::core::account::{Account, AccountId, AccountKind};
use crate::core::config::{OTHER_INSTITUTION, Palette};
use crate::core::form::AccountForm;
use crate::core::ledger::AccountStore;
use anyhow::{Result, anyhow};
use comfy_table::Cell;

/// Field overrides entered for an add or edit.
#[derive(Debug, Default, Clone)]
pub struct FormInput {
    pub institution: Option<String>,
    pub custom_name: Option<String>,
    pub balance: Option<String>,
}

impl FormInput {
    fn apply(self, form: &mut AccountForm) {
        match (self.institution, self.custom_name) {
            (Some(institution), custom_name) => {
                form.selection = institution;
                if let Some(custom_name) = custom_name {
                    form.custom_name = custom_name;
                }
            }
            // A custom name on its own implies "Other".
            (None, Some(custom_name)) => {
                form.selection = OTHER_INSTITUTION.to_string();
                form.custom_name = custom_name;
            }
            (None, None) => {}
        }
        if let Some(balance) = self.balance {
            form.balance_text = balance;
        }
    }
}

/// Renders the account grid. Card colors follow each account's position in
/// the full list, zero balances included.
pub fn display_accounts(accounts: &[Account], palette: &Palette, symbol: &str) -> String {
    if accounts.is_empty() {
        return format!(
            "{}\n{}",
            ui::style_text("No accounts added yet.", ui::StyleType::Subtle),
            ui::style_text(
                "Use `ipon add` to start.",
                ui::StyleType::Subtle
            )
        );
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(""),
        ui::header_cell("Account"),
        ui::header_cell("Balance"),
        ui::header_cell("Id"),
    ]);

    for (index, account) in accounts.iter().enumerate() {
        let (_, icon) = AccountKind::from(account.name.as_str()).display_info();
        table.add_row(vec![
            ui::swatch_cell(palette.color(index)),
            Cell::new(format!("{icon} {}", account.name.to_uppercase())),
            ui::amount_cell(account.balance, symbol),
            Cell::new(account.id.as_str()),
        ]);
    }

    format!(
        "{}\n{table}",
        ui::style_text("My Accounts", ui::StyleType::Title)
    )
}

/// Lists the names offered by the account form.
pub fn display_institutions(institutions: &[String]) -> String {
    institutions
        .iter()
        .map(|name| {
            if name == OTHER_INSTITUTION {
                format!(
                    "{name} {}",
                    ui::style_text("(enter a custom name)", ui::StyleType::Subtle)
                )
            } else {
                name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Submits a new-account form.
pub fn add_account(
    store: &mut AccountStore,
    institutions: &[String],
    input: FormInput,
) -> Result<AccountId> {
    let mut form = AccountForm::new(institutions);
    input.apply(&mut form);
    form.validate()?;
    let id = store.add(form.resolved_name(), &form.balance_text)?;
    Ok(id)
}

/// Submits an edit form pre-filled from the existing account.
pub fn edit_account(
    store: &mut AccountStore,
    institutions: &[String],
    id: &AccountId,
    input: FormInput,
) -> Result<()> {
    let account = store
        .get(id)
        .ok_or_else(|| anyhow!("No account with id {id}"))?;
    let mut form = AccountForm::for_account(account, institutions);
    input.apply(&mut form);
    form.validate()?;
    store.update(id, form.resolved_name(), &form.balance_text)?;
    Ok(())
}

/// Deletes an account, reporting an unknown id as an error.
pub fn delete_account(store: &mut AccountStore, id: &AccountId) -> Result<Account> {
    let account = store
        .get(id)
        .cloned()
        .ok_or_else(|| anyhow!("No account with id {id}"))?;
    store.remove(id);
    Ok(account)
}
