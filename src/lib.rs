pub mod cli;
pub mod core;
pub mod store;

use crate::cli::accounts::FormInput;
use crate::core::account::AccountId;
use crate::core::chart::aggregate;
use crate::core::config::AppConfig;
use crate::core::geometry::Focus;
use crate::core::ledger::{AccountStore, LoadStatus};
use anyhow::Result;
use tracing::{debug, info, warn};

pub enum AppCommand {
    /// Show the account grid.
    List,
    /// Show the total and chart, selecting slices in the given order.
    Overview { select: Vec<usize> },
    /// Add an account.
    Add(FormInput),
    /// Change an account; unset fields keep their current value.
    Edit { id: String, input: FormInput },
    /// Delete an account.
    Delete { id: String },
    /// List the names offered when adding an account.
    Institutions,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Ipon starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    if let AppCommand::Institutions = command {
        println!(
            "{}",
            cli::accounts::display_institutions(&config.institutions)
        );
        return Ok(());
    }

    let persistence = store::open_persistence(&config)?;
    let (mut store, status) = AccountStore::open(persistence).await;
    if let LoadStatus::Recovered(e) = &status {
        warn!(error = %e, "Saved accounts could not be restored");
        eprintln!(
            "{}",
            cli::ui::style_text(
                &format!("Warning: {e}. Starting with no accounts."),
                cli::ui::StyleType::Warning
            )
        );
    }

    let result = execute(&mut store, &config, command);
    store.close().await;
    result
}

fn execute(store: &mut AccountStore, config: &AppConfig, command: AppCommand) -> Result<()> {
    match command {
        AppCommand::List => {
            println!(
                "{}",
                cli::accounts::display_accounts(
                    store.accounts(),
                    &config.palette,
                    &config.currency_symbol()
                )
            );
        }
        AppCommand::Overview { select } => {
            let breakdown = aggregate(store.accounts(), &config.palette);
            let mut focus = Focus::default();
            for index in select {
                focus.select(index);
            }
            println!(
                "{}",
                cli::overview::display_overview(&breakdown, focus, &config.currency_symbol())
            );
        }
        AppCommand::Add(input) => {
            let id = cli::accounts::add_account(store, &config.institutions, input)?;
            info!(%id, "Account added");
            println!("Added account {id}");
        }
        AppCommand::Edit { id, input } => {
            let id = AccountId::new(id);
            cli::accounts::edit_account(store, &config.institutions, &id, input)?;
            println!("Updated account {id}");
        }
        AppCommand::Delete { id } => {
            let removed = cli::accounts::delete_account(store, &AccountId::new(id))?;
            println!("Deleted \"{}\"", removed.name);
        }
        AppCommand::Institutions => {}
    }
    Ok(())
}
