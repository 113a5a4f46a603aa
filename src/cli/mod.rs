//! Terminal presentation of the ledger

pub mod accounts;
pub mod overview;
pub mod setup;
pub mod ui;
