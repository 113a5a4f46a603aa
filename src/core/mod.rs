//! Account ledger and chart derivation

pub mod account;
pub mod chart;
pub mod config;
pub mod error;
pub mod form;
pub mod format;
pub mod geometry;
pub mod ledger;
pub mod log;
pub mod persistence;

// Re-export main types for cleaner imports
pub use account::{Account, AccountId, AccountKind, is_credit_card_type};
pub use chart::{Breakdown, ChartSlice, aggregate};
pub use error::{PersistenceError, ValidationError};
pub use geometry::{Focus, FocusedSlice, Quadrant, label_quadrant};
pub use ledger::{AccountStore, LoadStatus};
pub use persistence::Persistence;
