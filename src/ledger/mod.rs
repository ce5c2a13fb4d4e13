//! Ledger module containing per-account locking and transaction processing

pub mod account;
pub mod transaction;

pub use account::*;
pub use transaction::*;
