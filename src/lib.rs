//! # Ledger Service
//!
//! A small account ledger tracking per-account balances and the deposits
//! and withdrawals that produced them.
//!
//! ## Features
//!
//! - **Transaction manager**: auto-provisioned accounts, floor-to-cent amount
//!   normalization and overdraft protection
//! - **Per-account serialization**: concurrent withdrawals can never overdraw
//! - **Paginated history**: transactions returned most recent first
//! - **Storage abstraction**: any backend implementing [`LedgerStore`]
//! - **HTTP boundary**: axum routes exposing the manager
//!
//! ## Quick Start
//!
//! ```rust
//! use ledger_service::{utils::MemoryStore, TransactionManager};
//! use bigdecimal::BigDecimal;
//! use std::str::FromStr;
//! use uuid::Uuid;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let manager = TransactionManager::new(MemoryStore::new());
//! let account_id = Uuid::new_v4();
//!
//! let deposit = manager
//!     .add_deposit(account_id, &BigDecimal::from_str("10.555").unwrap())
//!     .await
//!     .unwrap();
//! assert_eq!(deposit.amount, BigDecimal::from_str("10.55").unwrap());
//! # }
//! ```

pub mod api;
pub mod config;
pub mod ledger;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::AppConfig;
pub use ledger::*;
pub use traits::*;
pub use types::*;
