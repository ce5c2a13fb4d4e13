//! Traits for storage abstraction

use async_trait::async_trait;
use uuid::Uuid;

use crate::types::*;

/// Storage abstraction for the ledger
///
/// Holds the authoritative account balances and their append-only
/// transaction logs. Any backend (in-memory, SQL, ...) can be plugged into
/// [`TransactionManager`](crate::ledger::TransactionManager) by implementing
/// these methods. Receivers are shared so one store can serve concurrent
/// callers; per-account serialization is handled by the manager.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Get an account by ID. Fails with `AccountNotFound` and never creates.
    async fn get_account(&self, account_id: Uuid) -> LedgerResult<Account>;

    /// Insert or overwrite an account record
    async fn save_account(&self, account: &Account) -> LedgerResult<()>;

    /// Append a transaction to the account's log and add its amount to the
    /// account balance as a single step
    async fn save_transaction(
        &self,
        account_id: Uuid,
        transaction: &Transaction,
    ) -> LedgerResult<()>;

    /// Get one page of the account's transactions, most recent first.
    ///
    /// `page` is zero based and selects `[page * limit, page * limit + limit)`
    /// clipped to the history; out of range windows are empty, not errors.
    async fn get_transactions(
        &self,
        account_id: Uuid,
        page: usize,
        limit: usize,
    ) -> LedgerResult<TransactionPage>;
}
