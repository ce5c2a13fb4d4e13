//! In-memory storage implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::traits::*;
use crate::types::*;

#[derive(Debug, Default)]
struct Data {
    accounts: HashMap<Uuid, Account>,
    // Insertion order per account
    transactions: HashMap<Uuid, Vec<Transaction>>,
}

/// In-memory ledger store for development, tests and the reference server.
///
/// Accounts and transaction logs live behind one lock so a transaction and
/// its balance change are always observed together. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<Data>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accounts currently held
    pub fn account_count(&self) -> LedgerResult<usize> {
        Ok(self.read()?.accounts.len())
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) -> LedgerResult<()> {
        let mut data = self.write()?;
        data.accounts.clear();
        data.transactions.clear();
        Ok(())
    }

    fn read(&self) -> LedgerResult<RwLockReadGuard<'_, Data>> {
        self.data
            .read()
            .map_err(|_| LedgerError::Storage("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> LedgerResult<RwLockWriteGuard<'_, Data>> {
        self.data
            .write()
            .map_err(|_| LedgerError::Storage("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn get_account(&self, account_id: Uuid) -> LedgerResult<Account> {
        self.read()?
            .accounts
            .get(&account_id)
            .cloned()
            .ok_or(LedgerError::AccountNotFound(account_id))
    }

    async fn save_account(&self, account: &Account) -> LedgerResult<()> {
        self.write()?.accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn save_transaction(
        &self,
        account_id: Uuid,
        transaction: &Transaction,
    ) -> LedgerResult<()> {
        let mut data = self.write()?;

        let account = data
            .accounts
            .get_mut(&account_id)
            .ok_or(LedgerError::AccountNotFound(account_id))?;
        account.balance += &transaction.amount;

        data.transactions
            .entry(account_id)
            .or_default()
            .push(transaction.clone());

        Ok(())
    }

    async fn get_transactions(
        &self,
        account_id: Uuid,
        page: usize,
        limit: usize,
    ) -> LedgerResult<TransactionPage> {
        if limit == 0 {
            return Err(LedgerError::Validation(
                "page limit must be greater than zero".to_string(),
            ));
        }

        let data = self.read()?;
        let Some(log) = data.transactions.get(&account_id) else {
            return Ok(TransactionPage::empty());
        };

        // Newest appended first, then a stable sort so equal timestamps keep that order
        let mut sorted: Vec<&Transaction> = log.iter().rev().collect();
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let total = sorted.len();
        let start = page.saturating_mul(limit).min(total);
        let end = start.saturating_add(limit).min(total);

        let transactions = sorted[start..end].iter().map(|&t| t.clone()).collect();
        let next_page = if end < total { page + 1 } else { 0 };

        Ok(TransactionPage {
            transactions,
            next_page,
        })
    }
}
