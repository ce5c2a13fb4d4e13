//! Deposit and withdrawal processing

use bigdecimal::BigDecimal;
use tracing::debug;
use uuid::Uuid;

use crate::ledger::AccountLocks;
use crate::traits::*;
use crate::types::*;
use crate::utils::validation::{normalize_amount, validate_positive_amount};

/// Transaction manager enforcing the ledger's business rules on top of a store.
///
/// Deposits create the account on first use, withdrawals never do, and a
/// withdrawal can only go through while the balance covers it. Every
/// mutation holds the account's lock from lookup to commit, so concurrent
/// withdrawals cannot both pass the funds check against the same balance.
pub struct TransactionManager<S: LedgerStore> {
    storage: S,
    locks: AccountLocks,
}

impl<S: LedgerStore> TransactionManager<S> {
    /// Create a new transaction manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            locks: AccountLocks::new(),
        }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.storage
    }

    /// Get an account, creating a zero-balance one if it doesn't exist yet
    pub async fn get_account(&self, account_id: Uuid) -> LedgerResult<Account> {
        let _guard = self.locks.lock(account_id).await;
        self.get_or_create_account(account_id).await
    }

    /// Record a deposit, creating the account if it doesn't exist yet.
    ///
    /// The amount is truncated to two decimals before it is stored.
    pub async fn add_deposit(
        &self,
        account_id: Uuid,
        amount: &BigDecimal,
    ) -> LedgerResult<Transaction> {
        validate_positive_amount(amount)?;

        let _guard = self.locks.lock(account_id).await;
        let account = self.get_or_create_account(account_id).await?;

        let deposit = Transaction::deposit(normalize_amount(amount));
        self.storage.save_transaction(account.id, &deposit).await?;

        debug!(
            account_id = %account.id,
            transaction_id = %deposit.transaction_id,
            amount = %deposit.amount,
            "deposit recorded"
        );
        Ok(deposit)
    }

    /// Record a withdrawal against an existing account.
    ///
    /// Fails with `AccountNotFound` for unknown accounts and with
    /// `NotEnoughFunds` when the truncated amount exceeds the balance; in
    /// both cases nothing is written.
    pub async fn add_withdrawal(
        &self,
        account_id: Uuid,
        amount: &BigDecimal,
    ) -> LedgerResult<Transaction> {
        validate_positive_amount(amount)?;

        // Unknown accounts are refused before a lock entry exists for them.
        // Accounts are never deleted, so the re-read under the lock succeeds.
        self.storage.get_account(account_id).await?;
        let _guard = self.locks.lock(account_id).await;
        let account = self.storage.get_account(account_id).await?;

        let amount = normalize_amount(amount);
        if account.balance < amount {
            return Err(LedgerError::NotEnoughFunds {
                balance: account.balance,
                requested: amount,
            });
        }

        let withdrawal = Transaction::withdrawal(amount);
        self.storage.save_transaction(account.id, &withdrawal).await?;

        debug!(
            account_id = %account.id,
            transaction_id = %withdrawal.transaction_id,
            amount = %withdrawal.amount,
            "withdrawal recorded"
        );
        Ok(withdrawal)
    }

    /// Get one page of an existing account's transactions, most recent first
    pub async fn get_transactions(
        &self,
        account_id: Uuid,
        page: usize,
        limit: usize,
    ) -> LedgerResult<TransactionPage> {
        self.storage.get_account(account_id).await?;
        self.storage.get_transactions(account_id, page, limit).await
    }

    // Caller must hold the account lock
    async fn get_or_create_account(&self, account_id: Uuid) -> LedgerResult<Account> {
        match self.storage.get_account(account_id).await {
            Ok(account) => Ok(account),
            Err(LedgerError::AccountNotFound(_)) => {
                let account = Account::new(account_id);
                self.storage.save_account(&account).await?;
                debug!(account_id = %account_id, "account created");
                Ok(account)
            }
            Err(e) => Err(e),
        }
    }
}
