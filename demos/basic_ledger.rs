//! Basic ledger usage example

use bigdecimal::BigDecimal;
use ledger_service::utils::MemoryStore;
use ledger_service::{LedgerError, TransactionManager};
use std::str::FromStr;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Ledger Service - Basic Example\n");

    let manager = TransactionManager::new(MemoryStore::new());
    let account_id = Uuid::new_v4();

    // 1. First interaction provisions the account
    let account = manager.get_account(account_id).await?;
    println!("Opened account {} with balance {}", account.id, account.balance);

    // 2. Deposits are truncated to the cent
    for amount in ["10.555", "20.6", "4.999"] {
        let txn = manager
            .add_deposit(account_id, &BigDecimal::from_str(amount)?)
            .await?;
        println!("  deposit {:>8} -> recorded {}", amount, txn.amount);
    }

    // 3. Withdrawals are checked against the balance
    let txn = manager
        .add_withdrawal(account_id, &BigDecimal::from_str("10.71")?)
        .await?;
    println!("  withdrawal 10.71 -> recorded {}", txn.amount);

    match manager
        .add_withdrawal(account_id, &BigDecimal::from(1000))
        .await
    {
        Err(LedgerError::NotEnoughFunds { balance, requested }) => {
            println!("  withdrawal {requested} refused, balance is {balance}");
        }
        other => println!("  unexpected result: {:?}", other),
    }

    // 4. History, most recent first, two at a time
    println!("\nHistory:");
    let mut page = 0;
    loop {
        let result = manager.get_transactions(account_id, page, 2).await?;
        for txn in &result.transactions {
            println!(
                "  [page {}] {} {:>8} at {}",
                page, txn.transaction_type, txn.amount, txn.timestamp
            );
        }
        if !result.has_more() {
            break;
        }
        page = result.next_page;
    }

    let account = manager.get_account(account_id).await?;
    println!("\nFinal balance: {}", account.balance);

    Ok(())
}
