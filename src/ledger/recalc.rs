//! Balance recalculation
//!
//! Pure fold from the transaction log to per-account balances:
//! `initial + income - expense - investment + transfers_in - transfers_out`,
//! over each account's own transactions only. The result fully overwrites
//! whatever balance was stored before, so prior corruption self-heals on the
//! next recompute. O(accounts + transactions), no side effects.

use std::collections::HashMap;

use crate::models::{Account, AccountId, Money, Transaction};

/// Compute a fresh balance for every account
///
/// Transactions referencing an account that no longer exists (orphaned
/// transfer counterparts) are skipped; they belong to no surviving balance.
pub fn recalculated_balances(
    accounts: &[Account],
    transactions: &[Transaction],
) -> HashMap<AccountId, Money> {
    let mut balances: HashMap<AccountId, Money> = accounts
        .iter()
        .map(|account| (account.id, account.initial_balance))
        .collect();

    for txn in transactions {
        if let Some(balance) = balances.get_mut(&txn.account_id) {
            *balance += txn.signed_amount();
        }
    }

    balances
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use chrono::{TimeZone, Utc};

    fn txn(
        tx_type: TransactionType,
        cents: i64,
        account_id: AccountId,
        day: u32,
    ) -> Transaction {
        Transaction::new(
            tx_type,
            Money::from_cents(cents),
            account_id,
            Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_formula_over_all_five_types() {
        let account = Account::new("Cash", "Cash", "", Money::from_cents(10000));
        let id = account.id;

        let transactions = vec![
            txn(TransactionType::Income, 5000, id, 1),
            txn(TransactionType::Expense, 1500, id, 2),
            txn(TransactionType::Investment, 2000, id, 3),
            txn(TransactionType::TransferIn, 700, id, 4),
            txn(TransactionType::TransferOut, 300, id, 5),
        ];

        let balances = recalculated_balances(&[account], &transactions);
        // 10000 + 5000 - 1500 - 2000 + 700 - 300
        assert_eq!(balances[&id].cents(), 11900);
    }

    #[test]
    fn test_own_transactions_only() {
        let a = Account::new("A", "Bank", "", Money::zero());
        let b = Account::new("B", "Bank", "", Money::zero());
        let (a_id, b_id) = (a.id, b.id);

        let transactions = vec![
            txn(TransactionType::Income, 1000, a_id, 1),
            txn(TransactionType::Income, 2000, b_id, 1),
        ];

        let balances = recalculated_balances(&[a, b], &transactions);
        assert_eq!(balances[&a_id].cents(), 1000);
        assert_eq!(balances[&b_id].cents(), 2000);
    }

    #[test]
    fn test_no_transactions_yields_initial_balance() {
        let account = Account::new("Savings", "Bank", "", Money::from_cents(4200));
        let id = account.id;

        let balances = recalculated_balances(&[account], &[]);
        assert_eq!(balances[&id].cents(), 4200);
    }

    #[test]
    fn test_stored_balance_is_ignored() {
        // Prior corruption of the derived field must not leak through
        let mut account = Account::new("Cash", "Cash", "", Money::zero());
        account.balance = Money::from_cents(999_999);
        let id = account.id;

        let transactions = vec![txn(TransactionType::Income, 100, id, 1)];

        let balances = recalculated_balances(&[account], &transactions);
        assert_eq!(balances[&id].cents(), 100);
    }

    #[test]
    fn test_orphaned_transactions_skipped() {
        let account = Account::new("Cash", "Cash", "", Money::zero());
        let id = account.id;
        let ghost = AccountId::new();

        let transactions = vec![
            txn(TransactionType::Income, 500, id, 1),
            txn(TransactionType::TransferIn, 9999, ghost, 1),
        ];

        let balances = recalculated_balances(&[account], &transactions);
        assert_eq!(balances.len(), 1);
        assert_eq!(balances[&id].cents(), 500);
    }

    #[test]
    fn test_balance_can_go_negative() {
        let account = Account::new("Cash", "Cash", "", Money::zero());
        let id = account.id;

        let transactions = vec![txn(TransactionType::Expense, 2500, id, 1)];

        let balances = recalculated_balances(&[account], &transactions);
        assert_eq!(balances[&id].cents(), -2500);
    }
}
