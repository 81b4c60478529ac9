//! Ledger engine
//!
//! Owns the store; every mutation enters through here. Each operation
//! validates its input, applies the change to the in-memory collections,
//! rederives every account balance, and commits the result as one durable
//! document, so a transfer pair or a cascade delete is never half-applied.
//! Successful mutations are recorded in the audit log after the commit.
//!
//! Single-writer: callers are expected to serialize mutations. Two
//! overlapping transfers from one account could both pass the funds check
//! against the same pre-debit balance; a multi-writer port needs a
//! per-account lock around that check-then-write sequence.

pub mod recalc;

pub use recalc::recalculated_balances;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::backup::{decrypt_snapshot, encrypt_snapshot, Snapshot};
use crate::config::FintrackPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::lock::{pin_digest, AccessLock, LockState};
use crate::models::settings::keys;
use crate::models::{
    Account, AccountId, BudgetEntry, BudgetId, Category, CategoryId, CategoryKind, GoalEntry,
    GoalId, Money, Setting, Transaction, TransactionId, TransactionType,
};
use crate::storage::{seed_default_categories, Store};

/// Input for recording or editing a transaction
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub tx_type: TransactionType,
    pub amount: Money,
    pub account_id: AccountId,
    pub date: DateTime<Utc>,
    pub category: String,
    pub subcategory: String,
    pub description: String,
    pub meta: serde_json::Value,
}

impl TransactionDraft {
    /// Draft with the required fields; the rest default to empty
    pub fn new(
        tx_type: TransactionType,
        amount: Money,
        account_id: AccountId,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            tx_type,
            amount,
            account_id,
            date,
            category: String::new(),
            subcategory: String::new(),
            description: String::new(),
            meta: serde_json::Value::Null,
        }
    }

    /// Set the category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Field-level patch for editing an account
#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub bank: Option<String>,
    pub initial_balance: Option<Money>,
}

/// The two rows of one inter-account movement
#[derive(Debug, Clone)]
pub struct TransferPair {
    /// The `transfer_out` row on the source account
    pub outgoing: Transaction,
    /// The `transfer_in` row on the destination account
    pub incoming: Transaction,
}

/// The ledger engine: exclusive owner of all writes to the store
pub struct LedgerEngine {
    store: Store,
    audit: AuditLogger,
    lock: AccessLock,
}

impl LedgerEngine {
    /// Open the engine, seeding default categories on first run
    ///
    /// The session starts locked exactly when a PIN digest is stored.
    pub fn open(paths: FintrackPaths) -> LedgerResult<Self> {
        let store = Store::open(paths)?;
        if seed_default_categories(&store.categories)? {
            store.commit()?;
        }

        let audit = AuditLogger::new(store.paths().audit_log());
        let pin_present = store.settings.contains(keys::PIN_HASH)?;

        Ok(Self {
            store,
            audit,
            lock: AccessLock::new(pin_present),
        })
    }

    /// Path configuration the engine was opened with
    pub fn paths(&self) -> &FintrackPaths {
        self.store.paths()
    }

    /// The audit log of past mutations
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    // ---- Read surface ------------------------------------------------------

    /// All accounts in creation order
    pub fn accounts(&self) -> LedgerResult<Vec<Account>> {
        self.store.accounts.get_all()
    }

    /// One account by id
    pub fn account(&self, id: AccountId) -> LedgerResult<Option<Account>> {
        self.store.accounts.get(id)
    }

    /// All transactions in date order
    pub fn transactions(&self) -> LedgerResult<Vec<Transaction>> {
        self.store.transactions.get_all()
    }

    /// One account's transactions in date order
    pub fn transactions_for_account(&self, id: AccountId) -> LedgerResult<Vec<Transaction>> {
        self.store.transactions.get_by_account(id)
    }

    /// All categories, defaults first
    pub fn categories(&self) -> LedgerResult<Vec<Category>> {
        self.store.categories.get_all()
    }

    /// All settings records
    pub fn settings(&self) -> LedgerResult<Vec<Setting>> {
        self.store.settings.get_all()
    }

    /// One setting value by key
    pub fn setting(&self, key: &str) -> LedgerResult<Option<serde_json::Value>> {
        self.store.settings.get(key)
    }

    /// The budget entries stored under the `budgets` settings key
    pub fn budgets(&self) -> LedgerResult<Vec<BudgetEntry>> {
        match self.store.settings.get(keys::BUDGETS)? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    /// The goal entries stored under the `goals` settings key
    pub fn goals(&self) -> LedgerResult<Vec<GoalEntry>> {
        match self.store.settings.get(keys::GOALS)? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    // ---- Accounts ----------------------------------------------------------

    /// Create an account; `balance` starts equal to `initial_balance`
    pub fn create_account(
        &self,
        name: impl Into<String>,
        kind: impl Into<String>,
        bank: impl Into<String>,
        initial_balance: Money,
    ) -> LedgerResult<Account> {
        let account = Account::new(name, kind, bank, initial_balance);
        account
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.store.accounts.upsert(account.clone())?;
        self.recalculate()?;
        self.store.commit()?;

        self.audit.log(
            &AuditEntry::create(EntityType::Account, account.id.to_string())
                .name(account.name.clone()),
        )?;

        Ok(account)
    }

    /// Edit an account's fields in place
    ///
    /// A changed `initial_balance` flows into the derived balance through the
    /// recalculation that follows.
    pub fn update_account(&self, id: AccountId, patch: AccountPatch) -> LedgerResult<Account> {
        let mut account = self
            .store
            .accounts
            .get(id)?
            .ok_or_else(|| LedgerError::account_not_found(id.to_string()))?;

        if let Some(name) = patch.name {
            account.name = name;
        }
        if let Some(kind) = patch.kind {
            account.kind = kind;
        }
        if let Some(bank) = patch.bank {
            account.bank = bank;
        }
        if let Some(initial_balance) = patch.initial_balance {
            account.initial_balance = initial_balance;
        }

        account
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.store.accounts.upsert(account.clone())?;
        self.recalculate()?;
        self.store.commit()?;

        self.audit.log(
            &AuditEntry::update(EntityType::Account, id.to_string()).name(account.name.clone()),
        )?;

        // Return the stored row, whose balance the recalculation refreshed
        self.store
            .accounts
            .get(id)?
            .ok_or_else(|| LedgerError::account_not_found(id.to_string()))
    }

    /// Delete an account and every transaction referencing it
    ///
    /// A transfer counterpart row on another account is left in place as a
    /// one-sided record.
    pub fn delete_account(&self, id: AccountId) -> LedgerResult<()> {
        let account = self
            .store
            .accounts
            .get(id)?
            .ok_or_else(|| LedgerError::account_not_found(id.to_string()))?;

        let removed = self.store.transactions.delete_by_account(id)?;
        self.store.accounts.delete(id)?;
        self.recalculate()?;
        self.store.commit()?;

        self.audit.log(
            &AuditEntry::delete(EntityType::Account, id.to_string())
                .name(account.name)
                .detail(format!("cascade removed {} transactions", removed)),
        )?;

        Ok(())
    }

    // ---- Transactions ------------------------------------------------------

    /// Record a transaction against a live account
    pub fn record_transaction(&self, draft: TransactionDraft) -> LedgerResult<Transaction> {
        self.validate_draft(&draft)?;

        let txn = Self::build_transaction(draft);
        self.store.transactions.upsert(txn.clone())?;
        self.recalculate()?;
        self.store.commit()?;

        self.audit.log(
            &AuditEntry::create(EntityType::Transaction, txn.id.to_string())
                .detail(format!("{} {}", txn.tx_type, txn.amount)),
        )?;

        Ok(txn)
    }

    /// Replace a transaction's fields in place, keeping its identity
    pub fn update_transaction(
        &self,
        id: TransactionId,
        draft: TransactionDraft,
    ) -> LedgerResult<Transaction> {
        self.store
            .transactions
            .get(id)?
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;
        self.validate_draft(&draft)?;

        let mut txn = Self::build_transaction(draft);
        txn.id = id;
        self.store.transactions.upsert(txn.clone())?;
        self.recalculate()?;
        self.store.commit()?;

        self.audit.log(
            &AuditEntry::update(EntityType::Transaction, id.to_string())
                .detail(format!("{} {}", txn.tx_type, txn.amount)),
        )?;

        Ok(txn)
    }

    /// Delete one transaction
    ///
    /// Deleting one leg of a transfer leaves the counterpart as a one-sided
    /// record, same as the account-cascade orphan.
    pub fn delete_transaction(&self, id: TransactionId) -> LedgerResult<()> {
        let txn = self
            .store
            .transactions
            .get(id)?
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;

        self.store.transactions.delete(id)?;
        self.recalculate()?;
        self.store.commit()?;

        self.audit.log(
            &AuditEntry::delete(EntityType::Transaction, id.to_string())
                .detail(format!("{} {}", txn.tx_type, txn.amount)),
        )?;

        Ok(())
    }

    /// Move money between two accounts as an atomic transfer pair
    ///
    /// The funds check reads the balance stored by the last recalculation,
    /// not a live recompute; see the single-writer note on the engine.
    pub fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: Money,
        date: DateTime<Utc>,
        notes: impl Into<String>,
    ) -> LedgerResult<TransferPair> {
        if from == to {
            return Err(LedgerError::Validation(
                "Source and destination accounts cannot be the same".into(),
            ));
        }
        if !amount.is_positive() {
            return Err(LedgerError::Validation(format!(
                "Transfer amount must be positive, got {}",
                amount
            )));
        }

        let source = self
            .store
            .accounts
            .get(from)?
            .ok_or_else(|| LedgerError::account_not_found(from.to_string()))?;
        let destination = self
            .store
            .accounts
            .get(to)?
            .ok_or_else(|| LedgerError::account_not_found(to.to_string()))?;

        if source.balance < amount {
            return Err(LedgerError::InsufficientFunds {
                account: source.name.clone(),
                needed: amount.cents(),
                available: source.balance.cents(),
            });
        }

        let notes = notes.into();
        let mut outgoing = Transaction::new(TransactionType::TransferOut, amount, from, date);
        outgoing.description = notes.clone();
        let mut incoming = Transaction::new(TransactionType::TransferIn, amount, to, date);
        incoming.description = notes;

        self.store.transactions.upsert(outgoing.clone())?;
        self.store.transactions.upsert(incoming.clone())?;
        self.recalculate()?;
        self.store.commit()?;

        self.audit.log_batch(&[
            AuditEntry::create(EntityType::Transaction, outgoing.id.to_string())
                .name(format!("Transfer to {}", destination.name))
                .detail(format!("{}", amount)),
            AuditEntry::create(EntityType::Transaction, incoming.id.to_string())
                .name(format!("Transfer from {}", source.name))
                .detail(format!("{}", amount)),
        ])?;

        Ok(TransferPair { outgoing, incoming })
    }

    fn validate_draft(&self, draft: &TransactionDraft) -> LedgerResult<()> {
        if !draft.amount.is_positive() {
            return Err(LedgerError::Validation(format!(
                "Transaction amount must be positive, got {}",
                draft.amount
            )));
        }
        if !self.store.accounts.exists(draft.account_id)? {
            return Err(LedgerError::Validation(format!(
                "Account {} does not exist",
                draft.account_id
            )));
        }
        Ok(())
    }

    fn build_transaction(draft: TransactionDraft) -> Transaction {
        let mut txn =
            Transaction::new(draft.tx_type, draft.amount, draft.account_id, draft.date);
        txn.category = draft.category;
        txn.subcategory = draft.subcategory;
        txn.description = draft.description;
        txn.meta = draft.meta;
        txn
    }

    // ---- Categories --------------------------------------------------------

    /// Add a user-defined category
    pub fn add_category(
        &self,
        kind: CategoryKind,
        name: impl Into<String>,
    ) -> LedgerResult<Category> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LedgerError::Validation("Category name cannot be empty".into()));
        }

        let category = Category::new(kind, name);
        self.store.categories.upsert(category.clone())?;
        self.store.commit()?;

        self.audit.log(
            &AuditEntry::create(EntityType::Category, category.id.to_string())
                .name(category.name.clone()),
        )?;

        Ok(category)
    }

    /// Delete a user-defined category; seeded defaults are protected
    pub fn delete_category(&self, id: CategoryId) -> LedgerResult<()> {
        let category = self
            .store
            .categories
            .get(id)?
            .ok_or_else(|| LedgerError::category_not_found(id.to_string()))?;

        if category.is_default {
            return Err(LedgerError::Protected(format!(
                "Cannot delete default category '{}'",
                category.name
            )));
        }

        self.store.categories.delete(id)?;
        self.store.commit()?;

        self.audit.log(
            &AuditEntry::delete(EntityType::Category, id.to_string()).name(category.name),
        )?;

        Ok(())
    }

    // ---- Budgets and goals -------------------------------------------------

    /// Append a budget entry to the `budgets` settings list
    ///
    /// No cross-validation against transactions happens at write time;
    /// consumers evaluate budgets lazily.
    pub fn add_budget(&self, name: impl Into<String>, limit: Money) -> LedgerResult<BudgetEntry> {
        let entry = BudgetEntry::new(name, limit);
        let mut entries = self.budgets()?;
        entries.push(entry.clone());
        self.store
            .settings
            .set(keys::BUDGETS, serde_json::to_value(&entries)?)?;
        self.store.commit()?;

        self.audit.log(
            &AuditEntry::create(EntityType::Budget, entry.id.to_string()).name(entry.name.clone()),
        )?;

        Ok(entry)
    }

    /// Remove a budget entry by id
    pub fn remove_budget(&self, id: BudgetId) -> LedgerResult<()> {
        let mut entries = self.budgets()?;
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        if entries.len() == before {
            return Err(LedgerError::NotFound {
                entity_type: "Budget",
                identifier: id.to_string(),
            });
        }

        self.store
            .settings
            .set(keys::BUDGETS, serde_json::to_value(&entries)?)?;
        self.store.commit()?;

        self.audit
            .log(&AuditEntry::delete(EntityType::Budget, id.to_string()))?;

        Ok(())
    }

    /// Append a goal entry to the `goals` settings list
    pub fn add_goal(&self, title: impl Into<String>, target: Money) -> LedgerResult<GoalEntry> {
        let entry = GoalEntry::new(title, target);
        let mut entries = self.goals()?;
        entries.push(entry.clone());
        self.store
            .settings
            .set(keys::GOALS, serde_json::to_value(&entries)?)?;
        self.store.commit()?;

        self.audit.log(
            &AuditEntry::create(EntityType::Goal, entry.id.to_string()).name(entry.title.clone()),
        )?;

        Ok(entry)
    }

    /// Remove a goal entry by id
    pub fn remove_goal(&self, id: GoalId) -> LedgerResult<()> {
        let mut entries = self.goals()?;
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        if entries.len() == before {
            return Err(LedgerError::NotFound {
                entity_type: "Goal",
                identifier: id.to_string(),
            });
        }

        self.store
            .settings
            .set(keys::GOALS, serde_json::to_value(&entries)?)?;
        self.store.commit()?;

        self.audit
            .log(&AuditEntry::delete(EntityType::Goal, id.to_string()))?;

        Ok(())
    }

    // ---- Backup ------------------------------------------------------------

    /// Capture a snapshot of the entire dataset, stored balances included
    pub fn snapshot(&self) -> LedgerResult<Snapshot> {
        Ok(Snapshot::capture(
            self.store.accounts.get_all()?,
            self.store.transactions.get_all()?,
            self.store.categories.get_all()?,
            self.store.settings.get_all()?,
        ))
    }

    /// Destructively replace the entire dataset with a snapshot's contents
    ///
    /// Balances carried in the snapshot are never trusted; a full
    /// recalculation runs before the single commit, so a hand-edited
    /// snapshot's stale balances are repaired on the way in.
    pub fn restore(&self, snapshot: Snapshot) -> LedgerResult<()> {
        let summary = snapshot.summary();
        self.store.replace_all(
            snapshot.accounts,
            snapshot.transactions,
            snapshot.categories,
            snapshot.settings,
        )?;
        self.recalculate()?;
        self.store.commit()?;

        self.audit.log(&AuditEntry::restore(summary))?;

        Ok(())
    }

    /// Restore from plaintext backup JSON
    pub fn restore_json(&self, text: &str) -> LedgerResult<()> {
        self.restore(Snapshot::from_json(text)?)
    }

    /// Capture a snapshot and encrypt it under the given password
    pub fn snapshot_encrypted(&self, password: &str) -> LedgerResult<Vec<u8>> {
        encrypt_snapshot(&self.snapshot()?, password)
    }

    /// Restore from an encrypted backup
    pub fn restore_encrypted(&self, bytes: &[u8], password: &str) -> LedgerResult<()> {
        self.restore(decrypt_snapshot(bytes, password)?)
    }

    /// Write a plaintext backup into the export directory
    pub fn export_to_file(&self) -> LedgerResult<PathBuf> {
        let path = self.export_path("json");
        std::fs::write(&path, self.snapshot()?.to_json()?)?;
        Ok(path)
    }

    /// Write an encrypted backup into the export directory
    pub fn export_encrypted_to_file(&self, password: &str) -> LedgerResult<PathBuf> {
        let path = self.export_path("enc");
        std::fs::write(&path, self.snapshot_encrypted(password)?)?;
        Ok(path)
    }

    /// Restore from a plaintext backup file
    pub fn import_from_file(&self, path: &Path) -> LedgerResult<()> {
        let text = std::fs::read_to_string(path)?;
        self.restore_json(&text)
    }

    /// Restore from an encrypted backup file
    pub fn import_encrypted_from_file(&self, path: &Path, password: &str) -> LedgerResult<()> {
        let bytes = std::fs::read(path)?;
        self.restore_encrypted(&bytes, password)
    }

    fn export_path(&self, extension: &str) -> PathBuf {
        let filename = format!(
            "fintrack-backup-{}.{}",
            Utc::now().format("%Y%m%d-%H%M%S"),
            extension
        );
        self.store.paths().export_dir().join(filename)
    }

    // ---- Access lock -------------------------------------------------------

    /// Current lock state
    pub fn lock_state(&self) -> LedgerResult<LockState> {
        self.lock.state()
    }

    /// Whether the session is currently locked
    pub fn is_locked(&self) -> LedgerResult<bool> {
        self.lock.is_locked()
    }

    /// Store a one-way digest of the PIN
    ///
    /// The running session keeps its current state; the stored digest locks
    /// subsequent opens.
    pub fn set_pin(&self, pin: &str) -> LedgerResult<()> {
        if pin.trim().is_empty() {
            return Err(LedgerError::Validation("PIN cannot be empty".into()));
        }

        self.store
            .settings
            .set(keys::PIN_HASH, serde_json::Value::String(pin_digest(pin)))?;
        self.store.commit()?;
        Ok(())
    }

    /// Remove the stored PIN digest and unlock the session
    pub fn clear_pin(&self) -> LedgerResult<()> {
        self.store.settings.remove(keys::PIN_HASH)?;
        self.store.commit()?;
        self.lock.mark_unlocked()?;
        Ok(())
    }

    /// Compare an attempt against the stored digest
    ///
    /// On match the session unlocks and `true` is returned; on mismatch the
    /// session stays locked and `false` is returned. Attempts are unlimited.
    pub fn unlock(&self, attempt: &str) -> LedgerResult<bool> {
        let matches = match self.store.settings.get(keys::PIN_HASH)? {
            Some(serde_json::Value::String(stored)) => stored == pin_digest(attempt),
            _ => false,
        };

        if matches {
            self.lock.mark_unlocked()?;
        }
        Ok(matches)
    }

    // ---- Internals ---------------------------------------------------------

    /// Overwrite every account's derived balance from the transaction log
    fn recalculate(&self) -> LedgerResult<()> {
        let accounts = self.store.accounts.get_all()?;
        let transactions = self.store.transactions.get_all()?;

        for (id, balance) in recalculated_balances(&accounts, &transactions) {
            self.store.accounts.set_balance(id, balance)?;
        }
        Ok(())
    }
}
