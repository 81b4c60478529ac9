//! fintrack-core - local-first personal finance ledger engine
//!
//! Keeps every record on the user's device and derives account balances from
//! an append-only transaction log. The crate is the ledger-consistency and
//! backup-portability core: recording financial events, recomputing derived
//! balances, and exporting/importing the full dataset, optionally
//! password-encrypted, without corrupting invariants. Presentation (charts,
//! forms, report rendering) lives outside and consumes the engine's views.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: data-directory resolution
//! - `error`: custom error types
//! - `models`: core data models (accounts, transactions, categories, settings)
//! - `storage`: single-document JSON store with atomic commits
//! - `ledger`: the engine owning every mutation, plus balance recalculation
//! - `backup`: portable snapshots, plaintext or password-encrypted
//! - `crypto`: key derivation and authenticated encryption for backups
//! - `lock`: optional PIN gate for the presentation layer
//! - `audit`: append-only log of successful mutations
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack_core::config::FintrackPaths;
//! use fintrack_core::models::Money;
//! use fintrack_core::LedgerEngine;
//!
//! let engine = LedgerEngine::open(FintrackPaths::new()?)?;
//! let cash = engine.create_account("Cash", "Cash", "", Money::zero())?;
//! ```

pub mod audit;
pub mod backup;
pub mod config;
pub mod crypto;
pub mod error;
pub mod ledger;
pub mod lock;
pub mod models;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
pub use ledger::{AccountPatch, LedgerEngine, TransactionDraft, TransferPair};
