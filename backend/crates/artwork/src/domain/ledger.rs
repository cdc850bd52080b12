//! Ledger Trait
//!
//! Interface to the (simulated) distributed ledger used for anchoring
//! content hashes and moving marketplace funds. The simulation lives in
//! the infrastructure layer; use cases only see this trait.

use crate::domain::value_objects::LedgerAccount;

/// Outcome of a ledger submission (hash anchoring or transfer)
#[derive(Debug, Clone)]
pub struct LedgerTransaction {
    pub success: bool,
    pub transaction_id: Option<String>,
    pub file_id: Option<String>,
    pub error: Option<String>,
}

impl LedgerTransaction {
    pub fn succeeded(transaction_id: String, file_id: Option<String>) -> Self {
        Self {
            success: true,
            transaction_id: Some(transaction_id),
            file_id,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            transaction_id: None,
            file_id: None,
            error: Some(error.into()),
        }
    }
}

/// Outcome of a ledger-side verification lookup
#[derive(Debug, Clone)]
pub struct LedgerVerification {
    pub success: bool,
    pub is_verified: bool,
    /// Simulated file contents, present for file-id lookups
    pub file_contents: Option<String>,
    pub error: Option<String>,
}

/// Ledger operations used by the artwork use cases
#[trait_variant::make(Ledger: Send)]
pub trait LocalLedger {
    /// Anchor a content hash on the ledger; the memo names the file
    async fn register_hash(&self, content_hash: &str, file_name: &str) -> LedgerTransaction;

    /// Transfer funds between two accounts
    async fn transfer(
        &self,
        from: &LedgerAccount,
        to: &LedgerAccount,
        amount: f64,
    ) -> LedgerTransaction;

    /// Current balance of an account
    async fn get_balance(&self, account: &LedgerAccount) -> f64;

    /// Verify that the file stored under `file_id` matches the expected hash
    async fn verify_by_file_id(&self, file_id: &str, expected_hash: &str) -> LedgerVerification;

    /// Verify that the transaction memo records the expected hash
    async fn verify_by_transaction_id(
        &self,
        transaction_id: &str,
        expected_hash: &str,
    ) -> LedgerVerification;
}
