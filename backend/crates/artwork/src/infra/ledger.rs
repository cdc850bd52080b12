//! Simulated Ledger
//!
//! Stands in for a real distributed-ledger client. Transaction and file
//! ids are fabricated in the ledger's wire format, balances are fixed,
//! operations sleep to approximate network latency, and submissions
//! never fail. Swapping in a real client means implementing
//! [`Ledger`](crate::domain::ledger::Ledger) against its SDK.

use crate::domain::ledger::{Ledger, LedgerTransaction, LedgerVerification};
use crate::domain::value_objects::LedgerAccount;
use chrono::Utc;
use rand::Rng;
use std::time::Duration;

/// Tuning for the simulation
#[derive(Debug, Clone)]
pub struct LedgerSimConfig {
    /// Multiplier applied to every artificial delay; 0.0 disables them
    pub delay_factor: f64,
    /// Account with the richer fixed balance
    pub funded_account: LedgerAccount,
    /// Balance reported for the funded account
    pub funded_balance: f64,
    /// Balance reported for every other account
    pub default_balance: f64,
}

impl Default for LedgerSimConfig {
    fn default() -> Self {
        Self {
            delay_factor: 1.0,
            funded_account: LedgerAccount::new("0.0.6945291"),
            funded_balance: 100.0,
            default_balance: 50.0,
        }
    }
}

impl LedgerSimConfig {
    /// Configuration without artificial delays, for tests
    pub fn instant() -> Self {
        Self {
            delay_factor: 0.0,
            ..Default::default()
        }
    }
}

/// Simulated ledger client
#[derive(Debug, Clone, Default)]
pub struct SimulatedLedger {
    config: LedgerSimConfig,
}

impl SimulatedLedger {
    pub fn new(config: LedgerSimConfig) -> Self {
        Self { config }
    }

    async fn simulate_latency(&self, base_ms: u64) {
        let scaled = (base_ms as f64 * self.config.delay_factor) as u64;
        if scaled > 0 {
            tokio::time::sleep(Duration::from_millis(scaled)).await;
        }
    }

    /// Fabricate a transaction id in `shard.realm.num@seconds.nanos` form
    fn fabricate_transaction_id() -> String {
        let mut rng = rand::thread_rng();
        let account: u32 = rng.gen_range(1_000_000..10_000_000);
        let nanos: u32 = rng.gen_range(100_000..1_000_000);
        format!("0.0.{account}@{}.{nanos}", Utc::now().timestamp())
    }

    /// Fabricate a file id in `shard.realm.num` form
    fn fabricate_file_id() -> String {
        let mut rng = rand::thread_rng();
        format!("0.0.{}", rng.gen_range(1_000_000..10_000_000u32))
    }
}

impl Ledger for SimulatedLedger {
    async fn register_hash(&self, content_hash: &str, file_name: &str) -> LedgerTransaction {
        self.simulate_latency(1000).await;

        let transaction_id = Self::fabricate_transaction_id();
        let file_id = Self::fabricate_file_id();
        tracing::info!(
            content_hash = %content_hash,
            file_name = %file_name,
            transaction_id = %transaction_id,
            file_id = %file_id,
            "simulated ledger registration"
        );
        LedgerTransaction::succeeded(transaction_id, Some(file_id))
    }

    async fn transfer(
        &self,
        from: &LedgerAccount,
        to: &LedgerAccount,
        amount: f64,
    ) -> LedgerTransaction {
        self.simulate_latency(1500).await;

        let transaction_id = Self::fabricate_transaction_id();
        tracing::info!(
            from = %from,
            to = %to,
            amount,
            transaction_id = %transaction_id,
            "simulated ledger transfer"
        );
        LedgerTransaction::succeeded(transaction_id, None)
    }

    async fn get_balance(&self, account: &LedgerAccount) -> f64 {
        self.simulate_latency(300).await;

        if *account == self.config.funded_account {
            self.config.funded_balance
        } else {
            self.config.default_balance
        }
    }

    async fn verify_by_file_id(&self, file_id: &str, expected_hash: &str) -> LedgerVerification {
        self.simulate_latency(500).await;

        LedgerVerification {
            success: true,
            is_verified: true,
            file_contents: Some(format!(
                "Digital Artwork Registration\nFile: {file_id}\nSHA256 Hash: {expected_hash}\nTimestamp: {}",
                Utc::now().to_rfc3339()
            )),
            error: None,
        }
    }

    async fn verify_by_transaction_id(
        &self,
        transaction_id: &str,
        expected_hash: &str,
    ) -> LedgerVerification {
        self.simulate_latency(500).await;

        tracing::debug!(
            transaction_id = %transaction_id,
            expected_hash = %expected_hash,
            "simulated transaction verification"
        );
        LedgerVerification {
            success: true,
            is_verified: true,
            file_contents: None,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ledger::Ledger;

    fn instant_ledger() -> SimulatedLedger {
        SimulatedLedger::new(LedgerSimConfig::instant())
    }

    #[tokio::test]
    async fn registration_fabricates_well_formed_ids() {
        let ledger = instant_ledger();
        let result = ledger.register_hash("a".repeat(64).as_str(), "art.png").await;

        assert!(result.success);
        let tx = result.transaction_id.unwrap();
        let (account, timestamp) = tx.split_once('@').unwrap();
        assert!(account.starts_with("0.0."));
        let (secs, nanos) = timestamp.split_once('.').unwrap();
        assert!(secs.parse::<i64>().is_ok());
        assert!((100_000..1_000_000).contains(&nanos.parse::<u32>().unwrap()));

        let file_id = result.file_id.unwrap();
        let num = file_id.strip_prefix("0.0.").unwrap().parse::<u32>().unwrap();
        assert!((1_000_000..10_000_000).contains(&num));
    }

    #[tokio::test]
    async fn balances_are_fixed_per_account() {
        let ledger = instant_ledger();
        let funded = LedgerAccount::new("0.0.6945291");
        let other = LedgerAccount::new("0.0.1000042");

        assert_eq!(ledger.get_balance(&funded).await, 100.0);
        assert_eq!(ledger.get_balance(&other).await, 50.0);
    }

    #[tokio::test]
    async fn transfer_always_succeeds_with_transaction_id() {
        let ledger = instant_ledger();
        let result = ledger
            .transfer(
                &LedgerAccount::new("0.0.6945291"),
                &LedgerAccount::new("0.0.1000001"),
                25.0,
            )
            .await;
        assert!(result.success);
        assert!(result.transaction_id.is_some());
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn verification_reports_verified() {
        let ledger = instant_ledger();
        let by_file = ledger.verify_by_file_id("0.0.1234567", &"b".repeat(64)).await;
        assert!(by_file.is_verified);
        assert!(by_file.file_contents.unwrap().contains(&"b".repeat(64)));

        let by_tx = ledger
            .verify_by_transaction_id("0.0.1234567@1700000000.100001", &"b".repeat(64))
            .await;
        assert!(by_tx.is_verified);
    }
}
