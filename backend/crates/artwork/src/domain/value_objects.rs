//! Domain Value Objects

use kernel::id::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// SHA-256 content hash of an artwork, lowercase hex (64 chars)
///
/// This is the artwork's identity: equal bytes produce the same hash, and
/// registration rejects any hash that is already known.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    /// Compute the content hash of raw file bytes
    pub fn compute(bytes: &[u8]) -> Self {
        Self(platform::crypto::sha256_hex(bytes))
    }

    /// Parse a caller-supplied hex string (e.g. the verify endpoint input).
    /// Accepts upper- or lowercase input, stores lowercase.
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.len() != 64 || !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ledger account id in `shard.realm.num` form (e.g. `0.0.6945291`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LedgerAccount(String);

impl LedgerAccount {
    pub fn new(account: impl Into<String>) -> Self {
        Self(account.into())
    }

    /// Deterministic simulated account for a seller, derived from the user id
    pub fn for_seller(user_id: UserId) -> Self {
        Self(format!("0.0.{}", 1_000_000 + user_id.get()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LedgerAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
