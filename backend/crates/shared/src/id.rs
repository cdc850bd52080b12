//! Common ID Types
//!
//! Type-safe ID wrappers for domain entities. The relational store hands
//! out integer surrogate keys, so the wrapper carries an `i64` and marker
//! types keep artwork, user and purchase ids from being mixed up.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type ArtworkId = Id<markers::Artwork>;
///
/// let id = ArtworkId::new(7);
/// assert_eq!(id.get(), 7);
/// assert!(id.is_valid());
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Wrap a database-generated key
    pub const fn new(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the underlying integer key
    pub const fn get(&self) -> i64 {
        self.value
    }

    /// Surrogate keys are positive; zero and negatives never identify a row
    pub const fn is_valid(&self) -> bool {
        self.value > 0
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::new)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for user IDs
    pub struct User;

    /// Marker for artwork IDs
    pub struct Artwork;

    /// Marker for purchase-record IDs
    pub struct Purchase;

    /// Marker for ledger-record IDs
    pub struct LedgerRecord;
}

/// Type aliases for common IDs
pub type UserId = Id<markers::User>;
pub type ArtworkId = Id<markers::Artwork>;
pub type PurchaseId = Id<markers::Purchase>;
pub type LedgerRecordId = Id<markers::LedgerRecord>;
