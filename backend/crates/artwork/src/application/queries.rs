//! Read-Only Artwork Queries
//!
//! Thin pass-throughs over the repository; response caching happens in
//! the handlers so the cached value is the serialized DTO list.

use crate::domain::entities::ArtworkDetails;
use crate::domain::repository::ArtworkRepository;
use crate::error::{ArtworkError, ArtworkResult};
use kernel::id::UserId;
use std::sync::Arc;

/// Read-only artwork queries
pub struct ArtworkQueries<R>
where
    R: ArtworkRepository,
{
    repo: Arc<R>,
}

impl<R> ArtworkQueries<R>
where
    R: ArtworkRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// All artworks owned by a user, newest first
    pub async fn user_artworks(&self, user_id: UserId) -> ArtworkResult<Vec<ArtworkDetails>> {
        if !user_id.is_valid() {
            return Err(ArtworkError::Validation("Invalid user ID".to_string()));
        }
        self.repo.list_by_owner(user_id).await
    }

    /// All artworks currently listed for sale, newest first
    pub async fn marketplace(&self) -> ArtworkResult<Vec<ArtworkDetails>> {
        self.repo.list_for_sale().await
    }

    /// All artworks a user has purchased, newest first
    pub async fn purchased_artworks(&self, user_id: UserId) -> ArtworkResult<Vec<ArtworkDetails>> {
        if !user_id.is_valid() {
            return Err(ArtworkError::Validation("Invalid user ID".to_string()));
        }
        self.repo.list_purchased_by(user_id).await
    }
}
