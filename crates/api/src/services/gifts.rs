//! Gift access service.
//!
//! Translates external identifiers and partial-update payloads into entity
//! operations against a [`GiftStore`]. Every row read back from the store is
//! rehydrated through [`Gift::from_storage`], so callers only ever see
//! validated gifts. Errors are never swallowed here; they surface to the
//! handlers, which own the status-code mapping.

use std::sync::Arc;

use async_trait::async_trait;
use giftlist_core::error::CoreError;
use giftlist_core::gift::{parse_gift_id, Gift, GiftInput, GiftPatch, GiftRecord};
use giftlist_core::types::GiftId;
use giftlist_db::repositories::GiftRepo;
use giftlist_db::DbPool;

use crate::error::AppResult;

// ---------------------------------------------------------------------------
// Store port
// ---------------------------------------------------------------------------

/// Persistence operations the service needs.
///
/// Implementations receive records that already passed entity validation
/// and must not alter `id` or `created_at`.
#[async_trait]
pub trait GiftStore: Send + Sync {
    async fn insert(&self, record: &GiftRecord) -> Result<GiftRecord, sqlx::Error>;

    /// All gifts, newest first.
    async fn list(&self) -> Result<Vec<GiftRecord>, sqlx::Error>;

    async fn find(&self, id: GiftId) -> Result<Option<GiftRecord>, sqlx::Error>;

    /// Returns `None` if no row matched.
    async fn update(&self, record: &GiftRecord) -> Result<Option<GiftRecord>, sqlx::Error>;

    /// Returns `true` if a row was removed.
    async fn delete(&self, id: GiftId) -> Result<bool, sqlx::Error>;
}

/// [`GiftStore`] backed by the `gifts` table.
pub struct PgGiftStore {
    pool: DbPool,
}

impl PgGiftStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GiftStore for PgGiftStore {
    async fn insert(&self, record: &GiftRecord) -> Result<GiftRecord, sqlx::Error> {
        GiftRepo::create(&self.pool, record).await.map(Into::into)
    }

    async fn list(&self) -> Result<Vec<GiftRecord>, sqlx::Error> {
        let rows = GiftRepo::list(&self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find(&self, id: GiftId) -> Result<Option<GiftRecord>, sqlx::Error> {
        let row = GiftRepo::find_by_id(&self.pool, id).await?;
        Ok(row.map(Into::into))
    }

    async fn update(&self, record: &GiftRecord) -> Result<Option<GiftRecord>, sqlx::Error> {
        let row = GiftRepo::update(&self.pool, record).await?;
        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: GiftId) -> Result<bool, sqlx::Error> {
        GiftRepo::delete(&self.pool, id).await
    }
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Gift CRUD with identifier parsing and entity validation.
///
/// Cheap to clone; the store is shared behind an `Arc`.
#[derive(Clone)]
pub struct GiftService {
    store: Arc<dyn GiftStore>,
}

impl GiftService {
    pub fn new(store: Arc<dyn GiftStore>) -> Self {
        Self { store }
    }

    pub fn postgres(pool: DbPool) -> Self {
        Self::new(Arc::new(PgGiftStore::new(pool)))
    }

    /// Validate `input`, persist it, and return the stored gift.
    pub async fn create(&self, input: GiftInput) -> AppResult<Gift> {
        let gift = Gift::from_input(input)?;
        let saved = self.store.insert(&gift.to_record()).await?;
        Ok(Gift::from_storage(saved)?)
    }

    /// All gifts, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<Gift>> {
        let records = self.store.list().await?;
        let gifts = records
            .into_iter()
            .map(Gift::from_storage)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(gifts)
    }

    /// Look up one gift. A malformed `id` fails before the store is touched;
    /// an unknown one yields `Ok(None)`.
    pub async fn find_one(&self, id: &str) -> AppResult<Option<Gift>> {
        let gift_id = parse_gift_id(id)?;
        match self.store.find(gift_id).await? {
            Some(record) => Ok(Some(Gift::from_storage(record)?)),
            None => Ok(None),
        }
    }

    /// Merge `patch` over the stored row and persist the result.
    ///
    /// The merged record is re-validated as a whole, so a stored row with an
    /// invalid field fails even when the patch does not touch that field.
    /// Read-modify-write without locking: the last writer wins.
    pub async fn update(&self, id: &str, patch: GiftPatch) -> AppResult<Gift> {
        let gift_id = parse_gift_id(id)?;
        let existing = self
            .store
            .find(gift_id)
            .await?
            .ok_or_else(|| CoreError::gift_not_found(gift_id))?;

        let updated = Gift::from_storage(existing.merged(patch)?)?;

        let saved = self
            .store
            .update(&updated.to_record())
            .await?
            .ok_or_else(|| CoreError::gift_not_found(gift_id))?;

        tracing::debug!(gift_id = %gift_id, "Gift row rewritten");
        Ok(Gift::from_storage(saved)?)
    }

    /// Delete a gift and return it as it was before deletion.
    pub async fn remove(&self, id: &str) -> AppResult<Gift> {
        let gift_id = parse_gift_id(id)?;
        let existing = self
            .store
            .find(gift_id)
            .await?
            .ok_or_else(|| CoreError::gift_not_found(gift_id))?;
        let gift = Gift::from_storage(existing)?;

        if !self.store.delete(gift_id).await? {
            return Err(CoreError::gift_not_found(gift_id).into());
        }

        tracing::debug!(gift_id = %gift_id, "Gift row deleted");
        Ok(gift)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
