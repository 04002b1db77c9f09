//! Repository for the `gifts` table.

use giftlist_core::gift::GiftRecord;
use giftlist_core::types::GiftId;
use sqlx::PgPool;

use crate::models::gift::GiftRow;

/// Column list for `gifts` queries.
const COLUMNS: &str = "id, title, description, image_url, base_price, created_at";

/// Provides data access for gifts.
///
/// Methods take already-validated records; validation lives in the entity.
pub struct GiftRepo;

impl GiftRepo {
    /// Insert a gift, keeping the id and timestamp the entity assigned.
    pub async fn create(pool: &PgPool, record: &GiftRecord) -> Result<GiftRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO gifts (id, title, description, image_url, base_price, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GiftRow>(&query)
            .bind(record.id)
            .bind(&record.title)
            .bind(&record.description)
            .bind(&record.image_url)
            .bind(record.base_price)
            .bind(record.created_at)
            .fetch_one(pool)
            .await
    }

    /// List all gifts, newest first.
    ///
    /// Ties on `created_at` are broken by id so the order is stable.
    pub async fn list(pool: &PgPool) -> Result<Vec<GiftRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM gifts ORDER BY created_at DESC, id");
        sqlx::query_as::<_, GiftRow>(&query).fetch_all(pool).await
    }

    /// Find a gift by its ID.
    pub async fn find_by_id(pool: &PgPool, id: GiftId) -> Result<Option<GiftRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM gifts WHERE id = $1");
        sqlx::query_as::<_, GiftRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the four business fields of an existing gift.
    ///
    /// `id` and `created_at` are never written. Returns `None` if no row
    /// matched.
    pub async fn update(
        pool: &PgPool,
        record: &GiftRecord,
    ) -> Result<Option<GiftRow>, sqlx::Error> {
        let query = format!(
            "UPDATE gifts SET \
                 title = $2, \
                 description = $3, \
                 image_url = $4, \
                 base_price = $5 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GiftRow>(&query)
            .bind(record.id)
            .bind(&record.title)
            .bind(&record.description)
            .bind(&record.image_url)
            .bind(record.base_price)
            .fetch_optional(pool)
            .await
    }

    /// Delete a gift by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: GiftId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM gifts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
