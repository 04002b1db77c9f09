//! Gift row model.

use giftlist_core::gift::GiftRecord;
use giftlist_core::types::{GiftId, Timestamp};
use sqlx::FromRow;

/// A row from the `gifts` table.
///
/// Column names are snake_case; the wire projection ([`GiftRecord`]) carries
/// the same fields in camelCase.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct GiftRow {
    pub id: GiftId,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub base_price: f64,
    pub created_at: Timestamp,
}

impl From<GiftRow> for GiftRecord {
    fn from(row: GiftRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            image_url: row.image_url,
            base_price: row.base_price,
            created_at: row.created_at,
        }
    }
}
