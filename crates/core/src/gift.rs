//! The gift entity and its field rules.
//!
//! [`Gift`] is an immutable, always-valid value. It is built either from
//! user input ([`Gift::from_input`], which assigns the id and timestamp) or
//! from a stored row ([`Gift::from_storage`], which keeps them). Every field
//! update goes through the same validator as construction and returns a new
//! value, so an invalid field can never be observed on a `Gift`.
//!
//! The validators are public so the client library can run the same rule
//! set before a request leaves the process.

use chrono::{SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;
use url::{Host, Url};

use crate::error::CoreError;
use crate::types::{GiftId, Timestamp};

// ---------------------------------------------------------------------------
// Validation constants
// ---------------------------------------------------------------------------

/// Maximum title length (characters).
pub const MAX_TITLE_LENGTH: usize = 100;
/// Maximum description length (characters).
pub const MAX_DESCRIPTION_LENGTH: usize = 500;
/// Highest accepted base price.
pub const MAX_BASE_PRICE: f64 = 999_999.99;
/// URL schemes accepted for `imageUrl`.
pub const ALLOWED_URL_SCHEMES: &[&str] = &["http", "https", "ftp"];
/// Message returned for any identifier that is not a hyphenated UUID.
pub const INVALID_ID_MESSAGE: &str = "Invalid gift ID format";

/// Length of a hyphenated UUID string.
const HYPHENATED_UUID_LEN: usize = 36;

// ---------------------------------------------------------------------------
// Plain-data shapes
// ---------------------------------------------------------------------------

/// Plain-data projection of a gift, as serialized over the wire and stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftRecord {
    pub id: GiftId,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub base_price: f64,
    pub created_at: Timestamp,
}

impl GiftRecord {
    /// Overlay the fields present in `patch`.
    ///
    /// Only explicit `null`s are checked here: clearing a required field
    /// fails with that field's own message. Everything else is left for
    /// [`Gift::from_storage`], which re-checks the whole record, not only the
    /// patched fields.
    pub fn merged(self, patch: GiftPatch) -> Result<Self, CoreError> {
        Ok(Self {
            title: overlay_text(patch.title, self.title, validate_title)?,
            description: overlay_text(patch.description, self.description, validate_description)?,
            image_url: overlay_text(patch.image_url, self.image_url, validate_image_url)?,
            base_price: match patch.base_price {
                None => self.base_price,
                Some(price) => require_base_price(price)?,
            },
            ..self
        })
    }
}

/// `None` keeps `current`, `Some(Some(v))` replaces it, and `Some(None)`
/// (an explicit `null`) is run through `rule` as an empty value, which
/// always fails.
fn overlay_text(
    patch: Option<Option<String>>,
    current: String,
    rule: fn(&str) -> Result<(), CoreError>,
) -> Result<String, CoreError> {
    match patch {
        None => Ok(current),
        Some(Some(value)) => Ok(value),
        Some(None) => rule("").map(|()| String::new()),
    }
}

/// User-supplied fields for a new gift.
///
/// Missing text fields deserialize as empty strings and a missing price as
/// `None`, so absent values are reported by the entity's own rules rather
/// than as a JSON shape error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub base_price: Option<f64>,
}

/// Partial update: any subset of the four business fields.
///
/// Each field tells an absent key (`None`) apart from an explicit `null`
/// (`Some(None)`); see [`GiftRecord::merged`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftPatch {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub title: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub image_url: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub base_price: Option<Option<f64>>,
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A validated gift.
#[derive(Debug, Clone, PartialEq)]
pub struct Gift {
    id: GiftId,
    title: String,
    description: String,
    image_url: String,
    base_price: f64,
    created_at: Timestamp,
}

impl Gift {
    /// Build a brand-new gift from user input, assigning a fresh id and the
    /// current time (millisecond precision).
    pub fn from_input(input: GiftInput) -> Result<Self, CoreError> {
        validate_title(&input.title)?;
        validate_description(&input.description)?;
        validate_image_url(&input.image_url)?;
        let base_price = require_base_price(input.base_price)?;

        Ok(Self {
            id: GiftId::new_v4(),
            title: input.title,
            description: input.description,
            image_url: input.image_url,
            base_price,
            created_at: Utc::now().trunc_subsecs(3),
        })
    }

    /// Rehydrate a gift from a stored row, keeping its id and timestamp.
    ///
    /// The row is re-validated; a row that no longer satisfies the rules is
    /// rejected like any other input.
    pub fn from_storage(record: GiftRecord) -> Result<Self, CoreError> {
        validate_title(&record.title)?;
        validate_description(&record.description)?;
        validate_image_url(&record.image_url)?;
        validate_base_price(record.base_price)?;

        Ok(Self {
            id: record.id,
            title: record.title,
            description: record.description,
            image_url: record.image_url,
            base_price: record.base_price,
            created_at: record.created_at,
        })
    }

    pub fn id(&self) -> GiftId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn with_title(self, title: impl Into<String>) -> Result<Self, CoreError> {
        let title = title.into();
        validate_title(&title)?;
        Ok(Self { title, ..self })
    }

    pub fn with_description(self, description: impl Into<String>) -> Result<Self, CoreError> {
        let description = description.into();
        validate_description(&description)?;
        Ok(Self {
            description,
            ..self
        })
    }

    pub fn with_image_url(self, image_url: impl Into<String>) -> Result<Self, CoreError> {
        let image_url = image_url.into();
        validate_image_url(&image_url)?;
        Ok(Self { image_url, ..self })
    }

    pub fn with_base_price(self, base_price: f64) -> Result<Self, CoreError> {
        validate_base_price(base_price)?;
        Ok(Self { base_price, ..self })
    }

    /// Plain-data projection with all six fields.
    pub fn to_record(&self) -> GiftRecord {
        GiftRecord {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            image_url: self.image_url.clone(),
            base_price: self.base_price,
            created_at: self.created_at,
        }
    }
}

impl From<Gift> for GiftRecord {
    fn from(gift: Gift) -> Self {
        Self {
            id: gift.id,
            title: gift.title,
            description: gift.description,
            image_url: gift.image_url,
            base_price: gift.base_price,
            created_at: gift.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Field validators
// ---------------------------------------------------------------------------

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::validation("Title cannot be empty"));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::validation(format!(
            "Title cannot exceed {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.trim().is_empty() {
        return Err(CoreError::validation("Description cannot be empty"));
    }
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::validation(format!(
            "Description cannot exceed {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate an image URL.
///
/// Accepts absolute `http`, `https` or `ftp` URLs whose host is an IP
/// address or a dotted domain name.
pub fn validate_image_url(image_url: &str) -> Result<(), CoreError> {
    if image_url.trim().is_empty() {
        return Err(CoreError::validation("Image URL cannot be empty"));
    }

    let well_formed = Url::parse(image_url).is_ok_and(|url| {
        ALLOWED_URL_SCHEMES.contains(&url.scheme())
            && match url.host() {
                Some(Host::Domain(domain)) => {
                    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
                }
                Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
                None => false,
            }
    });

    if !well_formed {
        return Err(CoreError::validation("Invalid image URL format"));
    }
    Ok(())
}

pub fn validate_base_price(base_price: f64) -> Result<(), CoreError> {
    if !base_price.is_finite() {
        return Err(CoreError::validation("Base price must be a finite number"));
    }
    if base_price < 0.0 {
        return Err(CoreError::validation("Base price cannot be negative"));
    }
    if base_price > MAX_BASE_PRICE {
        return Err(CoreError::validation("Base price cannot exceed 999,999.99"));
    }
    Ok(())
}

/// Validate a price that may be absent.
pub fn require_base_price(base_price: Option<f64>) -> Result<f64, CoreError> {
    let base_price = base_price.ok_or_else(|| CoreError::validation("Base price is required"))?;
    validate_base_price(base_price)?;
    Ok(base_price)
}

/// Parse an external identifier.
///
/// Only the canonical hyphenated form is accepted (any UUID version);
/// simple, braced and URN encodings are rejected.
pub fn parse_gift_id(id: &str) -> Result<GiftId, CoreError> {
    if id.len() != HYPHENATED_UUID_LEN {
        return Err(CoreError::validation(INVALID_ID_MESSAGE));
    }
    GiftId::try_parse(id).map_err(|_| CoreError::validation(INVALID_ID_MESSAGE))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
