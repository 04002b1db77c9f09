//! Giftlist domain layer.
//!
//! Holds the [`gift::Gift`] entity and its validation rules, the shared
//! error taxonomy, and the pure report aggregations the client library
//! computes over a fetched collection. Nothing here touches the network or
//! the database.

pub mod error;
pub mod gift;
pub mod report;
pub mod types;
